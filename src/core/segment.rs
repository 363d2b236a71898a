/// Table cell that opens every restaurant listing on a day page.
pub const RESTAURANT_CELL: &str =
    r##"<TD WIDTH="130" ALIGN="CENTER" VALIGN="TOP" BGCOLOR="#FFFFFF">"##;

/// Splits a day page into one chunk per restaurant, in page order.
///
/// Everything before the first restaurant cell is page preamble and is
/// dropped. A page without any restaurant cell yields no segments.
pub fn split_segments(document: &str) -> Vec<&str> {
    document.split(RESTAURANT_CELL).skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_yields_nothing() {
        assert!(split_segments("").is_empty());
        assert!(split_segments("<html><body>Inga luncher idag</body></html>").is_empty());
    }

    #[test]
    fn test_preamble_is_dropped() {
        let doc = format!("<html>header{}first{}second", RESTAURANT_CELL, RESTAURANT_CELL);
        assert_eq!(split_segments(&doc), vec!["first", "second"]);
    }

    #[test]
    fn test_segment_count_matches_marker_count() {
        for n in 0..8 {
            let mut doc = String::from("<TABLE>");
            for i in 0..n {
                doc.push_str(RESTAURANT_CELL);
                doc.push_str(&format!("restaurant {}</TD>", i));
            }
            let segments = split_segments(&doc);
            assert_eq!(segments.len(), n);
            if n > 0 {
                assert_eq!(segments[n - 1], format!("restaurant {}</TD>", n - 1));
            }
        }
    }

    #[test]
    fn test_marker_match_is_exact() {
        let lowercase = RESTAURANT_CELL.to_lowercase();
        assert!(split_segments(&format!("x{}y", lowercase)).is_empty());
    }
}
