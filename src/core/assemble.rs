use crate::core::extract::extract_fields;
use crate::core::resolver::NameTable;
use crate::core::segment::split_segments;
use crate::domain::model::{Assembly, DayDocument, DayMenu, Diagnostic, RestaurantEntry, WeekMenu, Weekday};
use crate::utils::error::Result;

/// Turns one fetched day page into its restaurant list.
///
/// Segments that cannot be extracted are left out; a logo missing from the
/// name table gives an empty name. Both are reported in `diagnostics`.
pub fn parse_day(
    day: Weekday,
    document: &[u8],
    names: &NameTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> DayMenu {
    let text = String::from_utf8_lossy(document);
    let mut menu = DayMenu::empty(day);

    for (position, segment) in split_segments(&text).into_iter().enumerate() {
        let fields = match extract_fields(segment) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("⚠️ {}: skipping restaurant #{}: {}", day, position + 1, e);
                diagnostics.push(Diagnostic::SegmentSkipped {
                    day,
                    position,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let name = match names.resolve(&fields.image_reference) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!(
                    "⚠️ Unable to match restaurant name to image {}, the name table needs updating",
                    fields.image_reference
                );
                diagnostics.push(Diagnostic::UnresolvedImage {
                    day,
                    image_reference: fields.image_reference.clone(),
                });
                String::new()
            }
        };

        menu.restaurants.push(RestaurantEntry {
            name,
            image_reference: fields.image_reference,
            description: fields.description,
            menu_text: fields.menu_text,
        });
    }

    tracing::debug!("{}: {} restaurants", day, menu.restaurants.len());
    menu
}

/// Builds a day from its fetch outcome; a failed fetch gives an empty day.
pub fn assemble_day(
    document: DayDocument,
    names: &NameTable,
    diagnostics: &mut Vec<Diagnostic>,
) -> DayMenu {
    match document.body {
        Ok(body) => parse_day(document.day, &body, names, diagnostics),
        Err(e) => {
            tracing::error!("❌ {}: {}", document.day, e);
            diagnostics.push(Diagnostic::FetchFailed {
                day: document.day,
                message: e.to_string(),
            });
            DayMenu::empty(document.day)
        }
    }
}

/// Places every day into its slot of a fresh week. Days without a document
/// stay empty, so the week always has five days.
pub fn assemble_week(
    city: &str,
    week_number: u32,
    documents: Vec<DayDocument>,
    names: &NameTable,
) -> Result<Assembly> {
    let mut week = WeekMenu::new(city, week_number);
    let mut diagnostics = Vec::new();

    for document in documents {
        let day = assemble_day(document, names, &mut diagnostics);
        week.set_day(day)?;
    }

    week.check_invariants()?;
    Ok(Assembly { week, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extract::MENU_OPEN;
    use crate::core::segment::RESTAURANT_CELL;
    use crate::utils::error::EtlError;

    fn restaurant(logo: &str, menu: &str) -> String {
        format!(
            r#"{}<IMG SRC="{}" BORDER=0></TD>{}{}</TD></TR>"#,
            RESTAURANT_CELL, logo, MENU_OPEN, menu
        )
    }

    fn page(restaurants: &[String]) -> Vec<u8> {
        format!("<HTML><BODY><TABLE>{}</TABLE></BODY></HTML>", restaurants.concat()).into_bytes()
    }

    #[test]
    fn test_known_and_unknown_restaurant() {
        let doc = page(&[
            restaurant("lunchlogo/koppis.gif", "<LI>Fiskgratäng"),
            restaurant("lunchlogo/brand-new.gif", "<LI>Tacos"),
        ]);
        let mut diagnostics = Vec::new();
        let day = parse_day(Weekday::Tisdag, &doc, &NameTable::builtin(), &mut diagnostics);

        assert_eq!(day.day_index, 1);
        assert_eq!(day.restaurants.len(), 2);
        assert_eq!(day.restaurants[0].name, "Restaurang Koppis");
        assert_eq!(day.restaurants[1].name, "");
        assert_eq!(day.restaurants[1].image_reference, "lunchlogo/brand-new.gif");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnresolvedImage {
                day: Weekday::Tisdag,
                image_reference: "lunchlogo/brand-new.gif".to_string(),
            }]
        );
    }

    #[test]
    fn test_restaurant_count_matches_segments() {
        let names = NameTable::builtin();
        for n in 0..6 {
            let restaurants: Vec<String> = (0..n)
                .map(|i| restaurant("lunchlogo/hammars.gif", &format!("<LI>Rätt {}", i)))
                .collect();
            let mut diagnostics = Vec::new();
            let day = parse_day(Weekday::Mandag, &page(&restaurants), &names, &mut diagnostics);

            assert_eq!(day.restaurants.len(), n);
            assert!(diagnostics.is_empty());
            for (i, entry) in day.restaurants.iter().enumerate() {
                assert_eq!(entry.menu_text, format!("* Rätt {}", i));
            }
        }
    }

    #[test]
    fn test_broken_segment_does_not_stop_siblings() {
        let broken = format!("{}<B>Stängt idag</B></TD>", RESTAURANT_CELL);
        let doc = page(&[
            restaurant("lunchlogo/liljan.gif", "<LI>Pannbiff"),
            broken,
            restaurant("lunchlogo/subway.gif", "<LI>Sub"),
        ]);
        let mut diagnostics = Vec::new();
        let day = parse_day(Weekday::Fredag, &doc, &NameTable::builtin(), &mut diagnostics);

        let names: Vec<&str> = day.restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Restaurang Liljan", "Subway"]);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            Diagnostic::SegmentSkipped { day: Weekday::Fredag, position: 1, .. }
        ));
    }

    #[test]
    fn test_failed_fetch_gives_empty_day() {
        let mut diagnostics = Vec::new();
        let failed = DayDocument::failed(
            Weekday::Onsdag,
            EtlError::FetchError {
                day: "Onsdag".to_string(),
                message: "HTTP 503".to_string(),
            },
        );
        let day = assemble_day(failed, &NameTable::builtin(), &mut diagnostics);

        assert_eq!(day, DayMenu::empty(Weekday::Onsdag));
        assert!(matches!(&diagnostics[0], Diagnostic::FetchFailed { day: Weekday::Onsdag, .. }));
    }

    #[test]
    fn test_week_keeps_five_days_when_some_fail() {
        let names = NameTable::builtin();
        let documents = Weekday::ALL
            .iter()
            .map(|day| {
                if *day == Weekday::Torsdag {
                    DayDocument::failed(
                        *day,
                        EtlError::TimeoutError {
                            day: day.to_string(),
                            seconds: 1,
                        },
                    )
                } else {
                    DayDocument::fetched(*day, page(&[restaurant("lunchlogo/ah.gif", "<LI>Lax")]))
                }
            })
            .collect();

        let assembly = assemble_week("Falun", 33, documents, &names).unwrap();
        let week = assembly.week;

        assert_eq!(week.days.len(), 5);
        assert_eq!(week.days[3].weekday_name, "Torsdag");
        assert!(week.days[3].restaurants.is_empty());
        for index in [0, 1, 2, 4] {
            assert_eq!(week.days[index].restaurants.len(), 1);
            assert_eq!(week.days[index].restaurants[0].name, "&Aring;h");
        }
        assert_eq!(assembly.diagnostics.len(), 1);
    }

    #[test]
    fn test_week_without_documents() {
        let assembly = assemble_week("Mora", 2, Vec::new(), &NameTable::builtin()).unwrap();
        assert_eq!(assembly.week, WeekMenu::new("Mora", 2));
        assert!(assembly.diagnostics.is_empty());
    }

    #[test]
    fn test_unresolved_images_are_deduplicated() {
        let doc = page(&[restaurant("lunchlogo/okand.gif", "<LI>Soppa")]);
        let documents = vec![
            DayDocument::fetched(Weekday::Mandag, doc.clone()),
            DayDocument::fetched(Weekday::Tisdag, doc),
        ];
        let assembly = assemble_week("Falun", 5, documents, &NameTable::builtin()).unwrap();
        assert_eq!(assembly.diagnostics.len(), 2);
        assert_eq!(assembly.unresolved_images(), vec!["lunchlogo/okand.gif"]);
    }
}
