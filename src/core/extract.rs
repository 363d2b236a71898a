use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Opens the menu cell: the menu text follows the 1x5 spacer image.
pub const MENU_OPEN: &str = r##"<TD WIDTH="311" VALIGN="TOP" BGCOLOR="#FFFFFF"><IMG SRC="../grafik/space.gif" BORDER=0 width="1" HEIGHT="5">"##;
pub const CELL_CLOSE: &str = "</TD>";

static IMAGE_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"SRC="([^"]+)""#).expect("image pattern is valid"));
static CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<center>(.+)</center>").expect("caption pattern is valid"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no image reference in segment")]
    MissingImageReference,

    #[error("no menu block in segment")]
    MissingMenuBlock,
}

/// Fields pulled out of one restaurant segment, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub image_reference: String,
    pub description: String,
    pub menu_text: String,
}

pub fn extract_fields(segment: &str) -> Result<ExtractedFields, ExtractError> {
    let image_reference = image_reference(segment).ok_or(ExtractError::MissingImageReference)?;
    let menu_text = menu_text(segment).ok_or(ExtractError::MissingMenuBlock)?;

    Ok(ExtractedFields {
        image_reference: image_reference.to_string(),
        description: description(segment),
        menu_text,
    })
}

/// First `SRC="..."` value in the segment, which is the restaurant logo.
pub fn image_reference(segment: &str) -> Option<&str> {
    IMAGE_SRC
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Caption under the logo with every tag replaced by a space. Empty when the
/// segment has no caption.
pub fn description(segment: &str) -> String {
    CAPTION
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| TAG.replace_all(m.as_str(), " ").trim().to_string())
        .unwrap_or_default()
}

/// Menu cell contents with list items turned into `* ` lines and line breaks
/// into newlines. Entities are left as they are.
pub fn menu_text(segment: &str) -> Option<String> {
    let (_, after_open) = segment.split_once(MENU_OPEN)?;
    let block = after_open
        .split_once(CELL_CLOSE)
        .map_or(after_open, |(block, _)| block);

    let menu = block
        .replace("<LI>", "* ")
        .replace("<BR>", "\n")
        .replace("<br/>", "\n");

    Some(menu.trim().to_string())
}
