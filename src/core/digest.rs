use crate::domain::model::WeekMenu;
use crate::utils::error::Result;
use md5::{Digest, Md5};

/// Extension appended to the menu path for the digest sidecar.
pub const DIGEST_SUFFIX: &str = ".md5";

/// The menu document as written to disk, with the digest of those bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedMenu {
    pub json: Vec<u8>,
    pub digest: String,
}

/// Pretty-printed JSON in declaration order, so equal weeks give equal bytes.
pub fn to_canonical_json(week: &WeekMenu) -> Result<Vec<u8>> {
    week.check_invariants()?;
    Ok(serde_json::to_vec_pretty(week)?)
}

/// Lowercase hex MD5 of `bytes`.
pub fn content_digest(bytes: &[u8]) -> String {
    format!("{:x}", Md5::digest(bytes))
}

pub fn serialize_week(week: &WeekMenu) -> Result<SerializedMenu> {
    let json = to_canonical_json(week)?;
    let digest = content_digest(&json);
    Ok(SerializedMenu { json, digest })
}

pub fn digest_path(output_path: &str) -> String {
    format!("{}{}", output_path, DIGEST_SUFFIX)
}
