//! `contentEncoding` / `contentMediaType` checks.
//!
//! These keywords assert in drafts 6 and 7 and degrade to annotations from
//! 2019-09 on. Unknown encodings and media types are accepted.
use base64::{engine::general_purpose::STANDARD, Engine as _};

pub(crate) fn is_base64(value: &str) -> bool {
    STANDARD.decode(value).is_ok()
}

pub(crate) fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// Decode for combined `contentEncoding` + `contentMediaType` checks.
pub(crate) fn decode_base64(value: &str) -> Option<String> {
    let bytes = STANDARD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}
