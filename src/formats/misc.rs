//! UUID and regex formats.
use crate::ecma;
use uuid_simd::{parse_hyphenated, Out};

/// Hyphenated 8-4-4-4-12 hex form only; URN prefixes, braces and other
/// layouts the `uuid` ecosystem tolerates are rejected here.
pub(crate) fn is_valid_uuid(value: &str) -> bool {
    let mut out = [0; 16];
    parse_hyphenated(value.as_bytes(), Out::from_mut(&mut out)).is_ok()
}

pub(crate) fn is_valid_regex(value: &str) -> bool {
    ecma::compile(value).is_ok()
}
