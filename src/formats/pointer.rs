//! RFC 6901 JSON Pointer and relative JSON Pointer string formats.
use once_cell::sync::Lazy;
use regex::Regex;

static JSON_POINTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:/(?:[^/~]|~[01])*)*\z").expect("is a valid regex"));
static RELATIVE_JSON_POINTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0|[1-9][0-9]*)(?:#|(?:/(?:[^/~]|~[01])*)*)\z").expect("is a valid regex")
});

pub(crate) fn is_valid_json_pointer(value: &str) -> bool {
    JSON_POINTER_RE.is_match(value)
}

pub(crate) fn is_valid_relative_json_pointer(value: &str) -> bool {
    RELATIVE_JSON_POINTER_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    #[test_case("", true; "empty pointer")]
    #[test_case("/foo", true)]
    #[test_case("/foo/0", true)]
    #[test_case("/", true; "empty token")]
    #[test_case("/a~0b", true; "tilde escape")]
    #[test_case("/a~1b", true; "slash escape")]
    #[test_case("/~01", true; "escaped tilde followed by digit")]
    #[test_case("foo", false; "missing leading slash")]
    #[test_case("#/foo", false; "uri fragment form")]
    #[test_case("/a~b", false; "bare tilde")]
    #[test_case("/a~2b", false; "invalid escape digit")]
    #[test_case("/a~", false; "trailing tilde")]
    fn json_pointer(value: &str, expected: bool) {
        assert_eq!(super::is_valid_json_pointer(value), expected);
    }

    #[test_case("0", true; "zero")]
    #[test_case("1", true; "one")]
    #[test_case("0#", true; "zero with hash")]
    #[test_case("12/foo", true; "offset with pointer")]
    #[test_case("0/a~1b", true; "offset with escaped pointer")]
    #[test_case("-1", false; "negative")]
    #[test_case("+1", false; "explicit plus sign")]
    #[test_case("01", false; "leading zero")]
    #[test_case("0##", false; "double hash")]
    #[test_case("0#/foo", false; "hash followed by pointer")]
    #[test_case("#", false; "hash only")]
    #[test_case("", false; "empty")]
    fn relative_json_pointer(value: &str, expected: bool) {
        assert_eq!(super::is_valid_relative_json_pointer(value), expected);
    }
}
