//! Email address formats.
use super::hostname::{is_valid_hostname, is_valid_idn_hostname};
use email_address::EmailAddress;
use std::str::FromStr;

/// Practical RFC 5321/5322 subset: the address must parse (which covers
/// quoted local parts and dot placement) and the domain must be a valid
/// hostname. Domain literals such as `[127.0.0.1]` are rejected.
pub(crate) fn is_valid_email(value: &str) -> bool {
    match EmailAddress::from_str(value) {
        Ok(parsed) => {
            let domain = parsed.domain();
            if domain.starts_with('[') {
                return false;
            }
            is_valid_hostname(domain)
        }
        Err(_) => false,
    }
}

/// Internationalized form: Unicode is allowed in both the local part and
/// the domain, which must be a valid IDN hostname.
pub(crate) fn is_valid_idn_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if !is_valid_local_part(local) {
        return false;
    }
    if domain.starts_with('[') {
        return false;
    }
    is_valid_idn_hostname(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if let Some(quoted) = local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return !quoted.is_empty();
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|ch| {
        !ch.is_ascii()
            || ch.is_ascii_alphanumeric()
            || matches!(
                ch,
                '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '/' | '='
                    | '?' | '^' | '_' | '`' | '{' | '|' | '}' | '~' | '.'
            )
    })
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    #[test_case("joe.bloggs@example.com", true)]
    #[test_case("te~st@example.com", true; "tilde in local part")]
    #[test_case("~test@example.com", true; "leading tilde")]
    #[test_case("test~@example.com", true; "trailing tilde")]
    #[test_case("\"joe bloggs\"@example.com", true; "quoted local part with space")]
    #[test_case("\"joe..bloggs\"@example.com", true; "quoted local part with dots")]
    #[test_case(".test@example.com", false; "leading dot")]
    #[test_case("test.@example.com", false; "trailing dot")]
    #[test_case("te..st@example.com", false; "consecutive dots")]
    #[test_case("joe@bloggs@example.com", false; "multiple at signs")]
    #[test_case("joe.bloggs@[127.0.0.1]", false; "ipv4 literal domain")]
    #[test_case("joe.bloggs@[IPv6:::1]", false; "ipv6 literal domain")]
    #[test_case("joe.bloggs", false; "missing at sign")]
    #[test_case("@example.com", false; "empty local part")]
    #[test_case("joe@", false; "empty domain")]
    fn email(value: &str, expected: bool) {
        assert_eq!(super::is_valid_email(value), expected);
    }

    #[test_case("실례@실례.테스트", true; "unicode local and domain")]
    #[test_case("joe.bloggs@example.com", true; "plain ascii works too")]
    #[test_case("\"quoted\"@example.com", true; "quoted local part")]
    #[test_case("1234", false; "bare numeric string")]
    #[test_case("", false; "empty")]
    #[test_case("@example.com", false; "missing local part")]
    #[test_case("joe@", false; "missing domain")]
    #[test_case("joe@[127.0.0.1]", false; "domain literal")]
    fn idn_email(value: &str, expected: bool) {
        assert_eq!(super::is_valid_idn_email(value), expected);
    }
}
