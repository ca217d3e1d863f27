//! RFC 3986 URI / RFC 3987 IRI reference checking and RFC 6570 URI
//! templates.
//!
//! The checker walks the reference by component. It enforces the rules the
//! URL-normalizing parsers relax: schemes must start with a letter, the
//! characters `<>"{}|\^` and backtick (and raw spaces and controls) are
//! forbidden everywhere, square brackets are only valid around an IPv6
//! literal in the authority, and percent signs must start a two-digit hex
//! escape. Non-ASCII characters are what separate the IRI forms from the
//! URI forms.
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::Ipv6Addr;
use std::str::FromStr;

pub(crate) fn is_valid_uri(value: &str) -> bool {
    check_reference(value, Mode::Uri, true)
}

pub(crate) fn is_valid_uri_reference(value: &str) -> bool {
    check_reference(value, Mode::Uri, false)
}

pub(crate) fn is_valid_iri(value: &str) -> bool {
    check_reference(value, Mode::Iri, true)
}

pub(crate) fn is_valid_iri_reference(value: &str) -> bool {
    check_reference(value, Mode::Iri, false)
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Uri,
    Iri,
}

fn check_reference(value: &str, mode: Mode, require_scheme: bool) -> bool {
    if value.is_empty() {
        // An empty relative reference is valid; an absolute URI is not.
        return !require_scheme;
    }
    if value.chars().any(|ch| is_forbidden(ch, mode)) {
        return false;
    }

    // Fragment is everything past the first '#'.
    let (rest, fragment) = match value.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (value, None),
    };
    if let Some(fragment) = fragment {
        if !check_component(fragment, "/?:@", mode) {
            return false;
        }
    }
    let (rest, query) = match rest.split_once('?') {
        Some((rest, query)) => (rest, Some(query)),
        None => (rest, None),
    };
    if let Some(query) = query {
        if !check_component(query, "/?:@", mode) {
            return false;
        }
    }

    // Scheme, when present, ends at the first ':' that appears before any
    // '/'. Relative references simply have none.
    let rest = match split_scheme(rest) {
        SchemeSplit::Found(scheme, rest) => {
            if !is_valid_scheme(scheme) {
                return false;
            }
            rest
        }
        SchemeSplit::None(rest) => {
            if require_scheme {
                return false;
            }
            rest
        }
        SchemeSplit::Invalid => return false,
    };

    let path = if let Some(after) = rest.strip_prefix("//") {
        let (authority, path) = match after.find('/') {
            Some(idx) => (&after[..idx], &after[idx..]),
            None => (after, ""),
        };
        if !check_authority(authority, mode) {
            return false;
        }
        path
    } else {
        rest
    };
    // Brackets are only meaningful in the authority.
    if path.contains('[') || path.contains(']') {
        return false;
    }
    check_component(path, "/:@", mode)
}

enum SchemeSplit<'a> {
    Found(&'a str, &'a str),
    None(&'a str),
    Invalid,
}

fn split_scheme(value: &str) -> SchemeSplit<'_> {
    for (idx, ch) in value.char_indices() {
        match ch {
            ':' => {
                if idx == 0 {
                    return SchemeSplit::Invalid;
                }
                return SchemeSplit::Found(&value[..idx], &value[idx + 1..]);
            }
            '/' => return SchemeSplit::None(value),
            _ => {}
        }
    }
    SchemeSplit::None(value)
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut bytes = scheme.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() => bytes
            .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.')),
        _ => false,
    }
}

fn check_authority(authority: &str, mode: Mode) -> bool {
    // userinfo@host:port; the last '@' separates userinfo from the host.
    let (userinfo, host_port) = match authority.rsplit_once('@') {
        Some((userinfo, host_port)) => (Some(userinfo), host_port),
        None => (None, authority),
    };
    if let Some(userinfo) = userinfo {
        if !check_component(userinfo, ":", mode) {
            return false;
        }
    }
    if let Some(after_bracket) = host_port.strip_prefix('[') {
        // IP literal; colons inside the brackets belong to the address.
        let Some((literal, port)) = after_bracket.split_once(']') else {
            return false;
        };
        if Ipv6Addr::from_str(literal).is_err() && !is_ip_vfuture(literal) {
            return false;
        }
        match port.strip_prefix(':') {
            Some(port) => port.bytes().all(|byte| byte.is_ascii_digit()),
            None => port.is_empty(),
        }
    } else {
        if host_port.contains(']') {
            return false;
        }
        let (host, port) = match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        };
        if let Some(port) = port {
            if !port.bytes().all(|byte| byte.is_ascii_digit()) {
                return false;
            }
        }
        // A bare colon in the host would have been split off as a port;
        // any remaining one is misplaced.
        check_component(host, "", mode)
    }
}

fn is_ip_vfuture(literal: &str) -> bool {
    let Some(rest) = literal.strip_prefix('v').or_else(|| literal.strip_prefix('V')) else {
        return false;
    };
    let Some((version, address)) = rest.split_once('.') else {
        return false;
    };
    !version.is_empty()
        && version.bytes().all(|byte| byte.is_ascii_hexdigit())
        && !address.is_empty()
        && address
            .bytes()
            .all(|byte| is_unreserved(byte) || is_sub_delim(byte) || byte == b':')
}

/// Validate one component: unreserved characters, sub-delimiters,
/// percent-escapes, the component's own extra characters, and (for IRIs)
/// any non-ASCII character.
fn check_component(component: &str, extra: &str, mode: Mode) -> bool {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
            continue;
        }
        if byte.is_ascii() {
            if !(is_unreserved(byte) || is_sub_delim(byte) || extra.as_bytes().contains(&byte)) {
                return false;
            }
            i += 1;
        } else {
            if mode == Mode::Uri {
                return false;
            }
            // Skip over the full UTF-8 sequence.
            let ch_len = component[i..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            i += ch_len;
        }
    }
    true
}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

fn is_sub_delim(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

fn is_forbidden(ch: char, mode: Mode) -> bool {
    match ch {
        '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`' | ' ' => true,
        _ if (ch as u32) < 0x20 || ch == '\u{7f}' => true,
        _ => mode == Mode::Uri && !ch.is_ascii(),
    }
}

static URI_TEMPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"^(?:[^\x00-\x20"'<>%\\^`{|}\x7f]"#,
        r"|%[0-9A-Fa-f]{2}",
        r"|\{[+#./;?&=!@|]?",
        r"(?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2})(?:\.?(?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2}))*",
        r"(?::[1-9][0-9]{0,3}|\*)?",
        r"(?:,(?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2})(?:\.?(?:[A-Za-z0-9_]|%[0-9A-Fa-f]{2}))*",
        r"(?::[1-9][0-9]{0,3}|\*)?",
        r")*})*\z",
    ))
    .expect("is a valid regex")
});

pub(crate) fn is_valid_uri_template(value: &str) -> bool {
    URI_TEMPLATE_RE.is_match(value)
}
