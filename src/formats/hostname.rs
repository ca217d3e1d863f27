//! Hostname validation: RFC 1123 LDH rules plus the IDNA2008 contextual
//! rules needed for internationalized hostnames.
use idna::punycode;

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// ASCII hostname: labels of letters, digits and interior hyphens, each
/// 1-63 octets, 253 octets overall. `xn--` labels must round-trip through
/// Punycode; any other label with `--` in positions 3-4 is reserved and
/// rejected.
pub(crate) fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LENGTH || !hostname.is_ascii() {
        return false;
    }
    hostname.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }
    if !label
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-')
    {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    if label.len() >= 4 && &label[2..4] == "--" {
        let lower = label.to_ascii_lowercase();
        let Some(encoded) = lower.strip_prefix("xn--") else {
            return false;
        };
        return punycode_round_trips(encoded);
    }
    true
}

fn punycode_round_trips(encoded: &str) -> bool {
    match punycode::decode_to_string(encoded) {
        Some(decoded) if !decoded.is_empty() => punycode::encode_str(&decoded)
            .is_some_and(|reencoded| reencoded.eq_ignore_ascii_case(encoded)),
        _ => false,
    }
}

/// Internationalized hostname: per-label IDNA2008 contextual rules, with
/// `xn--` labels checked in their decoded form.
pub(crate) fn is_valid_idn_hostname(hostname: &str) -> bool {
    if hostname.is_empty() {
        return false;
    }
    // Only the ASCII full stop separates labels; U+3002 etc. are mapped away
    // by IDNA before validation and are not accepted verbatim.
    for label in hostname.split('.') {
        if label.is_empty() {
            return false;
        }
        let lower = label.to_lowercase();
        if let Some(encoded) = lower.strip_prefix("xn--") {
            if !lower.is_ascii() || !punycode_round_trips(encoded) {
                return false;
            }
            match punycode::decode_to_string(encoded) {
                Some(decoded) => {
                    if !is_valid_unicode_label(&decoded) {
                        return false;
                    }
                }
                None => return false,
            }
        } else if label.is_ascii() {
            if !is_valid_label(label) {
                return false;
            }
        } else if !is_valid_unicode_label(label) {
            return false;
        }
    }
    // The Punycode-encoded form still has to fit DNS limits.
    encoded_length(hostname).map_or(false, |length| length <= MAX_HOSTNAME_LENGTH)
}

fn encoded_length(hostname: &str) -> Option<usize> {
    let mut total = 0;
    for (index, label) in hostname.split('.').enumerate() {
        if index > 0 {
            total += 1;
        }
        let length = if label.is_ascii() {
            label.len()
        } else {
            // "xn--" plus the Punycode form.
            4 + punycode::encode_str(label)?.len()
        };
        if length > MAX_LABEL_LENGTH {
            return None;
        }
        total += length;
    }
    Some(total)
}

fn is_valid_unicode_label(label: &str) -> bool {
    let chars: Vec<char> = label.chars().collect();
    if chars.is_empty() {
        return false;
    }
    if chars[0] == '-' || chars[chars.len() - 1] == '-' {
        return false;
    }
    if chars.len() >= 4 && chars[2] == '-' && chars[3] == '-' {
        return false;
    }

    let mut has_arabic_indic = false;
    let mut has_extended_arabic_indic = false;

    for (index, &ch) in chars.iter().enumerate() {
        match ch {
            // ARABIC TATWEEL and NKO LAJANYALAN have no place in hostnames.
            '\u{0640}' | '\u{07FA}' => return false,
            // Vertical kana repeat marks and the masu mark.
            '\u{3031}'..='\u{3035}' | '\u{303B}' => return false,
            // MIDDLE DOT: only between two lowercase 'l'.
            '\u{00B7}' => {
                let before = index.checked_sub(1).and_then(|i| chars.get(i));
                let after = chars.get(index + 1);
                if before != Some(&'l') || after != Some(&'l') {
                    return false;
                }
            }
            // GREEK LOWER NUMERAL SIGN (KERAIA): must precede Greek.
            '\u{0375}' => {
                if !chars.get(index + 1).copied().is_some_and(is_greek) {
                    return false;
                }
            }
            // HEBREW GERESH and GERSHAYIM: must follow Hebrew.
            '\u{05F3}' | '\u{05F4}' => {
                let before = index.checked_sub(1).and_then(|i| chars.get(i));
                if !before.copied().is_some_and(is_hebrew) {
                    return false;
                }
            }
            // KATAKANA MIDDLE DOT: the label must contain Japanese script.
            '\u{30FB}' => {
                if !chars
                    .iter()
                    .any(|&c| c != '\u{30FB}' && (is_hiragana(c) || is_katakana(c) || is_han(c)))
                {
                    return false;
                }
            }
            // HANGUL single/double dot tone marks: only after Hangul.
            '\u{302E}' | '\u{302F}' => {
                let before = index.checked_sub(1).and_then(|i| chars.get(i));
                if !before.copied().is_some_and(is_hangul) {
                    return false;
                }
            }
            '\u{0660}'..='\u{0669}' => has_arabic_indic = true,
            '\u{06F0}'..='\u{06F9}' => has_extended_arabic_indic = true,
            _ => {
                if ch.is_ascii() {
                    if !ch.is_ascii_alphanumeric() && ch != '-' {
                        return false;
                    }
                } else if !ch.is_alphanumeric() && !is_combining_mark(ch) {
                    return false;
                }
            }
        }
    }
    // Arabic-Indic and Extended Arabic-Indic digits must not mix.
    !(has_arabic_indic && has_extended_arabic_indic)
}

fn is_greek(ch: char) -> bool {
    matches!(ch, '\u{0370}'..='\u{03FF}' | '\u{1F00}'..='\u{1FFF}')
}

fn is_hebrew(ch: char) -> bool {
    matches!(ch, '\u{0590}'..='\u{05FF}')
}

fn is_hiragana(ch: char) -> bool {
    matches!(ch, '\u{3041}'..='\u{309F}')
}

fn is_katakana(ch: char) -> bool {
    matches!(ch, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}')
}

fn is_han(ch: char) -> bool {
    matches!(
        ch,
        '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}' | '\u{F900}'..='\u{FAFF}' | '\u{20000}'..='\u{2A6DF}'
    )
}

fn is_hangul(ch: char) -> bool {
    matches!(
        ch,
        '\u{1100}'..='\u{11FF}' | '\u{A960}'..='\u{A97F}' | '\u{D7B0}'..='\u{D7FF}' | '\u{AC00}'..='\u{D7A3}'
    )
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036F}' | '\u{0591}'..='\u{05C7}' | '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}' | '\u{0900}'..='\u{0903}' | '\u{093A}'..='\u{094F}' | '\u{0E31}' | '\u{0E34}'..='\u{0E3A}' | '\u{0E47}'..='\u{0E4E}'
    )
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    #[test_case("example.com", true)]
    #[test_case("EXAMPLE.COM", true; "uppercase")]
    #[test_case("localhost", true)]
    #[test_case("a.b.c.d", true)]
    #[test_case("sub-domain.example.com", true; "interior hyphen")]
    #[test_case("xn--nxasmq6b.example", true; "punycode label")]
    #[test_case("", false; "empty")]
    #[test_case("-example.com", false; "leading hyphen")]
    #[test_case("example-.com", false; "trailing hyphen")]
    #[test_case(".example.com", false; "leading dot")]
    #[test_case("example..com", false; "empty label")]
    #[test_case("exa_mple.com", false; "underscore")]
    #[test_case("ab--cd.example", false; "reserved double dash")]
    #[test_case("xn--999999999.example", false; "invalid punycode")]
    #[test_case("exämple.com", false; "non-ascii")]
    #[test_case("example。com", false; "fullwidth separator")]
    fn hostname(value: &str, expected: bool) {
        assert_eq!(super::is_valid_hostname(value), expected);
    }

    #[test]
    fn hostname_length_limits() {
        let label = "a".repeat(63);
        assert!(super::is_valid_hostname(&label));
        assert!(!super::is_valid_hostname(&"a".repeat(64)));
        let host = [label.as_str(); 4].join(".");
        assert!(!super::is_valid_hostname(&host), "255 octets total");
    }

    #[test_case("실례.테스트", true; "hangul syllables")]
    #[test_case("βόλος.com", true; "greek")]
    #[test_case("ドメイン.テスト", true; "katakana")]
    #[test_case("example.com", true; "plain ascii")]
    #[test_case("l·l", true; "middle dot between l")]
    #[test_case("a·l", false; "middle dot after other letter")]
    #[test_case("l·", false; "middle dot at the end")]
    #[test_case("·ll", false; "middle dot at the start")]
    #[test_case("α͵β", true; "keraia before greek")]
    #[test_case("͵a", false; "keraia before latin")]
    #[test_case("א׳ב", true; "geresh after hebrew")]
    #[test_case("a׳b", false; "geresh after latin")]
    #[test_case("א״ב", true; "gershayim after hebrew")]
    #[test_case("a״b", false; "gershayim after latin")]
    #[test_case("テ・スト", true; "katakana middle dot with katakana")]
    #[test_case("abc・def", false; "katakana middle dot without japanese")]
    #[test_case("・", false; "katakana middle dot alone")]
    #[test_case("\u{0640}", false; "tatweel")]
    #[test_case("\u{07FA}", false; "nko lajanyalan")]
    #[test_case("〱ab", false; "vertical kana repeat mark")]
    #[test_case("〻ab", false; "masu mark")]
    #[test_case("١٢٣", true; "arabic-indic digits")]
    #[test_case("۱۲۳", true; "extended arabic-indic digits")]
    #[test_case("١۲", false; "mixed arabic digit sets")]
    #[test_case("", false; "idn empty")]
    #[test_case("a..b", false; "idn empty label")]
    fn idn_hostname(value: &str, expected: bool) {
        assert_eq!(super::is_valid_idn_hostname(value), expected);
    }

    #[test]
    fn hangul_tone_marks_require_hangul() {
        assert!(!super::is_valid_idn_hostname("a\u{302E}b"));
        assert!(super::is_valid_idn_hostname("\u{1100}\u{302E}"));
    }
}
