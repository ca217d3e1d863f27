//! End-to-end `format` keyword coverage, exercised through schemas rather
//! than the predicate functions directly.
use jsonvet::Draft;
use serde_json::json;
use test_case::test_case;

/// Formats available in draft 7, where `format` asserts by default.
fn check_draft7(format: &str, value: &str, expected: bool) {
    let schema = json!({"format": format});
    assert_eq!(
        jsonvet::is_valid(&json!(value), &schema, Some(Draft::Draft7)),
        expected,
        "{value:?} as {format}"
    );
}

/// 2019-09+ formats need the assertion opt-in.
fn check_2020(format: &str, value: &str, expected: bool) {
    let schema = json!({"format": format});
    let options = jsonvet::options()
        .with_draft(Draft::Draft202012)
        .should_validate_formats(true);
    assert_eq!(
        options.is_valid(&json!(value), &schema),
        expected,
        "{value:?} as {format}"
    );
}

#[test_case("1985-04-12", true)]
#[test_case("2000-02-29", true; "leap year 2000")]
#[test_case("1900-02-29", false; "not a leap year 1900")]
#[test_case("1985-04-31", false; "day out of range")]
#[test_case("1985-13-01", false; "month out of range")]
#[test_case("85-04-12", false; "missing century")]
#[test_case("1985-102", false; "ordinal form")]
fn date(value: &str, expected: bool) {
    check_draft7("date", value, expected);
}

#[test_case("23:20:50.52Z", true)]
#[test_case("08:30:06+08:00", true; "positive offset")]
#[test_case("23:59:60Z", true; "leap second utc")]
#[test_case("15:59:60-08:00", true; "leap second in another zone")]
#[test_case("23:59:60+01:00", false; "leap second at the wrong utc minute")]
#[test_case("08:30:06", false; "missing offset")]
#[test_case("24:00:00Z", false; "hour out of range")]
#[test_case("08:30:06 PST", false; "named zone")]
fn time(value: &str, expected: bool) {
    check_draft7("time", value, expected);
}

#[test_case("1985-04-12T23:20:50.52Z", true)]
#[test_case("1996-12-19t16:39:57-08:00", true; "lowercase t")]
#[test_case("1990-02-31T15:59:59-08:00", false; "invalid day")]
#[test_case("1985-04-12", false; "date only")]
#[test_case("1985-04-12 23:20:50Z", false; "space separator")]
fn date_time(value: &str, expected: bool) {
    check_draft7("date-time", value, expected);
}

#[test_case("P4DT12H30M5S", true)]
#[test_case("PT0.5S", true; "fractional seconds")]
#[test_case("P2W", true; "weeks")]
#[test_case("P", false; "bare designator")]
#[test_case("PT", false; "dangling time designator")]
#[test_case("P1D2H", false; "time units without separator")]
fn duration(value: &str, expected: bool) {
    check_2020("duration", value, expected);
}

#[test_case("joe.bloggs@example.com", true)]
#[test_case("\"quoted local\"@example.com", true; "quoted local part")]
#[test_case("joe..bloggs@example.com", false; "consecutive dots")]
#[test_case("joe@bloggs@example.com", false; "two at signs")]
#[test_case("joe@[127.0.0.1]", false; "address literal")]
fn email(value: &str, expected: bool) {
    check_draft7("email", value, expected);
}

#[test_case("실례@실례.테스트", true; "hangul address")]
#[test_case("joe@example.com", true; "ascii still works")]
#[test_case("2962", false; "bare numeric string")]
fn idn_email(value: &str, expected: bool) {
    check_draft7("idn-email", value, expected);
}

#[test_case("www.example.com", true)]
#[test_case("xn--4gbwdl.xn--wgbh1c", true; "punycode labels")]
#[test_case("-a-host-name-that-starts-with--", false; "leading hyphen")]
#[test_case("not_a_valid_host_name", false; "underscores")]
#[test_case(".example.com", false; "leading dot")]
fn hostname(value: &str, expected: bool) {
    check_draft7("hostname", value, expected);
}

#[test_case("실례.테스트", true; "hangul labels")]
#[test_case("l·l", true; "middle dot between ls")]
#[test_case("a·b", false; "middle dot elsewhere")]
#[test_case("〮실례.테스트", false; "leading tone mark")]
#[test_case("ßçœ.example", true; "latin extended")]
fn idn_hostname(value: &str, expected: bool) {
    check_draft7("idn-hostname", value, expected);
}

#[test_case("192.168.0.1", true)]
#[test_case("127.0.0.0.1", false; "five octets")]
#[test_case("087.10.10.10", false; "leading zero")]
fn ipv4(value: &str, expected: bool) {
    check_draft7("ipv4", value, expected);
}

#[test_case("::42:ff:1", true)]
#[test_case("::ffff:192.168.0.1", true; "mixed notation")]
#[test_case("12345::", false; "group too long")]
#[test_case("1:1:1:1:1:1:1:1:1", false; "too many groups")]
#[test_case("fe80::a%eth1", false; "zone id")]
fn ipv6(value: &str, expected: bool) {
    check_draft7("ipv6", value, expected);
}

#[test_case("http://example.com/path#frag", true)]
#[test_case("urn:ietf:rfc:2648", true; "urn scheme")]
#[test_case("//example.com", false; "missing scheme")]
#[test_case("http://example com", false; "space in authority")]
#[test_case("3to://example.com", false; "digit-first scheme")]
fn uri(value: &str, expected: bool) {
    check_draft7("uri", value, expected);
}

#[test_case("", true; "empty reference")]
#[test_case("relative/path", true)]
#[test_case("#frag", true; "bare fragment")]
#[test_case("\\\\share\\file", false; "backslashes")]
fn uri_reference(value: &str, expected: bool) {
    check_draft7("uri-reference", value, expected);
}

#[test_case("http://ƒøø.example/βλog", true; "non-ascii")]
#[test_case("ƒøø.example", false; "missing scheme stays invalid")]
fn iri(value: &str, expected: bool) {
    check_draft7("iri", value, expected);
}

#[test_case("http://example.com/dictionary/{term:1}/{term}", true)]
#[test_case("http://example.com/search{?q,lang}", true; "query expansion")]
#[test_case("http://example.com/dictionary/{term:1}/{term", false; "unbalanced")]
#[test_case("{bad-name}", false; "hyphenated variable")]
fn uri_template(value: &str, expected: bool) {
    check_draft7("uri-template", value, expected);
}

#[test_case("/foo/bar~0/baz~1/%a", true)]
#[test_case("", true; "whole document")]
#[test_case("/foo/bar~", false; "dangling tilde")]
#[test_case("#/foo", false; "fragment form")]
fn json_pointer(value: &str, expected: bool) {
    check_draft7("json-pointer", value, expected);
}

#[test_case("1", true)]
#[test_case("0#", true; "hash form")]
#[test_case("1/0/a", true; "with pointer")]
#[test_case("-1/0", false; "negative prefix")]
#[test_case("01/a", false; "leading zero")]
fn relative_json_pointer(value: &str, expected: bool) {
    check_draft7("relative-json-pointer", value, expected);
}

#[test_case("([abc])+\\s+$", true)]
#[test_case("^(abc]", false; "unbalanced class")]
fn regex(value: &str, expected: bool) {
    check_draft7("regex", value, expected);
}

#[test_case("2EB8AA08-AA98-11EA-B4AA-73B441D16380", true; "upper case")]
#[test_case("2eb8aa08-aa98-11ea-b4aa-73b441d16380", true; "lower case")]
#[test_case("2eb8aa08-aa98-11ea-73b441d16380", false; "too few groups")]
#[test_case("urn:uuid:2eb8aa08-aa98-11ea-b4aa-73b441d16380", false; "urn form")]
fn uuid(value: &str, expected: bool) {
    check_2020("uuid", value, expected);
}

#[test]
fn non_string_instances_are_ignored() {
    for format in ["date", "email", "hostname", "ipv4", "uri", "regex"] {
        let schema = json!({"format": format});
        for instance in [json!(12), json!(13.7), json!({}), json!([]), json!(false), json!(null)]
        {
            assert!(
                jsonvet::is_valid(&instance, &schema, Some(Draft::Draft7)),
                "{instance} should pass {format}"
            );
        }
    }
}

#[test]
fn formats_unknown_to_a_draft_are_annotations() {
    // `uuid` arrived in 2019-09; draft 7 treats it as an unknown format.
    let schema = json!({"format": "uuid"});
    assert!(jsonvet::is_valid(&json!("not a uuid"), &schema, Some(Draft::Draft7)));
}

#[test]
fn format_assertion_can_be_disabled_everywhere() {
    let options = jsonvet::options()
        .with_draft(Draft::Draft7)
        .should_validate_formats(false);
    assert!(options.is_valid(&json!("not-an-email"), &json!({"format": "email"})));
}
