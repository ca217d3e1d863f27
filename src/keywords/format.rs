//! The `format` keyword.
//!
//! Whether `format` asserts depends on the draft and the active
//! vocabularies: drafts 4-7 assert by default, 2019-09 and 2020-12 only
//! annotate unless a format(-assertion) vocabulary is active or the caller
//! opted in. Unknown formats are accepted silently unless the caller turned
//! that off. Non-string instances always pass.
use crate::{error::ValidationError, formats, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_format(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(format_value) = map.get("format") else {
            return true;
        };
        if !self.keyword_enabled("format") || !self.assert_formats {
            return true;
        }
        self.push_schema("format");
        let valid = match format_value {
            Value::String(format) => self.check_format(format, instance),
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`format` must be a string",
            )),
        };
        self.pop_schema();
        valid
    }

    fn check_format(&mut self, format: &str, instance: &Value) -> bool {
        let Value::String(item) = instance else {
            return true;
        };
        if let Some(check) = formats::get(format) {
            if check(item) {
                return true;
            }
            return self.record(ValidationError::format(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                format,
            ));
        }
        match formats::built_in(format, self.draft) {
            Some(check) => {
                if check(item) {
                    true
                } else {
                    self.record(ValidationError::format(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        format,
                    ))
                }
            }
            None => {
                if self.ignore_unknown_formats {
                    true
                } else {
                    self.record(ValidationError::invalid_schema(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        format!("unknown format: {format:?}"),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{formats, tests_util, Draft};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"format": "email"}), &json!("joe@example.com"))]
    #[test_case(&json!({"format": "ipv4"}), &json!("127.0.0.1"))]
    #[test_case(&json!({"format": "date"}), &json!("2000-02-29"))]
    #[test_case(&json!({"format": "email"}), &json!(42); "non-strings pass")]
    #[test_case(&json!({"format": "no-such-format"}), &json!("anything"); "unknown formats pass")]
    fn valid_draft7(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid_with_draft(Draft::Draft7, schema, instance);
    }

    #[test_case(&json!({"format": "email"}), &json!("not-an-email"))]
    #[test_case(&json!({"format": "ipv4"}), &json!("256.0.0.1"))]
    #[test_case(&json!({"format": "date"}), &json!("1900-02-29"))]
    fn invalid_draft7(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_not_valid_with_draft(Draft::Draft7, schema, instance);
    }

    #[test]
    fn annotation_only_by_default_in_2020() {
        // Without the format-assertion vocabulary, `format` does not assert.
        tests_util::is_valid_with_draft(
            Draft::Draft202012,
            &json!({"format": "email"}),
            &json!("not-an-email"),
        );
    }

    #[test]
    fn opt_in_assertion_in_2020() {
        let validator = crate::options()
            .with_draft(Draft::Draft202012)
            .should_validate_formats(true);
        assert!(!validator.is_valid(&json!("not-an-email"), &json!({"format": "email"})));
        assert!(validator.is_valid(&json!("joe@example.com"), &json!({"format": "email"})));
    }

    #[test]
    fn unknown_formats_can_be_rejected() {
        // Rejection only applies where `format` asserts.
        let validator = crate::options()
            .with_draft(Draft::Draft7)
            .should_ignore_unknown_formats(false);
        assert!(!validator.is_valid(&json!("x"), &json!({"format": "made-up"})));
        let lenient = crate::options().with_draft(Draft::Draft7);
        assert!(lenient.is_valid(&json!("x"), &json!({"format": "made-up"})));
    }

    #[test]
    fn custom_format_takes_precedence() {
        formats::register("spdx-short", |value: &str| value.starts_with("MIT"));
        let schema = json!({"format": "spdx-short"});
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!("MIT"));
        tests_util::is_not_valid_with_draft(Draft::Draft7, &schema, &json!("GPL-3.0"));
        formats::unregister("spdx-short");
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path_with_draft(
            Draft::Draft7,
            &json!({"format": "date"}),
            &json!("bla"),
            "/format",
        );
    }
}
