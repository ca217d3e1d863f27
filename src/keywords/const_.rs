//! The `const` keyword.
use super::helpers::equal;
use crate::{error::ValidationError, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_const(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(expected) = map.get("const") else {
            return true;
        };
        if !self.keyword_enabled("const") {
            return true;
        }
        if equal(instance, expected) {
            return true;
        }
        self.push_schema("const");
        let result = self.record(ValidationError::constant(
            self.schema_path.clone(),
            self.instance_path.clone(),
            instance,
            expected,
        ));
        self.pop_schema();
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"const": 2}), &json!(2))]
    #[test_case(&json!({"const": 2}), &json!(2.0); "numeric equality across representations")]
    #[test_case(&json!({"const": {"a": [1]}}), &json!({"a": [1]}); "deep equality")]
    #[test_case(&json!({"const": null}), &json!(null))]
    fn valid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test_case(&json!({"const": 2}), &json!(3))]
    #[test_case(&json!({"const": {}}), &json!([]); "empty object is not empty array")]
    #[test_case(&json!({"const": []}), &json!({}); "empty array is not empty object")]
    #[test_case(&json!({"const": "1"}), &json!(1); "string is not number")]
    fn invalid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_not_valid(schema, instance);
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(&json!({"const": 1}), &json!(2), "/const");
    }
}
