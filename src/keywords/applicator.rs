//! In-place applicators: `allOf`, `anyOf`, `oneOf`, `not` and
//! `if`/`then`/`else`.
//!
//! Branch errors surface only when the combinator itself fails; speculative
//! runs are rolled back through the evaluator's error-mark mechanism.
//! Evaluation state merges according to each keyword's semantics: all
//! branches for `allOf` (and `then`/`else`), matching branches for
//! `anyOf`/`oneOf`, the condition only when it holds for `if`, and never
//! for `not`.
use crate::{error::ValidationError, evaluation::EvaluationState, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_in_place_applicators(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let mut valid = true;
        valid &= self.validate_all_of(map, instance, state);
        if self.halted {
            return valid;
        }
        valid &= self.validate_any_of(map, instance, state);
        if self.halted {
            return valid;
        }
        valid &= self.validate_one_of(map, instance, state);
        if self.halted {
            return valid;
        }
        valid &= self.validate_not(map, instance);
        if self.halted {
            return valid;
        }
        valid &= self.validate_conditional(map, instance, state);
        valid
    }

    fn validate_all_of(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(all_of) = map.get("allOf").filter(|_| self.keyword_enabled("allOf")) else {
            return true;
        };
        self.push_schema("allOf");
        let valid = match all_of {
            Value::Array(subschemas) => {
                let mut valid = true;
                for (index, subschema) in subschemas.iter().enumerate() {
                    self.push_schema(index);
                    let mut child = EvaluationState::new();
                    valid &= self.apply(instance, subschema, &mut child);
                    state.merge(child);
                    self.pop_schema();
                    if self.halted {
                        break;
                    }
                }
                valid
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`allOf` must be an array of schemas",
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_any_of(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(any_of) = map.get("anyOf").filter(|_| self.keyword_enabled("anyOf")) else {
            return true;
        };
        self.push_schema("anyOf");
        let valid = match any_of {
            Value::Array(subschemas) => {
                // Every branch runs: failures may need their errors kept,
                // and 2019-09+ annotation collection wants all successes.
                let mark = self.begin_probe();
                let mut any_valid = false;
                for (index, subschema) in subschemas.iter().enumerate() {
                    self.push_schema(index);
                    let mut child = EvaluationState::new();
                    if self.apply(instance, subschema, &mut child) {
                        any_valid = true;
                        state.merge(child);
                    }
                    self.pop_schema();
                }
                self.end_probe(mark, !any_valid);
                if any_valid {
                    true
                } else {
                    self.record(ValidationError::any_of(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                    ))
                }
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`anyOf` must be an array of schemas",
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_one_of(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(one_of) = map.get("oneOf").filter(|_| self.keyword_enabled("oneOf")) else {
            return true;
        };
        self.push_schema("oneOf");
        let valid = match one_of {
            Value::Array(subschemas) => {
                let mark = self.begin_probe();
                let mut matching = None;
                let mut match_count = 0usize;
                for (index, subschema) in subschemas.iter().enumerate() {
                    self.push_schema(index);
                    let mut child = EvaluationState::new();
                    if self.apply(instance, subschema, &mut child) {
                        match_count += 1;
                        if match_count == 1 {
                            matching = Some(child);
                        }
                    }
                    self.pop_schema();
                }
                self.end_probe(mark, match_count == 0);
                match match_count {
                    1 => {
                        if let Some(child) = matching {
                            state.merge(child);
                        }
                        true
                    }
                    0 => self.record(ValidationError::one_of_not_valid(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                    )),
                    _ => self.record(ValidationError::one_of_multiple_valid(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                    )),
                }
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`oneOf` must be an array of schemas",
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_not(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(subschema) = map.get("not").filter(|_| self.keyword_enabled("not")) else {
            return true;
        };
        self.push_schema("not");
        // Annotations from the negated run are discarded along with its
        // errors.
        let mut discard = EvaluationState::new();
        let inner_valid = self.probe(instance, subschema, &mut discard);
        let valid = if inner_valid {
            self.record(ValidationError::not(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                subschema,
            ))
        } else {
            true
        };
        self.pop_schema();
        valid
    }

    fn validate_conditional(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(if_schema) = map.get("if").filter(|_| self.keyword_enabled("if")) else {
            return true;
        };
        self.push_schema("if");
        // The condition's errors never surface; its annotations only count
        // when it holds.
        let condition = self.probe(instance, if_schema, state);
        self.pop_schema();

        if condition {
            if let Some(then_schema) = map.get("then").filter(|_| self.keyword_enabled("then")) {
                self.push_schema("then");
                let mut child = EvaluationState::new();
                let valid = self.apply(instance, then_schema, &mut child);
                state.merge(child);
                self.pop_schema();
                return valid;
            }
        } else if let Some(else_schema) = map.get("else").filter(|_| self.keyword_enabled("else")) {
            self.push_schema("else");
            let mut child = EvaluationState::new();
            let valid = self.apply(instance, else_schema, &mut child);
            state.merge(child);
            self.pop_schema();
            return valid;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, Draft};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(3))]
    #[test_case(&json!({"allOf": []}), &json!(1); "empty allOf")]
    #[test_case(&json!({"anyOf": [{"type": "integer"}, {"type": "string"}]}), &json!("s"))]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"type": "string"}]}), &json!(1))]
    #[test_case(&json!({"not": {"type": "integer"}}), &json!("s"))]
    fn valid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test_case(&json!({"allOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1))]
    #[test_case(&json!({"anyOf": [{"type": "integer"}, {"type": "string"}]}), &json!(null))]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 0}]}), &json!(1); "matches both")]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"type": "string"}]}), &json!(null); "matches neither")]
    #[test_case(&json!({"not": {"type": "integer"}}), &json!(1))]
    #[test_case(&json!({"allOf": {"type": "integer"}}), &json!(1); "malformed allOf")]
    fn invalid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_not_valid(schema, instance);
    }

    #[test]
    fn all_of_accumulates_branch_errors() {
        let result = crate::validate(
            &json!(null),
            &json!({"allOf": [{"type": "integer"}, {"type": "string"}]}),
            None,
        );
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn any_of_keeps_branch_errors_only_on_failure() {
        let schema = json!({"anyOf": [{"type": "integer"}, {"type": "string"}]});
        let result = crate::validate(&json!(null), &schema, None);
        // Two branch errors plus the `anyOf` summary.
        assert_eq!(result.errors().len(), 3);

        let result = crate::validate(&json!(1), &schema, None);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn conditional() {
        let schema = json!({
            "if": {"properties": {"country": {"const": "US"}}},
            "then": {"required": ["zipCode"]},
            "else": {"required": ["postalCode"]}
        });
        tests_util::is_valid(&schema, &json!({"country": "US", "zipCode": "12345"}));
        tests_util::is_not_valid(&schema, &json!({"country": "US"}));
        tests_util::is_valid(&schema, &json!({"country": "CA", "postalCode": "A1A 1A1"}));
        tests_util::is_not_valid(&schema, &json!({"country": "CA"}));
    }

    #[test]
    fn if_without_then_or_else() {
        tests_util::is_valid(&json!({"if": {"type": "integer"}}), &json!(1));
        tests_util::is_valid(&json!({"if": {"type": "integer"}}), &json!("s"));
    }

    #[test]
    fn if_errors_never_surface() {
        let schema = json!({"if": {"type": "integer"}, "else": {"type": "string"}});
        let result = crate::validate(&json!(null), &schema, None);
        assert!(!result.is_valid());
        assert!(result
            .errors()
            .iter()
            .all(|error| error.keyword() == "type"
                && error.schema_path.to_string().starts_with("/else")));
    }

    #[test]
    fn if_ignored_before_draft7() {
        let schema = json!({"if": {"type": "integer"}, "then": {"minimum": 10}});
        tests_util::is_valid_with_draft(Draft::Draft6, &schema, &json!(1));
    }

    #[test]
    fn not_duality() {
        for (schema, instance) in [
            (json!({"type": "integer"}), json!(1)),
            (json!({"type": "integer"}), json!("s")),
            (json!({"minimum": 5}), json!(7)),
        ] {
            let direct = crate::validate(&instance, &schema, None).is_valid();
            let negated = crate::validate(&instance, &json!({"not": schema}), None).is_valid();
            assert_eq!(direct, !negated);
        }
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(
            &json!({"allOf": [{"type": "integer"}]}),
            &json!("s"),
            "/allOf/0/type",
        );
    }
}
