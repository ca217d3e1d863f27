//! Array keywords: `minItems`/`maxItems`, `uniqueItems`, positional and
//! tail item application (`items`, `prefixItems`, `additionalItems`) and
//! `contains` with its 2019-09 refinements.
use super::helpers::{as_limit, equal};
use crate::{
    error::ValidationError, evaluation::EvaluationState, schemas::Draft, validator::Evaluator,
};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_array_limits(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let mut valid = true;
        for keyword in ["minItems", "maxItems"] {
            let Some(limit_value) = map.get(keyword) else {
                continue;
            };
            if !self.keyword_enabled(keyword) {
                continue;
            }
            self.push_schema(keyword);
            match as_limit(limit_value) {
                Some(limit) => {
                    if let Value::Array(items) = instance {
                        let count = items.len() as u64;
                        if keyword == "minItems" && count < limit {
                            valid = self.record(ValidationError::min_items(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                limit,
                            ));
                        } else if keyword == "maxItems" && count > limit {
                            valid = self.record(ValidationError::max_items(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                limit,
                            ));
                        }
                    }
                }
                None => {
                    valid = self.record(ValidationError::invalid_schema(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        format!("`{keyword}` must be a non-negative integer"),
                    ));
                }
            }
            self.pop_schema();
        }
        valid
    }

    pub(crate) fn validate_unique_items(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let Some(unique_value) = map.get("uniqueItems") else {
            return true;
        };
        if !self.keyword_enabled("uniqueItems") {
            return true;
        }
        match unique_value {
            Value::Bool(true) => {}
            Value::Bool(false) => return true,
            _ => {
                self.push_schema("uniqueItems");
                let result = self.record(ValidationError::invalid_schema(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    "`uniqueItems` must be a boolean",
                ));
                self.pop_schema();
                return result;
            }
        }
        let Value::Array(items) = instance else {
            return true;
        };
        if is_unique(items) {
            return true;
        }
        self.push_schema("uniqueItems");
        let result = self.record(ValidationError::unique_items(
            self.schema_path.clone(),
            self.instance_path.clone(),
            instance,
        ));
        self.pop_schema();
        result
    }

    pub(crate) fn validate_items(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        if self.draft == Draft::Draft202012 {
            self.validate_items_2020(map, instance, state)
        } else {
            self.validate_items_legacy(map, instance, state)
        }
    }

    /// 2020-12: `prefixItems` applies positionally, `items` covers the tail.
    fn validate_items_2020(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let mut valid = true;
        let mut prefix_len = 0;
        let prefix = match map
            .get("prefixItems")
            .filter(|_| self.keyword_enabled("prefixItems"))
        {
            Some(Value::Array(subschemas)) => {
                prefix_len = subschemas.len();
                Some(subschemas)
            }
            Some(_) => {
                self.push_schema("prefixItems");
                valid = self.record(ValidationError::invalid_schema(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    "`prefixItems` must be an array of schemas",
                ));
                self.pop_schema();
                None
            }
            None => None,
        };
        let items = match map.get("items").filter(|_| self.keyword_enabled("items")) {
            Some(Value::Array(_)) => {
                self.push_schema("items");
                valid = self.record(ValidationError::invalid_schema(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    "array-form `items` was replaced by `prefixItems` in 2020-12",
                ));
                self.pop_schema();
                None
            }
            other => other,
        };
        if !valid {
            return false;
        }
        let Value::Array(elements) = instance else {
            return valid;
        };

        if let Some(prefix) = prefix {
            self.push_schema("prefixItems");
            for (index, (element, subschema)) in elements.iter().zip(prefix.iter()).enumerate() {
                state.note_item(index);
                self.push_schema(index);
                self.push_instance(index);
                let mut child = EvaluationState::new();
                valid &= self.apply(element, subschema, &mut child);
                self.pop_instance();
                self.pop_schema();
                if self.halted {
                    break;
                }
            }
            self.pop_schema();
        }
        if let Some(subschema) = items {
            if !self.halted {
                self.push_schema("items");
                for (index, element) in elements.iter().enumerate().skip(prefix_len) {
                    state.note_item(index);
                    self.push_instance(index);
                    let mut child = EvaluationState::new();
                    valid &= self.apply(element, subschema, &mut child);
                    self.pop_instance();
                    if self.halted {
                        break;
                    }
                }
                self.pop_schema();
            }
        }
        valid
    }

    /// Drafts 4 through 2019-09: `items` is a schema for every element or an
    /// array of positional schemas with `additionalItems` governing the
    /// tail.
    fn validate_items_legacy(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(items) = map.get("items").filter(|_| self.keyword_enabled("items")) else {
            return true;
        };
        let Value::Array(elements) = instance else {
            return true;
        };
        let mut valid = true;
        match items {
            Value::Array(subschemas) => {
                self.push_schema("items");
                for (index, (element, subschema)) in
                    elements.iter().zip(subschemas.iter()).enumerate()
                {
                    state.note_item(index);
                    self.push_schema(index);
                    self.push_instance(index);
                    let mut child = EvaluationState::new();
                    valid &= self.apply(element, subschema, &mut child);
                    self.pop_instance();
                    self.pop_schema();
                    if self.halted {
                        break;
                    }
                }
                self.pop_schema();
                if self.halted {
                    return valid;
                }
                if elements.len() > subschemas.len() {
                    valid &= self.validate_additional_items(
                        map,
                        instance,
                        elements,
                        subschemas.len(),
                        state,
                    );
                }
            }
            _ => {
                self.push_schema("items");
                for (index, element) in elements.iter().enumerate() {
                    state.note_item(index);
                    self.push_instance(index);
                    let mut child = EvaluationState::new();
                    valid &= self.apply(element, items, &mut child);
                    self.pop_instance();
                    if self.halted {
                        break;
                    }
                }
                self.pop_schema();
            }
        }
        valid
    }

    fn validate_additional_items(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        elements: &[Value],
        from: usize,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(additional) = map
            .get("additionalItems")
            .filter(|_| self.keyword_enabled("additionalItems"))
        else {
            return true;
        };
        let mut valid = true;
        self.push_schema("additionalItems");
        match additional {
            Value::Bool(false) => {
                valid = self.record(ValidationError::additional_items(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    from,
                ));
            }
            subschema => {
                for (index, element) in elements.iter().enumerate().skip(from) {
                    state.note_item(index);
                    self.push_instance(index);
                    let mut child = EvaluationState::new();
                    valid &= self.apply(element, subschema, &mut child);
                    self.pop_instance();
                    if self.halted {
                        break;
                    }
                }
            }
        }
        self.pop_schema();
        valid
    }

    pub(crate) fn validate_contains(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(subschema) = map.get("contains").filter(|_| self.keyword_enabled("contains"))
        else {
            return true;
        };
        let Value::Array(elements) = instance else {
            return true;
        };
        let min_contains = map
            .get("minContains")
            .filter(|_| self.keyword_enabled("minContains"))
            .and_then(as_limit);
        let max_contains = map
            .get("maxContains")
            .filter(|_| self.keyword_enabled("maxContains"))
            .and_then(as_limit);

        let mut matches = 0u64;
        self.push_schema("contains");
        for (index, element) in elements.iter().enumerate() {
            let mut discard = EvaluationState::new();
            if self.probe(element, subschema, &mut discard) {
                matches += 1;
                state.note_item(index);
            }
        }
        let minimum = min_contains.unwrap_or(1);
        let valid = if matches == 0 && minimum > 0 {
            self.record(ValidationError::contains(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
            ))
        } else if matches < minimum {
            self.pop_schema();
            self.push_schema("minContains");
            let result = self.record(ValidationError::min_contains(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                minimum,
            ));
            self.pop_schema();
            self.push_schema("contains");
            result
        } else if max_contains.map_or(false, |maximum| matches > maximum) {
            self.pop_schema();
            self.push_schema("maxContains");
            let result = self.record(ValidationError::max_contains(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                max_contains.expect("checked above"),
            ));
            self.pop_schema();
            self.push_schema("contains");
            result
        } else {
            true
        };
        self.pop_schema();
        valid
    }
}

fn is_unique(items: &[Value]) -> bool {
    for (index, left) in items.iter().enumerate() {
        for right in &items[index + 1..] {
            if equal(left, right) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, Draft};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"minItems": 1}), &json!([1]))]
    #[test_case(&json!({"maxItems": 2}), &json!([1, 2]))]
    #[test_case(&json!({"minItems": 1}), &json!({}); "non-arrays pass")]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 2, 3]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([{"a": 1}, {"a": 2}]))]
    #[test_case(&json!({"uniqueItems": false}), &json!([1, 1]))]
    #[test_case(&json!({"items": {"type": "integer"}}), &json!([1, 2]))]
    #[test_case(&json!({"items": {"type": "integer"}}), &json!([]); "empty array")]
    #[test_case(&json!({"contains": {"type": "integer"}}), &json!([1, "two", 3]))]
    fn valid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test_case(&json!({"minItems": 2}), &json!([1]))]
    #[test_case(&json!({"maxItems": 1}), &json!([1, 2]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1]))]
    #[test_case(&json!({"uniqueItems": true}), &json!([1, 1.0]); "numeric equality across representations")]
    #[test_case(&json!({"uniqueItems": true}), &json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}]); "object key order ignored")]
    #[test_case(&json!({"items": {"type": "integer"}}), &json!([1, "x"]))]
    #[test_case(&json!({"contains": {"type": "integer"}}), &json!(["one", "two"]))]
    fn invalid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_not_valid(schema, instance);
    }

    #[test]
    fn unique_items_treats_empty_object_and_array_as_distinct() {
        tests_util::is_valid(&json!({"uniqueItems": true}), &json!([{}, []]));
    }

    #[test]
    fn legacy_positional_items() {
        let schema = json!({
            "items": [{"type": "integer"}, {"type": "string"}],
            "additionalItems": false
        });
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!([1, "two"]));
        tests_util::is_not_valid_with_draft(Draft::Draft7, &schema, &json!(["one", 2]));
        tests_util::is_not_valid_with_draft(Draft::Draft7, &schema, &json!([1, "two", 3]));

        // Without `additionalItems` the tail is unconstrained.
        let schema = json!({"items": [{"type": "integer"}]});
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!([1, "anything"]));
    }

    #[test]
    fn additional_items_schema_form() {
        let schema = json!({
            "items": [{"type": "integer"}],
            "additionalItems": {"type": "string"}
        });
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!([1, "a", "b"]));
        tests_util::is_not_valid_with_draft(Draft::Draft7, &schema, &json!([1, "a", 2]));
    }

    #[test]
    fn prefix_items_2020() {
        let schema = json!({
            "prefixItems": [{"type": "integer"}, {"type": "string"}],
            "items": {"type": "boolean"}
        });
        tests_util::is_valid_with_draft(Draft::Draft202012, &schema, &json!([1, "two", true]));
        tests_util::is_not_valid_with_draft(Draft::Draft202012, &schema, &json!([1, "two", 3]));
        tests_util::is_not_valid_with_draft(Draft::Draft202012, &schema, &json!(["one"]));
    }

    #[test]
    fn array_items_rejected_in_2020() {
        tests_util::is_not_valid_with_draft(
            Draft::Draft202012,
            &json!({"items": [{"type": "integer"}]}),
            &json!([1]),
        );
    }

    #[test]
    fn min_max_contains_2019() {
        let schema = json!({"contains": {"type": "integer"}, "minContains": 2});
        tests_util::is_valid_with_draft(Draft::Draft201909, &schema, &json!([1, 2]));
        tests_util::is_not_valid_with_draft(Draft::Draft201909, &schema, &json!([1, "x"]));

        let schema = json!({"contains": {"type": "integer"}, "maxContains": 1});
        tests_util::is_valid_with_draft(Draft::Draft201909, &schema, &json!([1, "x"]));
        tests_util::is_not_valid_with_draft(Draft::Draft201909, &schema, &json!([1, 2]));

        // minContains of zero makes an empty match set acceptable.
        let schema = json!({"contains": {"type": "integer"}, "minContains": 0});
        tests_util::is_valid_with_draft(Draft::Draft201909, &schema, &json!(["x"]));
    }

    #[test]
    fn min_contains_ignored_before_2019() {
        let schema = json!({"contains": {"type": "integer"}, "minContains": 2});
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!([1]));
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(
            &json!({"items": {"type": "integer"}}),
            &json!(["x"]),
            "/items/type",
        );
        tests_util::assert_schema_path(
            &json!({"contains": {"type": "integer"}}),
            &json!(["x"]),
            "/contains",
        );
    }
}
