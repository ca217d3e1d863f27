//! `unevaluatedItems` / `unevaluatedProperties` (2019-09+).
//!
//! These run after every sibling keyword, consuming the evaluation state the
//! siblings produced. Whatever they validate becomes evaluated in turn, so
//! an outer schema sees those children as covered.
use crate::{error::ValidationError, evaluation::EvaluationState, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_unevaluated_items(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(subschema) = map
            .get("unevaluatedItems")
            .filter(|_| self.keyword_enabled("unevaluatedItems"))
        else {
            return true;
        };
        let Value::Array(elements) = instance else {
            return true;
        };
        let mut valid = true;
        self.push_schema("unevaluatedItems");
        if subschema == &Value::Bool(false) {
            let unexpected: Vec<usize> = (0..elements.len())
                .filter(|index| !state.is_item_evaluated(*index))
                .collect();
            if !unexpected.is_empty() {
                valid = self.record(ValidationError::unevaluated_items(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    unexpected,
                ));
            }
        } else {
            for (index, element) in elements.iter().enumerate() {
                if state.is_item_evaluated(index) {
                    continue;
                }
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
        self.pop_schema();
        valid
    }

    pub(crate) fn validate_unevaluated_properties(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let Some(subschema) = map
            .get("unevaluatedProperties")
            .filter(|_| self.keyword_enabled("unevaluatedProperties"))
        else {
            return true;
        };
        let Value::Object(item) = instance else {
            return true;
        };
        let mut valid = true;
        self.push_schema("unevaluatedProperties");
        if subschema == &Value::Bool(false) {
            let unexpected: Vec<String> = item
                .keys()
                .filter(|key| !state.is_property_evaluated(key))
                .cloned()
                .collect();
            if !unexpected.is_empty() {
                valid = self.record(ValidationError::unevaluated_properties(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    unexpected,
                ));
            }
        } else {
            for (key, value) in item {
                if state.is_property_evaluated(key) {
                    continue;
                }
                state.note_property(key);
                self.push_instance(key.as_str());
                let mut child = EvaluationState::new();
                valid &= self.apply(value, subschema, &mut child);
                self.pop_instance();
                if self.halted {
                    break;
                }
            }
        }
        self.pop_schema();
        valid
    }
}
