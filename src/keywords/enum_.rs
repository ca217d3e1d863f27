//! The `enum` keyword.
use super::helpers::equal;
use crate::{error::ValidationError, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_enum(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(options) = map.get("enum") else {
            return true;
        };
        if !self.keyword_enabled("enum") {
            return true;
        }
        self.push_schema("enum");
        let valid = match options {
            Value::Array(items) => {
                if items.iter().any(|option| equal(instance, option)) {
                    true
                } else {
                    self.record(ValidationError::enumeration(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        options,
                    ))
                }
            }
            // A malformed `enum` matches nothing.
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`enum` must be an array",
            )),
        };
        self.pop_schema();
        valid
    }
}
