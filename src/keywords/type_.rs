//! The `type` keyword.
use crate::{
    error::ValidationError,
    primitive_type::PrimitiveType,
    validator::Evaluator,
};
use serde_json::{Map, Number, Value};
use std::convert::TryFrom;

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_type(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(type_value) = map.get("type") else {
            return true;
        };
        if !self.keyword_enabled("type") {
            return true;
        }
        self.push_schema("type");
        let valid = match type_value {
            Value::String(name) => self.check_single_type(name, instance),
            Value::Array(names) => self.check_multiple_types(names, instance),
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`type` must be a string or an array of strings",
            )),
        };
        self.pop_schema();
        valid
    }

    fn check_single_type(&mut self, name: &str, instance: &Value) -> bool {
        match PrimitiveType::try_from(name) {
            Ok(expected) => {
                if matches_type(expected, instance, self.draft.strict_integer_type()) {
                    true
                } else {
                    self.record(ValidationError::single_type_error(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        expected,
                    ))
                }
            }
            Err(()) => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                format!("unknown type name: {name:?}"),
            )),
        }
    }

    fn check_multiple_types(&mut self, names: &[Value], instance: &Value) -> bool {
        let mut expected = Vec::with_capacity(names.len());
        for name in names {
            match name.as_str().map(PrimitiveType::try_from) {
                Some(Ok(type_)) => expected.push(type_),
                _ => {
                    return self.record(ValidationError::invalid_schema(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        "`type` array entries must be type names",
                    ))
                }
            }
        }
        let strict = self.draft.strict_integer_type();
        if expected
            .iter()
            .any(|&type_| matches_type(type_, instance, strict))
        {
            true
        } else {
            self.record(ValidationError::multiple_type_error(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                expected,
            ))
        }
    }
}

fn matches_type(expected: PrimitiveType, instance: &Value, strict_integers: bool) -> bool {
    match expected {
        PrimitiveType::Array => instance.is_array(),
        PrimitiveType::Boolean => instance.is_boolean(),
        PrimitiveType::Null => instance.is_null(),
        PrimitiveType::Object => instance.is_object(),
        PrimitiveType::String => instance.is_string(),
        PrimitiveType::Number => instance.is_number(),
        PrimitiveType::Integer => match instance {
            Value::Number(number) => is_integer(number, strict_integers),
            _ => false,
        },
    }
}

/// Draft 4 requires a mathematically integer *representation*; drafts 6 and
/// later accept any number whose fractional part is zero, `1.0` included.
fn is_integer(number: &Number, strict: bool) -> bool {
    if number.is_u64() || number.is_i64() {
        return true;
    }
    if strict {
        return false;
    }
    number.as_f64().map_or(false, |value| value.fract() == 0.0)
}
