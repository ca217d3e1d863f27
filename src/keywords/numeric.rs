//! Numeric keywords: `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum` and `multipleOf`.
//!
//! Draft 4 treats `exclusiveMinimum`/`exclusiveMaximum` as boolean modifiers
//! of the inclusive bounds; a numeric value for them is simply ignored
//! there. Drafts 6+ make them standalone numeric bounds.
use crate::{error::ValidationError, validator::Evaluator};
use fraction::{BigFraction, BigUint};
use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

enum Num {
    I(i64),
    U(u64),
    F(f64),
}

fn widen(number: &Number) -> Num {
    if let Some(value) = number.as_u64() {
        Num::U(value)
    } else if let Some(value) = number.as_i64() {
        Num::I(value)
    } else {
        Num::F(number.as_f64().expect("serde_json numbers are finite"))
    }
}

pub(crate) fn compare(left: &Number, right: &Number) -> Ordering {
    match (widen(left), widen(right)) {
        (Num::U(l), Num::U(r)) => l.cmp(&r),
        (Num::I(l), Num::I(r)) => l.cmp(&r),
        (Num::U(l), Num::I(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Greater),
        (Num::I(l), Num::U(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Less),
        (Num::U(l), Num::F(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Equal),
        (Num::I(l), Num::F(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Equal),
        (Num::F(l), Num::U(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Equal),
        (Num::F(l), Num::I(r)) => NumCmp::num_cmp(l, r).unwrap_or(Ordering::Equal),
        (Num::F(l), Num::F(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
    }
}

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_numeric_keywords(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let mut valid = true;
        if self.draft.boolean_exclusive_bounds() {
            valid &= self.validate_bound_draft4(map, instance, "minimum", "exclusiveMinimum");
            valid &= self.validate_bound_draft4(map, instance, "maximum", "exclusiveMaximum");
        } else {
            valid &= self.validate_bound(map, instance, "minimum", false);
            valid &= self.validate_bound(map, instance, "maximum", false);
            valid &= self.validate_bound(map, instance, "exclusiveMinimum", true);
            valid &= self.validate_bound(map, instance, "exclusiveMaximum", true);
        }
        valid &= self.validate_multiple_of(map, instance);
        valid
    }

    fn validate_bound(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        keyword: &'static str,
        exclusive: bool,
    ) -> bool {
        let Some(limit_value) = map.get(keyword) else {
            return true;
        };
        if !self.keyword_enabled(keyword) {
            return true;
        }
        self.push_schema(keyword);
        let valid = match limit_value {
            Value::Number(limit) => match instance {
                Value::Number(number) => {
                    let ordering = compare(number, limit);
                    let in_bounds = match (keyword.ends_with("inimum"), exclusive) {
                        (true, false) => ordering != Ordering::Less,
                        (true, true) => ordering == Ordering::Greater,
                        (false, false) => ordering != Ordering::Greater,
                        (false, true) => ordering == Ordering::Less,
                    };
                    if in_bounds {
                        true
                    } else {
                        self.record(bound_error(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            keyword,
                            limit_value.clone(),
                        ))
                    }
                }
                _ => true,
            },
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                format!("`{keyword}` must be a number"),
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_bound_draft4(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        keyword: &'static str,
        exclusive_keyword: &'static str,
    ) -> bool {
        let Some(limit_value) = map.get(keyword) else {
            // A numeric `exclusiveMinimum` without `minimum` is a draft 6
            // construct and carries no meaning in draft 4.
            return true;
        };
        let exclusive = map.get(exclusive_keyword) == Some(&Value::Bool(true));
        self.push_schema(keyword);
        let valid = match limit_value {
            Value::Number(limit) => match instance {
                Value::Number(number) => {
                    let ordering = compare(number, limit);
                    let in_bounds = if keyword == "minimum" {
                        if exclusive {
                            ordering == Ordering::Greater
                        } else {
                            ordering != Ordering::Less
                        }
                    } else if exclusive {
                        ordering == Ordering::Less
                    } else {
                        ordering != Ordering::Greater
                    };
                    if in_bounds {
                        true
                    } else {
                        let effective = if exclusive { exclusive_keyword } else { keyword };
                        self.record(bound_error(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            effective,
                            limit_value.clone(),
                        ))
                    }
                }
                _ => true,
            },
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                format!("`{keyword}` must be a number"),
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_multiple_of(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(multiple_value) = map.get("multipleOf") else {
            return true;
        };
        if !self.keyword_enabled("multipleOf") {
            return true;
        }
        self.push_schema("multipleOf");
        let valid = match multiple_value {
            Value::Number(multiple_of)
                if multiple_of.as_f64().map_or(false, |value| value > 0.0) =>
            {
                match instance {
                    Value::Number(number) => {
                        if is_multiple_of(number, multiple_of) {
                            true
                        } else {
                            self.record(ValidationError::multiple_of(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                multiple_value.clone(),
                            ))
                        }
                    }
                    _ => true,
                }
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`multipleOf` must be a positive number",
            )),
        };
        self.pop_schema();
        valid
    }
}

fn bound_error(
    schema_path: crate::paths::JsonPointer,
    instance_path: crate::paths::JsonPointer,
    instance: &Value,
    keyword: &str,
    limit: Value,
) -> ValidationError {
    match keyword {
        "minimum" => ValidationError::minimum(schema_path, instance_path, instance, limit),
        "maximum" => ValidationError::maximum(schema_path, instance_path, instance, limit),
        "exclusiveMinimum" => {
            ValidationError::exclusive_minimum(schema_path, instance_path, instance, limit)
        }
        _ => ValidationError::exclusive_maximum(schema_path, instance_path, instance, limit),
    }
}

/// Exact multiple check. Integer divisors take the fast path; fractional
/// divisors are re-read from their decimal tokens into big rationals, so
/// that binary float drift (`0.3 / 0.1`) cannot skew the verdict.
fn is_multiple_of(item: &Number, multiple_of: &Number) -> bool {
    use std::str::FromStr;

    if let (Some(item), Some(multiple_of)) = (item.as_i64(), multiple_of.as_i64()) {
        return multiple_of != 0 && item % multiple_of == 0;
    }
    let multiple_f = multiple_of.as_f64().expect("serde_json numbers are finite");
    if multiple_f.fract() == 0.0 {
        let item_f = item.as_f64().expect("serde_json numbers are finite");
        // A value with a fractional part is never a multiple of an integer.
        return item_f.fract() == 0.0 && (item_f % multiple_f) == 0.0;
    }
    match (
        BigFraction::from_str(&item.to_string()),
        BigFraction::from_str(&multiple_of.to_string()),
    ) {
        (Ok(item), Ok(multiple_of)) => {
            let ratio = item / multiple_of;
            ratio
                .denom()
                .map_or(false, |denom| denom == &BigUint::from(1_u8))
        }
        _ => {
            // Exponent-notation tokens the fraction parser rejects; fall
            // back to float arithmetic.
            let item_f = item.as_f64().expect("serde_json numbers are finite");
            let remainder = (item_f / multiple_f) % 1.0;
            remainder.abs() < f64::EPSILON
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use crate::Draft;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"minimum": 5}), &json!(5); "inclusive lower bound")]
    #[test_case(&json!({"minimum": 5}), &json!(6))]
    #[test_case(&json!({"maximum": 5}), &json!(5); "inclusive upper bound")]
    #[test_case(&json!({"maximum": 5.5}), &json!(5.4))]
    #[test_case(&json!({"exclusiveMinimum": 5, "exclusiveMaximum": 10}), &json!(7))]
    #[test_case(&json!({"minimum": 5}), &json!("not a number"); "non-numbers pass")]
    #[test_case(&json!({"minimum": -9007199254740993i64}), &json!(-9007199254740992i64); "i64 beyond f64 precision")]
    fn valid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test_case(&json!({"minimum": 5}), &json!(4))]
    #[test_case(&json!({"maximum": 5}), &json!(6))]
    #[test_case(&json!({"exclusiveMinimum": 5}), &json!(5); "boundary is out for exclusive minimum")]
    #[test_case(&json!({"exclusiveMaximum": 10}), &json!(10); "boundary is out for exclusive maximum")]
    #[test_case(&json!({"minimum": "5"}), &json!(10); "malformed operand")]
    fn invalid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_not_valid(schema, instance);
    }

    #[test]
    fn draft4_boolean_exclusive() {
        let schema = json!({"minimum": 5, "exclusiveMinimum": true});
        tests_util::is_not_valid_with_draft(Draft::Draft4, &schema, &json!(5));
        tests_util::is_valid_with_draft(Draft::Draft4, &schema, &json!(6));
        // Numeric form means nothing in draft 4.
        let schema = json!({"exclusiveMinimum": 5, "exclusiveMaximum": 10});
        tests_util::is_valid_with_draft(Draft::Draft4, &schema, &json!(5));
        tests_util::is_valid_with_draft(Draft::Draft4, &schema, &json!(12));
    }

    #[test_case(&json!({"multipleOf": 2}), &json!(4), true)]
    #[test_case(&json!({"multipleOf": 2}), &json!(3), false)]
    #[test_case(&json!({"multipleOf": 1.0}), &json!(4.0), true)]
    #[test_case(&json!({"multipleOf": 1.0}), &json!(4.5), false)]
    #[test_case(&json!({"multipleOf": 1.5}), &json!(4.5), true)]
    #[test_case(&json!({"multipleOf": 0.1}), &json!(0.3), true; "three tenths")]
    #[test_case(&json!({"multipleOf": 0.01}), &json!(0.07), true; "seven hundredths")]
    #[test_case(&json!({"multipleOf": 0.1}), &json!(0.35), false; "not a tenth multiple")]
    #[test_case(&json!({"multipleOf": 2}), &json!("text"), true; "non-numbers pass")]
    fn multiple_of(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        if expected {
            tests_util::is_valid(schema, instance);
        } else {
            tests_util::is_not_valid(schema, instance);
        }
    }

    #[test]
    fn multiple_of_zero_is_a_schema_error() {
        tests_util::is_not_valid(&json!({"multipleOf": 0}), &json!(4));
    }

    #[test]
    fn schema_path() {
        tests_util::assert_schema_path(&json!({"minimum": 5}), &json!(1), "/minimum");
    }
}
