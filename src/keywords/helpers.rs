//! JSON equality as the specification defines it: numbers compare by
//! mathematical value (`1 == 1.0`), objects compare keys as sets with
//! recursive value equality, arrays compare element-wise in order.
use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

/// Read a count-style keyword operand (`minLength`, `maxItems`, ...), which
/// must be a non-negative integer, possibly written as an integer-valued
/// float (`2.0`).
pub(crate) fn as_limit(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && *float >= 0.0 && *float <= u64::MAX as f64)
                .map(|float| float as u64)
        }),
        _ => None,
    }
}

pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right.iter()).all(|(l, r)| equal(l, r))
        }
        (Value::Object(left), Value::Object(right)) => objects_equal(left, right),
        (_, _) => false,
    }
}

fn objects_equal(left: &Map<String, Value>, right: &Map<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .all(|(key, value)| right.get(key).map_or(false, |other| equal(value, other)))
}

pub(crate) fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(left), Some(right)) = (left.as_u64(), right.as_u64()) {
        left == right
    } else if let (Some(left), Some(right)) = (left.as_i64(), right.as_i64()) {
        left == right
    } else if let (Some(lf), Some(rf)) = (left.as_f64(), right.as_f64()) {
        // Mixed integer/float comparisons go through `num-cmp` so that
        // integers outside the exact-f64 range still compare correctly.
        if let Some(li) = left.as_i64() {
            NumCmp::num_eq(li, rf)
        } else if let Some(lu) = left.as_u64() {
            NumCmp::num_eq(lu, rf)
        } else if let Some(ri) = right.as_i64() {
            NumCmp::num_eq(ri, lf)
        } else if let Some(ru) = right.as_u64() {
            NumCmp::num_eq(ru, lf)
        } else {
            lf == rf
        }
    } else {
        false
    }
}
