//! String keywords: `minLength`, `maxLength` and `pattern`.
//!
//! Lengths count Unicode code points, not bytes. Patterns follow the ECMA
//! 262 dialect and search anywhere in the string.
use super::helpers::as_limit;
use crate::{ecma, error::ValidationError, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_string_keywords(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let mut valid = true;
        valid &= self.validate_length(map, instance, "minLength");
        valid &= self.validate_length(map, instance, "maxLength");
        valid &= self.validate_pattern(map, instance);
        valid
    }

    fn validate_length(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        keyword: &'static str,
    ) -> bool {
        let Some(limit_value) = map.get(keyword) else {
            return true;
        };
        if !self.keyword_enabled(keyword) {
            return true;
        }
        self.push_schema(keyword);
        let valid = match as_limit(limit_value) {
            Some(limit) => match instance {
                Value::String(item) => {
                    let length = bytecount::num_chars(item.as_bytes()) as u64;
                    let in_bounds = if keyword == "minLength" {
                        length >= limit
                    } else {
                        length <= limit
                    };
                    if in_bounds {
                        true
                    } else if keyword == "minLength" {
                        self.record(ValidationError::min_length(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            limit,
                        ))
                    } else {
                        self.record(ValidationError::max_length(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            limit,
                        ))
                    }
                }
                _ => true,
            },
            None => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                format!("`{keyword}` must be a non-negative integer"),
            )),
        };
        self.pop_schema();
        valid
    }

    fn validate_pattern(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(pattern_value) = map.get("pattern") else {
            return true;
        };
        if !self.keyword_enabled("pattern") {
            return true;
        }
        self.push_schema("pattern");
        let valid = match pattern_value {
            Value::String(pattern) => match self.compiled_pattern(pattern) {
                Some(regex) => match instance {
                    Value::String(item) => {
                        // Backtracking overruns count as non-matches.
                        if regex.is_match(item).unwrap_or(false) {
                            true
                        } else {
                            self.record(ValidationError::pattern(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                pattern,
                            ))
                        }
                    }
                    _ => true,
                },
                None => self.record(ValidationError::invalid_regex(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    pattern,
                )),
            },
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`pattern` must be a string",
            )),
        };
        self.pop_schema();
        valid
    }

    /// Patterns are compiled at most once per validation call.
    pub(crate) fn compiled_pattern(&mut self, pattern: &str) -> Option<fancy_regex::Regex> {
        if let Some(cached) = self.pattern_cache.get(pattern) {
            return cached.clone();
        }
        let compiled = ecma::compile(pattern).ok();
        self.pattern_cache
            .insert(pattern.to_string(), compiled.clone());
        compiled
    }
}
