//! Object keywords: `required`, `dependentRequired`/`dependencies`,
//! `minProperties`/`maxProperties`, `propertyNames`, `properties`,
//! `patternProperties`, `additionalProperties` and `dependentSchemas`.
use super::helpers::as_limit;
use crate::{error::ValidationError, evaluation::EvaluationState, validator::Evaluator};
use serde_json::{Map, Value};

impl<'s> Evaluator<'s> {
    pub(crate) fn validate_required(&mut self, map: &'s Map<String, Value>, instance: &Value) -> bool {
        let Some(required_value) = map.get("required") else {
            return true;
        };
        if !self.keyword_enabled("required") {
            return true;
        }
        self.push_schema("required");
        let valid = match required_value {
            Value::Array(required) => {
                let mut valid = true;
                for property in required {
                    let Value::String(name) = property else {
                        valid = self.record(ValidationError::invalid_schema(
                            self.schema_path.clone(),
                            self.instance_path.clone(),
                            instance,
                            "`required` entries must be strings",
                        ));
                        break;
                    };
                    if let Value::Object(item) = instance {
                        if !item.contains_key(name) {
                            valid = self.record(ValidationError::required(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                property.clone(),
                            ));
                            if self.halted {
                                break;
                            }
                        }
                    }
                }
                valid
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "`required` must be an array",
            )),
        };
        self.pop_schema();
        valid
    }

    /// `dependentRequired` (2019-09+) and the string-array form of the older
    /// `dependencies` keyword.
    pub(crate) fn validate_dependent_required(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let mut valid = true;
        if self.keyword_enabled("dependentRequired") {
            if let Some(Value::Object(dependencies)) = map.get("dependentRequired") {
                valid &= self.check_required_dependencies(
                    "dependentRequired",
                    dependencies,
                    instance,
                    false,
                );
            }
        }
        if self.draft.supports_dependencies() {
            if let Some(Value::Object(dependencies)) = map.get("dependencies") {
                valid &= self.check_required_dependencies("dependencies", dependencies, instance, true);
            }
        }
        valid
    }

    fn check_required_dependencies(
        &mut self,
        keyword: &'static str,
        dependencies: &'s Map<String, Value>,
        instance: &Value,
        schemas_allowed: bool,
    ) -> bool {
        let Value::Object(item) = instance else {
            return true;
        };
        let mut valid = true;
        self.push_schema(keyword);
        for (property, requirement) in dependencies {
            if !item.contains_key(property) {
                continue;
            }
            match requirement {
                Value::Array(required) => {
                    self.push_schema(property.as_str());
                    for name in required {
                        if let Value::String(name) = name {
                            if !item.contains_key(name) {
                                valid = self.record(ValidationError::required(
                                    self.schema_path.clone(),
                                    self.instance_path.clone(),
                                    instance,
                                    Value::String(name.clone()),
                                ));
                            }
                        }
                    }
                    self.pop_schema();
                }
                _ if schemas_allowed => {
                    // Schema-form dependency, handled with the applicators.
                }
                _ => {
                    self.push_schema(property.as_str());
                    valid = self.record(ValidationError::invalid_schema(
                        self.schema_path.clone(),
                        self.instance_path.clone(),
                        instance,
                        format!("`{keyword}` values must be arrays of property names"),
                    ));
                    self.pop_schema();
                }
            }
            if self.halted {
                break;
            }
        }
        self.pop_schema();
        valid
    }

    /// `dependentSchemas` (2019-09+) and the schema form of `dependencies`.
    pub(crate) fn validate_dependent_schemas(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let mut valid = true;
        if self.keyword_enabled("dependentSchemas") {
            if let Some(Value::Object(dependencies)) = map.get("dependentSchemas") {
                valid &= self.check_schema_dependencies(
                    "dependentSchemas",
                    dependencies,
                    instance,
                    state,
                    false,
                );
            }
        }
        if self.draft.supports_dependencies() {
            if let Some(Value::Object(dependencies)) = map.get("dependencies") {
                valid &=
                    self.check_schema_dependencies("dependencies", dependencies, instance, state, true);
            }
        }
        valid
    }

    fn check_schema_dependencies(
        &mut self,
        keyword: &'static str,
        dependencies: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
        arrays_allowed: bool,
    ) -> bool {
        let Value::Object(item) = instance else {
            return true;
        };
        let mut valid = true;
        self.push_schema(keyword);
        for (property, subschema) in dependencies {
            if !item.contains_key(property) {
                continue;
            }
            match subschema {
                Value::Array(_) if arrays_allowed => {}
                Value::Object(_) | Value::Bool(_) => {
                    self.push_schema(property.as_str());
                    let mut child = EvaluationState::new();
                    let subschema_valid = self.apply(instance, subschema, &mut child);
                    state.merge(child);
                    valid &= subschema_valid;
                    self.pop_schema();
                }
                _ => {}
            }
            if self.halted {
                break;
            }
        }
        self.pop_schema();
        valid
    }

    pub(crate) fn validate_object_limits(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let mut valid = true;
        for keyword in ["minProperties", "maxProperties"] {
            let Some(limit_value) = map.get(keyword) else {
                continue;
            };
            if !self.keyword_enabled(keyword) {
                continue;
            }
            self.push_schema(keyword);
            match as_limit(limit_value) {
                Some(limit) => {
                    if let Value::Object(item) = instance {
                        let count = item.len() as u64;
                        if keyword == "minProperties" && count < limit {
                            valid = self.record(ValidationError::min_properties(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                limit,
                            ));
                        } else if keyword == "maxProperties" && count > limit {
                            valid = self.record(ValidationError::max_properties(
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

    pub(crate) fn validate_property_names(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
    ) -> bool {
        let Some(subschema) = map.get("propertyNames") else {
            return true;
        };
        if !self.keyword_enabled("propertyNames") {
            return true;
        }
        let Value::Object(item) = instance else {
            return true;
        };
        let mut valid = true;
        self.push_schema("propertyNames");
        for key in item.keys() {
            let name = Value::String(key.clone());
            let mut discard = EvaluationState::new();
            let name_valid = self.probe(&name, subschema, &mut discard);
            if !name_valid {
                valid = self.record(ValidationError::property_names(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    key.clone(),
                ));
                if self.halted {
                    break;
                }
            }
        }
        self.pop_schema();
        valid
    }

    pub(crate) fn validate_properties(
        &mut self,
        map: &'s Map<String, Value>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let properties = map
            .get("properties")
            .filter(|_| self.keyword_enabled("properties"));
        let pattern_properties = map
            .get("patternProperties")
            .filter(|_| self.keyword_enabled("patternProperties"));
        let additional = map
            .get("additionalProperties")
            .filter(|_| self.keyword_enabled("additionalProperties"));
        if properties.is_none() && pattern_properties.is_none() && additional.is_none() {
            return true;
        }

        let mut valid = true;

        // Operand shapes are checked before the instance type so that a
        // malformed schema fails for every instance.
        let properties = match properties {
            Some(Value::Object(properties)) => Some(properties),
            Some(_) => {
                self.push_schema("properties");
                valid = self.record(ValidationError::invalid_schema(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    "`properties` must be an object",
                ));
                self.pop_schema();
                None
            }
            None => None,
        };
        let mut patterns = Vec::new();
        match pattern_properties {
            Some(Value::Object(pattern_properties)) => {
                for (pattern, subschema) in pattern_properties {
                    match self.compiled_pattern(pattern) {
                        Some(regex) => patterns.push((pattern, regex, subschema)),
                        None => {
                            self.push_schema("patternProperties");
                            self.push_schema(pattern.as_str());
                            valid = self.record(ValidationError::invalid_regex(
                                self.schema_path.clone(),
                                self.instance_path.clone(),
                                instance,
                                pattern,
                            ));
                            self.pop_schema();
                            self.pop_schema();
                        }
                    }
                }
            }
            Some(_) => {
                self.push_schema("patternProperties");
                valid = self.record(ValidationError::invalid_schema(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    "`patternProperties` must be an object",
                ));
                self.pop_schema();
            }
            None => {}
        }
        if !valid || self.halted {
            return valid;
        }

        let Value::Object(item) = instance else {
            return valid;
        };

        let mut unexpected = Vec::new();
        for (key, value) in item {
            let mut covered = false;
            if let Some(subschema) = properties.and_then(|properties| properties.get(key)) {
                covered = true;
                state.note_property(key);
                self.push_schema("properties");
                self.push_schema(key.as_str());
                self.push_instance(key.as_str());
                let mut child = EvaluationState::new();
                valid &= self.apply(value, subschema, &mut child);
                self.pop_instance();
                self.pop_schema();
                self.pop_schema();
            }
            for (pattern, regex, subschema) in &patterns {
                if regex.is_match(key).unwrap_or(false) {
                    covered = true;
                    state.note_property(key);
                    self.push_schema("patternProperties");
                    self.push_schema(pattern.as_str());
                    self.push_instance(key.as_str());
                    let mut child = EvaluationState::new();
                    valid &= self.apply(value, subschema, &mut child);
                    self.pop_instance();
                    self.pop_schema();
                    self.pop_schema();
                }
            }
            if !covered {
                match additional {
                    Some(Value::Bool(false)) => unexpected.push(key.clone()),
                    Some(subschema) => {
                        state.note_property(key);
                        self.push_schema("additionalProperties");
                        self.push_instance(key.as_str());
                        let mut child = EvaluationState::new();
                        valid &= self.apply(value, subschema, &mut child);
                        self.pop_instance();
                        self.pop_schema();
                    }
                    None => {}
                }
            }
            if self.halted {
                return valid;
            }
        }
        if !unexpected.is_empty() {
            self.push_schema("additionalProperties");
            valid = self.record(ValidationError::additional_properties(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                unexpected,
            ));
            self.pop_schema();
        }
        valid
    }
}
