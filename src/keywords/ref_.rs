//! Reference keywords: `$ref`, `$recursiveRef` and `$dynamicRef`.
//!
//! Reference expansion is where recursion can happen, so this is also where
//! the depth limit and the `(schema identity, instance location)` cycle
//! guard live.
use crate::{
    error::ValidationError,
    evaluation::EvaluationState,
    paths::JsonPointer,
    registry::uri_key,
    resolver::{resolve, RefError, Resolved},
    schemas::Draft,
    validator::Evaluator,
};
use serde_json::Value;

impl<'s> Evaluator<'s> {
    pub(crate) fn apply_ref(
        &mut self,
        keyword: &'static str,
        reference: &str,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        self.push_schema(keyword);
        let valid = match resolve(reference, self.scope.base(), &self.registry, self.draft) {
            Ok(resolved) => self.apply_resolved(resolved, instance, state),
            Err(error) => self.record_ref_error(error, instance),
        };
        self.pop_schema();
        valid
    }

    /// 2019-09 `$recursiveRef "#"`: the outermost dynamic-scope frame whose
    /// resource declares `$recursiveAnchor: true` wins; without one the
    /// reference behaves lexically.
    pub(crate) fn apply_recursive_ref(
        &mut self,
        reference: &str,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        if reference != "#" {
            return self.apply_ref("$recursiveRef", reference, instance, state);
        }
        self.push_schema("$recursiveRef");
        let target = self
            .scope
            .find_outermost(|frame| frame.recursive_anchor)
            .map(|frame| frame.base.clone());
        let valid = match target {
            Some(base) => match self.registry.lookup(&uri_key(&base)) {
                Some(schema) => self.apply_resolved(
                    Resolved {
                        schema,
                        base,
                        pointer: JsonPointer::new(),
                    },
                    instance,
                    state,
                ),
                None => self.record(ValidationError::cannot_resolve(
                    self.schema_path.clone(),
                    self.instance_path.clone(),
                    instance,
                    reference.to_string(),
                )),
            },
            None => match resolve("#", self.scope.base(), &self.registry, self.draft) {
                Ok(resolved) => self.apply_resolved(resolved, instance, state),
                Err(error) => self.record_ref_error(error, instance),
            },
        };
        self.pop_schema();
        valid
    }

    /// 2020-12 `$dynamicRef "#name"`: scan the dynamic scope from the
    /// outermost frame for a resource declaring `$dynamicAnchor: name`;
    /// fall back to plain `$ref` behavior when no frame has one.
    pub(crate) fn apply_dynamic_ref(
        &mut self,
        reference: &str,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        let anchor = match reference.strip_prefix('#') {
            Some(fragment) if !fragment.is_empty() && !fragment.starts_with('/') => fragment,
            _ => return self.apply_ref("$dynamicRef", reference, instance, state),
        };
        self.push_schema("$dynamicRef");
        let target = self
            .scope
            .find_outermost(|frame| {
                self.registry
                    .dynamic_anchor(&uri_key(&frame.base), anchor)
                    .is_some()
            })
            .map(|frame| frame.base.clone());
        let valid = match target {
            Some(base) => {
                let schema = self
                    .registry
                    .dynamic_anchor(&uri_key(&base), anchor)
                    .expect("frame was just found by this anchor");
                self.apply_resolved(
                    Resolved {
                        schema,
                        base,
                        pointer: JsonPointer::new(),
                    },
                    instance,
                    state,
                )
            }
            None => match resolve(reference, self.scope.base(), &self.registry, self.draft) {
                Ok(resolved) => self.apply_resolved(resolved, instance, state),
                Err(error) => self.record_ref_error(error, instance),
            },
        };
        self.pop_schema();
        valid
    }

    fn record_ref_error(&mut self, error: RefError, instance: &Value) -> bool {
        match error {
            RefError::InvalidPointer(pointer) => self.record(ValidationError::invalid_pointer(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                pointer,
            )),
            RefError::CannotResolve(reference) => self.record(ValidationError::cannot_resolve(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                reference,
            )),
        }
    }

    fn apply_resolved(
        &mut self,
        resolved: Resolved<'s>,
        instance: &Value,
        state: &mut EvaluationState,
    ) -> bool {
        if !resolved.schema.is_object() && !resolved.schema.is_boolean() {
            // The pointer was well-formed but landed on a non-schema value.
            return self.record(ValidationError::invalid_pointer(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                resolved.pointer.to_string(),
            ));
        }
        let guard_key = (
            resolved.schema as *const Value as usize,
            self.instance_path.to_string(),
        );
        if self.seen.contains(&guard_key) || self.ref_depth >= self.max_depth {
            return self.record(ValidationError::recursion(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
            ));
        }
        self.seen.insert(guard_key.clone());
        self.ref_depth += 1;

        let pushed = if resolved.base != *self.scope.base() {
            let recursive = self.draft == Draft::Draft201909
                && self
                    .registry
                    .lookup(&uri_key(&resolved.base))
                    .map_or(false, |root| {
                        root.get("$recursiveAnchor") == Some(&Value::Bool(true))
                    });
            self.scope.push(
                resolved.base.clone(),
                recursive,
                resolved.pointer.clone(),
                self.schema_path.len(),
            );
            true
        } else {
            false
        };

        let mut child = EvaluationState::new();
        let valid = self.apply(instance, resolved.schema, &mut child);
        if valid {
            state.merge(child);
        }

        if pushed {
            self.scope.pop();
        }
        self.ref_depth -= 1;
        self.seen.remove(&guard_key);
        valid
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::ValidationErrorKind, tests_util, Draft};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(
        &json!({"definitions": {"n": {"type": "number"}}, "$ref": "#/definitions/n"}),
        &json!(42)
    )]
    #[test_case(
        &json!({"$defs": {"positive": {"minimum": 0}}, "$ref": "#/$defs/positive"}),
        &json!(1);
        "defs reference"
    )]
    #[test_case(
        &json!({"definitions": {"my~field": {"type": "integer"}}, "$ref": "#/definitions/my~0field"}),
        &json!(3);
        "tilde escape in pointer"
    )]
    #[test_case(
        &json!({"definitions": {"my/field": {"type": "integer"}}, "$ref": "#/definitions/my~1field"}),
        &json!(3);
        "slash escape in pointer"
    )]
    fn valid(schema: &serde_json::Value, instance: &serde_json::Value) {
        tests_util::is_valid(schema, instance);
    }

    #[test]
    fn ref_overrides_siblings_before_2019() {
        let schema = json!({
            "$defs": {"positive": {"type": "number", "minimum": 0}},
            "$ref": "#/$defs/positive",
            "maximum": 100
        });
        tests_util::is_valid_with_draft(Draft::Draft7, &schema, &json!(150));
        tests_util::is_not_valid_with_draft(Draft::Draft202012, &schema, &json!(150));
    }

    #[test]
    fn unresolvable_reference() {
        let error = tests_util::first_error(
            &json!({"$ref": "https://elsewhere.example.com/schema.json"}),
            &json!(1),
        );
        assert!(matches!(error.kind, ValidationErrorKind::CannotResolve { .. }));
        assert_eq!(error.keyword(), "$ref");
    }

    #[test]
    fn missing_pointer_target() {
        let error = tests_util::first_error(&json!({"$ref": "#/definitions/absent"}), &json!(1));
        assert!(matches!(error.kind, ValidationErrorKind::InvalidPointer { .. }));
    }

    #[test]
    fn pointer_to_non_schema() {
        let schema = json!({"definitions": {"x": {"type": "integer"}}, "$ref": "#/definitions/x/type"});
        let error = tests_util::first_error(&schema, &json!(1));
        assert!(matches!(error.kind, ValidationErrorKind::InvalidPointer { .. }));
    }

    #[test]
    fn self_referential_schema_is_cut_off() {
        let error = tests_util::first_error(&json!({"$ref": "#"}), &json!(1));
        assert!(matches!(error.kind, ValidationErrorKind::Recursion));
        assert_eq!(error.keyword(), "$ref");
    }

    #[test]
    fn recursive_list_schema() {
        let schema = json!({
            "$id": "https://example.com/tree",
            "type": "object",
            "properties": {
                "value": {"type": "integer"},
                "children": {"type": "array", "items": {"$ref": "#"}}
            },
            "required": ["value"]
        });
        tests_util::is_valid(
            &schema,
            &json!({"value": 1, "children": [{"value": 2, "children": [{"value": 3}]}]}),
        );
        tests_util::is_not_valid(
            &schema,
            &json!({"value": 1, "children": [{"value": "two"}]}),
        );
    }

    #[test]
    fn recursive_ref_2019() {
        // The classic extensible-tree setup: the outer schema redefines the
        // recursive anchor, so nested nodes must satisfy the outer schema.
        let schema = json!({
            "$id": "https://example.com/strict-tree",
            "$recursiveAnchor": true,
            "$ref": "https://example.com/tree",
            "unevaluatedProperties": false
        });
        let tree = json!({
            "$id": "https://example.com/tree",
            "$recursiveAnchor": true,
            "type": "object",
            "properties": {
                "data": true,
                "children": {"type": "array", "items": {"$recursiveRef": "#"}}
            }
        });
        let mut registry = crate::SchemaRegistry::new(Draft::Draft201909);
        registry.register("https://example.com/tree", &tree);
        let options = crate::options()
            .with_draft(Draft::Draft201909)
            .with_registry(registry);
        assert!(options.is_valid(
            &json!({"children": [{"data": 1, "children": []}]}),
            &schema
        ));
        // An extra property deep in the tree violates the *outer* schema.
        assert!(!options.is_valid(
            &json!({"children": [{"data": 1, "oops": true}]}),
            &schema
        ));
    }

    #[test]
    fn dynamic_ref_2020() {
        // The canonical extensible-list setup: the outer schema narrows the
        // item type by redeclaring the dynamic anchor.
        let strict = json!({
            "$id": "https://example.com/strict-list",
            "$ref": "https://example.com/list",
            "$defs": {
                "strings": {"$dynamicAnchor": "items", "type": "string"}
            }
        });
        let list = json!({
            "$id": "https://example.com/list",
            "$defs": {
                "generic": {"$dynamicAnchor": "items", "type": ["string", "number", "boolean"]}
            },
            "type": "array",
            "items": {"$dynamicRef": "#items"}
        });
        let mut registry = crate::SchemaRegistry::new(Draft::Draft202012);
        registry.register("https://example.com/list", &list);
        let options = crate::options()
            .with_draft(Draft::Draft202012)
            .with_registry(registry.clone());
        // The outermost resource declaring the anchor wins: items must be
        // strings even though the list's own anchor is more permissive.
        assert!(options.is_valid(&json!(["a", "b"]), &strict));
        assert!(!options.is_valid(&json!(["a", 1]), &strict));

        // Validating the list schema alone falls back to its own anchor.
        let options = crate::options()
            .with_draft(Draft::Draft202012)
            .with_registry(registry);
        assert!(options.is_valid(&json!(["a", 1, true]), &list));
        assert!(!options.is_valid(&json!([null]), &list));
    }

    #[test]
    fn legacy_id_anchor_draft4() {
        let schema = json!({
            "definitions": {
                "named": {"id": "#local", "type": "integer"}
            },
            "$ref": "#local"
        });
        tests_util::is_valid_with_draft(Draft::Draft4, &schema, &json!(3));
        tests_util::is_not_valid_with_draft(Draft::Draft4, &schema, &json!("s"));
    }
}
