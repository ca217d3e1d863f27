//! The keyword dispatcher: walks schema and instance in lockstep.
//!
//! One `Evaluator` lives for the duration of a single top-level validation
//! call. It owns the registry, the dynamic scope, the error accumulator and
//! both location pointers; keyword handlers live in [`crate::keywords`] as
//! further `impl` blocks on this type.
//!
//! Speculative runs (branches of `anyOf`/`oneOf`, the inner schema of `not`,
//! the `if` condition) work by saving the error-list length, running the
//! branch, and truncating back when the branch's errors must not surface.
use crate::{
    error::ValidationError,
    evaluation::EvaluationState,
    paths::{JsonPointer, PathChunk},
    registry::SchemaRegistry,
    schemas::Draft,
    scope::DynamicScope,
    vocabularies::{is_keyword_allowed, VocabularySet},
};
use ahash::AHashSet;
use serde_json::{Map, Value};
use url::Url;

pub(crate) struct Evaluator<'s> {
    pub(crate) draft: Draft,
    pub(crate) registry: SchemaRegistry<'s>,
    pub(crate) scope: DynamicScope,
    pub(crate) vocabularies: VocabularySet,
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) instance_path: JsonPointer,
    pub(crate) schema_path: JsonPointer,
    pub(crate) assert_formats: bool,
    pub(crate) ignore_unknown_formats: bool,
    pub(crate) max_depth: usize,
    pub(crate) ref_depth: usize,
    pub(crate) lazy: bool,
    pub(crate) halted: bool,
    probe_depth: usize,
    pub(crate) seen: AHashSet<(usize, String)>,
    pub(crate) pattern_cache: ahash::AHashMap<String, Option<fancy_regex::Regex>>,
    root: *const Value,
}

impl<'s> Evaluator<'s> {
    #[allow(clippy::fn_params_excessive_bools)]
    pub(crate) fn new(
        draft: Draft,
        registry: SchemaRegistry<'s>,
        vocabularies: VocabularySet,
        assert_formats: bool,
        ignore_unknown_formats: bool,
        max_depth: usize,
        lazy: bool,
    ) -> Self {
        Evaluator {
            draft,
            registry,
            scope: DynamicScope::default(),
            vocabularies,
            errors: Vec::new(),
            instance_path: JsonPointer::new(),
            schema_path: JsonPointer::new(),
            assert_formats,
            ignore_unknown_formats,
            max_depth,
            ref_depth: 0,
            lazy,
            halted: false,
            probe_depth: 0,
            seen: AHashSet::new(),
            pattern_cache: ahash::AHashMap::new(),
            root: std::ptr::null(),
        }
    }

    /// Run a full validation of `instance` against the root `schema`, whose
    /// base URI must already be registered.
    pub(crate) fn run(
        mut self,
        instance: &Value,
        schema: &'s Value,
        base: Url,
    ) -> Vec<ValidationError> {
        self.root = schema;
        let recursive = self.draft == Draft::Draft201909
            && schema.get("$recursiveAnchor") == Some(&Value::Bool(true));
        self.scope.push(base, recursive, JsonPointer::new(), 0);
        let mut state = EvaluationState::new();
        self.apply(instance, schema, &mut state);
        if self.lazy {
            self.errors.truncate(1);
        }
        self.errors
    }

    /// Validate `instance` against `schema`, accumulating errors and marking
    /// evaluated children in `state`. Returns validity.
    pub(crate) fn apply(
        &mut self,
        instance: &Value,
        schema: &'s Value,
        state: &mut EvaluationState,
    ) -> bool {
        match schema {
            Value::Bool(true) => true,
            Value::Bool(false) => self.record(ValidationError::false_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
            )),
            Value::Object(map) => {
                if map.is_empty() {
                    return true;
                }
                self.apply_object(instance, schema, map, state)
            }
            _ => self.record(ValidationError::invalid_schema(
                self.schema_path.clone(),
                self.instance_path.clone(),
                instance,
                "schema must be an object or a boolean",
            )),
        }
    }

    fn apply_object(
        &mut self,
        instance: &Value,
        schema: &'s Value,
        map: &'s Map<String, Value>,
        state: &mut EvaluationState,
    ) -> bool {
        let pushed = self.maybe_push_resource(schema, map);

        // Pre-2019 drafts: a `$ref` hides every sibling keyword.
        if self.draft.ref_overrides_siblings() {
            if let Some(Value::String(reference)) = map.get("$ref") {
                let valid = self.apply_ref("$ref", reference, instance, state);
                if pushed {
                    self.scope.pop();
                }
                return valid;
            }
        }

        let mut valid = true;

        if !self.draft.ref_overrides_siblings() {
            if let Some(Value::String(reference)) = map.get("$ref") {
                if self.keyword_enabled("$ref") {
                    valid &= self.apply_ref("$ref", reference, instance, state);
                }
            }
            if let Some(Value::String(reference)) = map.get("$recursiveRef") {
                if self.keyword_enabled("$recursiveRef") {
                    valid &= self.apply_recursive_ref(reference, instance, state);
                }
            }
            if let Some(Value::String(reference)) = map.get("$dynamicRef") {
                if self.keyword_enabled("$dynamicRef") {
                    valid &= self.apply_dynamic_ref(reference, instance, state);
                }
            }
        }
        if self.halted {
            if pushed {
                self.scope.pop();
            }
            return valid;
        }

        // Assertions.
        valid &= self.validate_type(map, instance);
        valid &= self.validate_enum(map, instance);
        valid &= self.validate_const(map, instance);
        valid &= self.validate_numeric_keywords(map, instance);
        valid &= self.validate_string_keywords(map, instance);
        valid &= self.validate_format(map, instance);
        valid &= self.validate_content(map, instance);
        valid &= self.validate_required(map, instance);
        valid &= self.validate_dependent_required(map, instance);
        valid &= self.validate_object_limits(map, instance);
        valid &= self.validate_array_limits(map, instance);
        valid &= self.validate_unique_items(map, instance);
        if self.halted {
            if pushed {
                self.scope.pop();
            }
            return valid;
        }

        // Applicators.
        valid &= self.validate_property_names(map, instance);
        valid &= self.validate_properties(map, instance, state);
        valid &= self.validate_dependent_schemas(map, instance, state);
        valid &= self.validate_items(map, instance, state);
        valid &= self.validate_contains(map, instance, state);
        valid &= self.validate_in_place_applicators(map, instance, state);
        if self.halted {
            if pushed {
                self.scope.pop();
            }
            return valid;
        }

        // `unevaluated*` run last, over the now-complete evaluation state.
        valid &= self.validate_unevaluated_items(map, instance, state);
        valid &= self.validate_unevaluated_properties(map, instance, state);

        if pushed {
            self.scope.pop();
        }
        valid
    }

    /// Enter a new schema resource when this subschema declares an `$id`.
    fn maybe_push_resource(&mut self, schema: &'s Value, map: &'s Map<String, Value>) -> bool {
        if std::ptr::eq(schema, self.root) {
            // The root frame is pushed by `run`.
            return false;
        }
        let Some(id) = self.draft.id_of(schema) else {
            return false;
        };
        if id.starts_with('#') {
            // Legacy anchor form, not a new base.
            return false;
        }
        let Ok(mut base) = self.scope.base().join(id) else {
            return false;
        };
        base.set_fragment(None);
        let recursive = self.draft == Draft::Draft201909
            && map.get("$recursiveAnchor") == Some(&Value::Bool(true));
        self.scope
            .push(base, recursive, JsonPointer::new(), self.schema_path.len());
        true
    }

    /// Record an error, filling in the absolute keyword location. Always
    /// returns `false` so handlers can `return self.record(...)`.
    pub(crate) fn record(&mut self, mut error: ValidationError) -> bool {
        error.absolute_keyword_location = self.absolute_keyword_location();
        self.errors.push(error);
        if self.lazy && self.probe_depth == 0 {
            self.halted = true;
        }
        false
    }

    fn absolute_keyword_location(&self) -> Option<String> {
        let frame = self.scope.current();
        if frame.base.scheme() == "json-schema" {
            return None;
        }
        let relative = frame
            .resource_pointer
            .extend_with(&self.schema_path.as_slice()[frame.path_mark..]);
        Some(format!("{}#{}", frame.base, relative))
    }

    pub(crate) fn keyword_enabled(&self, keyword: &str) -> bool {
        self.draft.is_known_keyword(keyword)
            && is_keyword_allowed(self.draft, keyword, &self.vocabularies)
    }

    /// Start a speculative run: errors recorded after this call can be
    /// discarded with [`Evaluator::end_probe`].
    pub(crate) fn begin_probe(&mut self) -> usize {
        self.probe_depth += 1;
        self.errors.len()
    }

    /// Finish a speculative run, keeping or discarding its errors.
    pub(crate) fn end_probe(&mut self, mark: usize, keep_errors: bool) {
        self.probe_depth -= 1;
        if !keep_errors {
            self.errors.truncate(mark);
        }
    }

    /// Run `schema` against `instance` without letting any errors surface.
    /// The evaluation state is only merged on success.
    pub(crate) fn probe(
        &mut self,
        instance: &Value,
        schema: &'s Value,
        state: &mut EvaluationState,
    ) -> bool {
        let mark = self.begin_probe();
        let mut child = EvaluationState::new();
        let valid = self.apply(instance, schema, &mut child);
        self.end_probe(mark, false);
        if valid {
            state.merge(child);
        }
        valid
    }

    pub(crate) fn push_schema(&mut self, chunk: impl Into<PathChunk>) {
        self.schema_path.push(chunk);
    }

    pub(crate) fn pop_schema(&mut self) {
        self.schema_path.pop();
    }

    pub(crate) fn push_instance(&mut self, chunk: impl Into<PathChunk>) {
        self.instance_path.push(chunk);
    }

    pub(crate) fn pop_instance(&mut self) {
        self.instance_path.pop();
    }
}
