//! Configuration for validation runs.
use crate::{
    metaschemas,
    registry::{SchemaRegistry, DEFAULT_ROOT_URL},
    schemas::Draft,
    validator::Evaluator,
    vocabularies::{Vocabulary, VocabularySet},
    ValidationResult,
};
use serde_json::Value;
use url::Url;

/// Default bound on reference-expansion depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// A builder of validation runs.
///
/// ```rust
/// use jsonvet::Draft;
/// use serde_json::json;
///
/// let options = jsonvet::options()
///     .with_draft(Draft::Draft7)
///     .should_validate_formats(true);
/// assert!(options.is_valid(&json!("joe@example.com"), &json!({"format": "email"})));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions<'r> {
    draft: Option<Draft>,
    validate_formats: Option<bool>,
    reject_unknown_formats: bool,
    max_depth: Option<usize>,
    registry: Option<SchemaRegistry<'r>>,
}

impl<'r> ValidationOptions<'r> {
    /// Force a draft instead of detecting it from `$schema`.
    #[must_use]
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Override the draft's default format-assertion behavior.
    #[must_use]
    pub fn should_validate_formats(mut self, yes: bool) -> Self {
        self.validate_formats = Some(yes);
        self
    }

    /// When set to `false`, a `format` naming no known validator becomes a
    /// schema error instead of being silently accepted.
    #[must_use]
    pub fn should_ignore_unknown_formats(mut self, yes: bool) -> Self {
        self.reject_unknown_formats = !yes;
        self
    }

    /// Bound on reference-expansion depth (default 100).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Supply additional schema documents that `$ref`s may point at.
    #[must_use]
    pub fn with_registry(mut self, registry: SchemaRegistry<'r>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Validate `instance` against `schema`, collecting every error.
    pub fn validate<'i>(&self, instance: &Value, schema: &'i Value) -> ValidationResult
    where
        'r: 'i,
    {
        self.run(instance, schema, false)
    }

    /// Fail-fast variant: stops after the first error.
    pub fn validate_lazy<'i>(&self, instance: &Value, schema: &'i Value) -> ValidationResult
    where
        'r: 'i,
    {
        self.run(instance, schema, true)
    }

    /// Convenience boolean form of [`ValidationOptions::validate`].
    #[must_use]
    pub fn is_valid<'i>(&self, instance: &Value, schema: &'i Value) -> bool
    where
        'r: 'i,
    {
        self.validate_lazy(instance, schema).is_valid()
    }

    /// Validate a schema document against its draft's metaschema.
    pub fn validate_schema(&self, schema: &Value) -> ValidationResult {
        let draft = self
            .draft
            .or_else(|| Draft::detect(schema))
            .unwrap_or_default();
        ValidationOptions {
            draft: Some(draft),
            validate_formats: self.validate_formats,
            reject_unknown_formats: self.reject_unknown_formats,
            max_depth: self.max_depth,
            registry: None,
        }
        .validate(schema, metaschemas::for_draft(draft))
    }

    fn run<'i>(&self, instance: &Value, schema: &'i Value, lazy: bool) -> ValidationResult
    where
        'r: 'i,
    {
        let draft = self
            .draft
            .or_else(|| Draft::detect(schema))
            .unwrap_or_default();

        let mut registry: SchemaRegistry<'i> = metaschemas::registry_for(draft).clone();
        if let Some(user) = &self.registry {
            registry.merge(user);
        }
        let mut base = draft
            .id_of(schema)
            .and_then(|id| Url::parse(id).ok())
            .unwrap_or_else(|| Url::parse(DEFAULT_ROOT_URL).expect("the default root URL parses"));
        base.set_fragment(None);
        registry.add_document(&base, schema);

        let mut vocabularies = VocabularySet::for_draft(draft);
        if let Some(Value::String(meta_uri)) = schema.get("$schema") {
            // A custom metaschema's `$vocabulary` narrows the keyword set.
            if Draft::from_metaschema_uri(meta_uri).is_none() {
                if let Some(custom) = registry
                    .get(meta_uri)
                    .and_then(VocabularySet::from_metaschema)
                {
                    vocabularies = custom;
                }
            }
        }

        let assert_formats = self.validate_formats.unwrap_or_else(|| match draft {
            Draft::Draft4 | Draft::Draft6 | Draft::Draft7 => true,
            Draft::Draft201909 => vocabularies.contains(&Vocabulary::Format),
            Draft::Draft202012 => vocabularies.contains(&Vocabulary::FormatAssertion),
        });

        let evaluator = Evaluator::new(
            draft,
            registry,
            vocabularies,
            assert_formats,
            !self.reject_unknown_formats,
            self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            lazy,
        );
        ValidationResult::from_errors(evaluator.run(instance, schema, base))
    }
}

#[cfg(test)]
mod tests {
    use crate::Draft;
    use serde_json::json;

    #[test]
    fn explicit_draft_wins_over_detection() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "exclusiveMinimum": 5
        });
        // Detected draft 7 treats the bound numerically.
        assert!(!crate::options().is_valid(&json!(5), &schema));
        // Forced draft 4 ignores the numeric form entirely.
        assert!(crate::options()
            .with_draft(Draft::Draft4)
            .is_valid(&json!(5), &schema));
    }

    #[test]
    fn unknown_metaschema_defaults_to_2020() {
        let schema = json!({
            "$schema": "https://example.com/who-knows",
            "prefixItems": [{"type": "integer"}]
        });
        // `prefixItems` only exists in 2020-12.
        assert!(!crate::options().is_valid(&json!(["x"]), &schema));
    }

    #[test]
    fn depth_limit_is_configurable() {
        let schema = json!({
            "$defs": {
                "a": {"items": {"$ref": "#/$defs/a"}}
            },
            "items": {"$ref": "#/$defs/a"}
        });
        let deep = (0..20).fold(json!([]), |acc, _| json!([acc]));
        assert!(crate::options().is_valid(&deep, &schema));
        assert!(!crate::options()
            .with_max_depth(10)
            .is_valid(&deep, &schema));
    }
}
