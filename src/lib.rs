//! A multi-draft JSON Schema validator.
//!
//! `jsonvet` decides whether a JSON instance satisfies a JSON Schema
//! written to draft 4, 6, 7, 2019-09 or 2020-12, reporting structured
//! errors with instance and keyword locations.
//!
//! # One-off validation
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({"type": "string", "minLength": 3});
//! assert!(jsonvet::is_valid(&json!("hello"), &schema, None));
//! assert!(!jsonvet::is_valid(&json!("hi"), &schema, None));
//! ```
//!
//! # Inspecting errors
//!
//! ```rust
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {"age": {"type": "integer", "minimum": 0}},
//!     "required": ["name"]
//! });
//! let result = jsonvet::validate(&json!({"age": -1}), &schema, None);
//! assert!(!result.is_valid());
//! for error in result.errors() {
//!     println!("{} at {}", error, error.instance_path);
//! }
//! ```
//!
//! # Drafts
//!
//! The draft is detected from `$schema`, falling back to 2020-12; pass
//! `Some(draft)` (or use [`options`]) to force one:
//!
//! ```rust
//! use jsonvet::Draft;
//! use serde_json::json;
//!
//! // Draft 4 has no integer-valued floats.
//! assert!(!jsonvet::is_valid(&json!(1.0), &json!({"type": "integer"}), Some(Draft::Draft4)));
//! assert!(jsonvet::is_valid(&json!(1.0), &json!({"type": "integer"}), Some(Draft::Draft7)));
//! ```
//!
//! # Output formats
//!
//! Results convert to the `flag`, `basic`, `detailed` and `verbose` output
//! formats through [`ValidationResult::output`], all serializable with
//! `serde`.
//!
//! # Custom formats
//!
//! The [`formats`] module holds a process-wide registry for user format
//! validators; populate it during startup, before validation begins.
mod content;
mod ecma;
pub mod error;
mod evaluation;
pub mod formats;
mod keywords;
mod metaschemas;
pub mod options;
pub mod output;
pub mod paths;
pub mod primitive_type;
mod registry;
mod resolver;
mod schemas;
mod scope;
mod validator;
pub mod vocabularies;

pub use error::{ValidationError, ValidationErrorKind};
pub use options::ValidationOptions;
pub use output::Output;
pub use registry::SchemaRegistry;
pub use resolver::RefError;
pub use schemas::Draft;
pub use vocabularies::active_vocabularies;

use serde_json::Value;

/// The outcome of a validation run. `is_valid()` holds exactly when the
/// error list is empty (fail-fast runs stop at one error).
#[derive(Debug)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<ValidationError>) -> ValidationResult {
        ValidationResult { errors }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Adapter for the spec's output formats.
    #[must_use]
    pub fn output(&self) -> Output<'_> {
        Output::new(self)
    }
}

/// Entry point for configured validation runs.
#[must_use]
pub fn options<'r>() -> ValidationOptions<'r> {
    ValidationOptions::default()
}

/// Validate `instance` against `schema`, collecting every error.
///
/// The draft is taken from the argument when given, otherwise detected from
/// the schema's `$schema`, otherwise 2020-12.
#[must_use]
pub fn validate(instance: &Value, schema: &Value, draft: Option<Draft>) -> ValidationResult {
    with_draft(draft).validate(instance, schema)
}

/// Convenience boolean form of [`validate`].
#[must_use]
pub fn is_valid(instance: &Value, schema: &Value, draft: Option<Draft>) -> bool {
    with_draft(draft).is_valid(instance, schema)
}

/// Fail-fast validation: returns after the first error, so the result
/// carries at most one.
#[must_use]
pub fn validate_lazy(instance: &Value, schema: &Value, draft: Option<Draft>) -> ValidationResult {
    with_draft(draft).validate_lazy(instance, schema)
}

/// Validate a schema document against its draft's metaschema.
#[must_use]
pub fn validate_schema(schema: &Value, draft: Option<Draft>) -> ValidationResult {
    with_draft(draft).validate_schema(schema)
}

fn with_draft<'r>(draft: Option<Draft>) -> ValidationOptions<'r> {
    match draft {
        Some(draft) => options().with_draft(draft),
        None => options(),
    }
}

#[cfg(test)]
pub(crate) mod tests_util {
    use crate::{Draft, ValidationError};
    use serde_json::Value;

    pub(crate) fn is_valid(schema: &Value, instance: &Value) {
        let result = crate::validate(instance, schema, None);
        assert!(
            result.is_valid(),
            "{instance} should be valid. Errors: {:?}",
            result.errors()
        );
        assert!(crate::is_valid(instance, schema, None));
        assert!(crate::validate_lazy(instance, schema, None).is_valid());
    }

    pub(crate) fn is_not_valid(schema: &Value, instance: &Value) {
        let result = crate::validate(instance, schema, None);
        assert!(!result.is_valid(), "{instance} should not be valid");
        assert!(
            !result.errors().is_empty(),
            "invalid results must carry errors"
        );
        assert!(!crate::is_valid(instance, schema, None));
        let lazy = crate::validate_lazy(instance, schema, None);
        assert!(!lazy.is_valid());
        assert_eq!(lazy.errors().len(), 1, "lazy runs stop at one error");
    }

    pub(crate) fn is_valid_with_draft(draft: Draft, schema: &Value, instance: &Value) {
        let result = crate::validate(instance, schema, Some(draft));
        assert!(
            result.is_valid(),
            "{instance} should be valid under {draft:?}. Errors: {:?}",
            result.errors()
        );
    }

    pub(crate) fn is_not_valid_with_draft(draft: Draft, schema: &Value, instance: &Value) {
        assert!(
            !crate::validate(instance, schema, Some(draft)).is_valid(),
            "{instance} should not be valid under {draft:?}"
        );
    }

    pub(crate) fn first_error(schema: &Value, instance: &Value) -> ValidationError {
        crate::validate(instance, schema, None)
            .into_errors()
            .into_iter()
            .next()
            .expect("should be an error")
    }

    pub(crate) fn assert_schema_path(schema: &Value, instance: &Value, expected: &str) {
        let error = first_error(schema, instance);
        assert_eq!(error.schema_path.to_string(), expected);
    }

    pub(crate) fn assert_schema_path_with_draft(
        draft: Draft,
        schema: &Value,
        instance: &Value,
        expected: &str,
    ) {
        let error = crate::validate(instance, schema, Some(draft))
            .into_errors()
            .into_iter()
            .next()
            .expect("should be an error");
        assert_eq!(error.schema_path.to_string(), expected);
    }
}
