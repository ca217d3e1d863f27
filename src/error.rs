//! Error types.
use crate::{paths::JsonPointer, primitive_type::PrimitiveType};
use serde_json::Value;
use std::{error, fmt};

/// A single validation failure.
///
/// Carries the failing instance fragment, the kind of failure, and JSON
/// Pointers to both the instance location and the schema keyword that
/// produced the error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Value of the instance fragment that failed validation.
    pub instance: Value,
    /// Type of validation error.
    pub kind: ValidationErrorKind,
    /// Path to the value that failed validation.
    pub instance_path: JsonPointer,
    /// Path to the JSON Schema keyword that failed validation.
    pub schema_path: JsonPointer,
    /// Resolved URI of the failing keyword, when the schema resource has a
    /// non-default base URI. Used by the verbose output format.
    pub absolute_keyword_location: Option<String>,
}

/// Kinds of errors that may happen during validation.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    /// The input array contains more items than expected.
    AdditionalItems { limit: usize },
    /// Unexpected properties.
    AdditionalProperties { unexpected: Vec<String> },
    /// The input value is not valid under any of the schemas listed in the 'anyOf' keyword.
    AnyOf,
    /// The reference cannot be resolved to a schema.
    CannotResolve { reference: String },
    /// The input value doesn't match the expected constant.
    Constant { expected_value: Value },
    /// The input array doesn't contain items conforming to the specified schema.
    Contains,
    /// The input value does not respect the defined contentEncoding.
    ContentEncoding { content_encoding: String },
    /// The input value does not respect the defined contentMediaType.
    ContentMediaType { content_media_type: String },
    /// The input value doesn't match any of the specified options.
    Enum { options: Value },
    /// Value is too large.
    ExclusiveMaximum { limit: Value },
    /// Value is too small.
    ExclusiveMinimum { limit: Value },
    /// Everything is invalid for the `false` schema.
    FalseSchema,
    /// The input doesn't match the specified format.
    Format { format: String },
    /// A fragment is a syntactically valid JSON Pointer, but the path it
    /// denotes does not exist in the schema.
    InvalidPointer { pointer: String },
    /// The `pattern`, `patternProperties` or `format: regex` operand is not a
    /// valid regular expression.
    InvalidRegex { pattern: String },
    /// A keyword operand has the wrong shape (e.g. a non-array `enum`).
    /// Makes every instance fail against the offending keyword.
    InvalidSchema { message: String },
    /// Too few matching items in an array.
    MinContains { limit: u64 },
    /// Too many matching items in an array.
    MaxContains { limit: u64 },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// Value is too large.
    Maximum { limit: Value },
    /// String is too long.
    MaxLength { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Value is too small.
    Minimum { limit: Value },
    /// String is too short.
    MinLength { limit: u64 },
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// The number is not a multiple of another number.
    MultipleOf { multiple_of: Value },
    /// The negated schema matched.
    Not { schema: Value },
    /// The input matched more than one of the schemas listed in 'oneOf'.
    OneOfMultipleValid,
    /// The input did not match any of the schemas listed in 'oneOf'.
    OneOfNotValid,
    /// The input doesn't match the given pattern.
    Pattern { pattern: String },
    /// An object property name does not satisfy the `propertyNames` schema.
    PropertyNames { property: String },
    /// The recursion limit was reached while expanding references.
    Recursion,
    /// A required property is missing.
    Required { property: Value },
    /// The input value doesn't match one or several required types.
    Type { kind: TypeKind },
    /// Array indices not covered by any sibling applicator failed the
    /// `unevaluatedItems` schema.
    UnevaluatedItems { unexpected: Vec<usize> },
    /// Object keys not covered by any sibling applicator failed the
    /// `unevaluatedProperties` schema.
    UnevaluatedProperties { unexpected: Vec<String> },
    /// The input array has non-unique elements.
    UniqueItems,
}

/// Expected type(s) for the `type` keyword.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum TypeKind {
    Single(PrimitiveType),
    Multiple(Vec<PrimitiveType>),
}

/// Shortcuts for creation of specific error kinds.
impl ValidationError {
    fn new(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        kind: ValidationErrorKind,
    ) -> ValidationError {
        ValidationError {
            instance: instance.clone(),
            kind,
            instance_path,
            schema_path,
            absolute_keyword_location: None,
        }
    }

    pub(crate) fn additional_items(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: usize,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::AdditionalItems { limit },
        )
    }

    pub(crate) fn additional_properties(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        unexpected: Vec<String>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::AdditionalProperties { unexpected },
        )
    }

    pub(crate) fn any_of(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::AnyOf,
        )
    }

    pub(crate) fn cannot_resolve(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        reference: String,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::CannotResolve { reference },
        )
    }

    pub(crate) fn constant(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        expected_value: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Constant {
                expected_value: expected_value.clone(),
            },
        )
    }

    pub(crate) fn contains(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Contains,
        )
    }

    pub(crate) fn content_encoding(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        encoding: &str,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::ContentEncoding {
                content_encoding: encoding.to_string(),
            },
        )
    }

    pub(crate) fn content_media_type(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        media_type: &str,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::ContentMediaType {
                content_media_type: media_type.to_string(),
            },
        )
    }

    pub(crate) fn enumeration(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        options: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Enum {
                options: options.clone(),
            },
        )
    }

    pub(crate) fn exclusive_maximum(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::ExclusiveMaximum { limit },
        )
    }

    pub(crate) fn exclusive_minimum(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::ExclusiveMinimum { limit },
        )
    }

    pub(crate) fn false_schema(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::FalseSchema,
        )
    }

    pub(crate) fn format(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        format: impl Into<String>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Format {
                format: format.into(),
            },
        )
    }

    pub(crate) fn invalid_pointer(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        pointer: String,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::InvalidPointer { pointer },
        )
    }

    pub(crate) fn invalid_regex(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        pattern: &str,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::InvalidRegex {
                pattern: pattern.to_string(),
            },
        )
    }

    pub(crate) fn invalid_schema(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        message: impl Into<String>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::InvalidSchema {
                message: message.into(),
            },
        )
    }

    pub(crate) fn min_contains(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MinContains { limit },
        )
    }

    pub(crate) fn max_contains(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MaxContains { limit },
        )
    }

    pub(crate) fn max_items(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MaxItems { limit },
        )
    }

    pub(crate) fn maximum(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Maximum { limit },
        )
    }

    pub(crate) fn max_length(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MaxLength { limit },
        )
    }

    pub(crate) fn max_properties(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MaxProperties { limit },
        )
    }

    pub(crate) fn min_items(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MinItems { limit },
        )
    }

    pub(crate) fn minimum(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Minimum { limit },
        )
    }

    pub(crate) fn min_length(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MinLength { limit },
        )
    }

    pub(crate) fn min_properties(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MinProperties { limit },
        )
    }

    pub(crate) fn multiple_of(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        multiple_of: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::MultipleOf { multiple_of },
        )
    }

    pub(crate) fn not(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        schema: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Not {
                schema: schema.clone(),
            },
        )
    }

    pub(crate) fn one_of_multiple_valid(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::OneOfMultipleValid,
        )
    }

    pub(crate) fn one_of_not_valid(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::OneOfNotValid,
        )
    }

    pub(crate) fn pattern(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        pattern: &str,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Pattern {
                pattern: pattern.to_string(),
            },
        )
    }

    pub(crate) fn property_names(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        property: String,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::PropertyNames { property },
        )
    }

    pub(crate) fn recursion(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Recursion,
        )
    }

    pub(crate) fn required(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        property: Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Required { property },
        )
    }

    pub(crate) fn single_type_error(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        type_name: PrimitiveType,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Type {
                kind: TypeKind::Single(type_name),
            },
        )
    }

    pub(crate) fn multiple_type_error(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        types: Vec<PrimitiveType>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            },
        )
    }

    pub(crate) fn unevaluated_items(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        unexpected: Vec<usize>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::UnevaluatedItems { unexpected },
        )
    }

    pub(crate) fn unevaluated_properties(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
        unexpected: Vec<String>,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::UnevaluatedProperties { unexpected },
        )
    }

    pub(crate) fn unique_items(
        schema_path: JsonPointer,
        instance_path: JsonPointer,
        instance: &Value,
    ) -> ValidationError {
        Self::new(
            schema_path,
            instance_path,
            instance,
            ValidationErrorKind::UniqueItems,
        )
    }

    /// Name of the keyword that produced this error.
    ///
    /// Boolean `false` schemas report `"false"` and recursion-limit errors
    /// report `"$ref"`; every other kind maps to its keyword. Schema
    /// authoring errors fall back to the last keyword component of the
    /// schema path.
    #[must_use]
    pub fn keyword(&self) -> &str {
        match &self.kind {
            ValidationErrorKind::AdditionalItems { .. } => "additionalItems",
            ValidationErrorKind::AdditionalProperties { .. } => "additionalProperties",
            ValidationErrorKind::AnyOf => "anyOf",
            ValidationErrorKind::CannotResolve { .. } | ValidationErrorKind::Recursion => "$ref",
            ValidationErrorKind::Constant { .. } => "const",
            ValidationErrorKind::Contains => "contains",
            ValidationErrorKind::ContentEncoding { .. } => "contentEncoding",
            ValidationErrorKind::ContentMediaType { .. } => "contentMediaType",
            ValidationErrorKind::Enum { .. } => "enum",
            ValidationErrorKind::ExclusiveMaximum { .. } => "exclusiveMaximum",
            ValidationErrorKind::ExclusiveMinimum { .. } => "exclusiveMinimum",
            ValidationErrorKind::FalseSchema => "false",
            ValidationErrorKind::Format { .. } => "format",
            ValidationErrorKind::InvalidPointer { .. } => "$ref",
            ValidationErrorKind::InvalidRegex { .. }
            | ValidationErrorKind::InvalidSchema { .. } => self
                .schema_path
                .last()
                .map_or("$schema", |chunk| match chunk {
                    crate::paths::PathChunk::Keyword(keyword) => keyword,
                    crate::paths::PathChunk::Property(name) => name.as_ref(),
                    crate::paths::PathChunk::Index(_) => "$schema",
                }),
            ValidationErrorKind::MinContains { .. } => "minContains",
            ValidationErrorKind::MaxContains { .. } => "maxContains",
            ValidationErrorKind::MaxItems { .. } => "maxItems",
            ValidationErrorKind::Maximum { .. } => "maximum",
            ValidationErrorKind::MaxLength { .. } => "maxLength",
            ValidationErrorKind::MaxProperties { .. } => "maxProperties",
            ValidationErrorKind::MinItems { .. } => "minItems",
            ValidationErrorKind::Minimum { .. } => "minimum",
            ValidationErrorKind::MinLength { .. } => "minLength",
            ValidationErrorKind::MinProperties { .. } => "minProperties",
            ValidationErrorKind::MultipleOf { .. } => "multipleOf",
            ValidationErrorKind::Not { .. } => "not",
            ValidationErrorKind::OneOfMultipleValid | ValidationErrorKind::OneOfNotValid => "oneOf",
            ValidationErrorKind::Pattern { .. } => "pattern",
            ValidationErrorKind::PropertyNames { .. } => "propertyNames",
            ValidationErrorKind::Required { .. } => "required",
            ValidationErrorKind::Type { .. } => "type",
            ValidationErrorKind::UnevaluatedItems { .. } => "unevaluatedItems",
            ValidationErrorKind::UnevaluatedProperties { .. } => "unevaluatedProperties",
            ValidationErrorKind::UniqueItems => "uniqueItems",
        }
    }
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::AdditionalItems { limit } => {
                write!(f, "Additional items are not allowed ({limit} items at most)")
            }
            ValidationErrorKind::AdditionalProperties { unexpected } => write!(
                f,
                "Additional properties are not allowed ({} unexpected)",
                format_property_list(unexpected),
            ),
            ValidationErrorKind::AnyOf => write!(
                f,
                "{} is not valid under any of the given schemas",
                self.instance
            ),
            ValidationErrorKind::CannotResolve { reference } => {
                write!(f, "Cannot resolve reference: {reference}")
            }
            ValidationErrorKind::Constant { expected_value } => {
                write!(f, "{expected_value} was expected")
            }
            ValidationErrorKind::Contains => write!(
                f,
                "None of {} are valid under the given schema",
                self.instance
            ),
            ValidationErrorKind::ContentEncoding { content_encoding } => {
                write!(f, "{} is not compliant with {content_encoding} content encoding", self.instance)
            }
            ValidationErrorKind::ContentMediaType { content_media_type } => {
                write!(f, "{} is not compliant with {content_media_type} media type", self.instance)
            }
            ValidationErrorKind::Enum { options } => {
                write!(f, "{} is not one of {options}", self.instance)
            }
            ValidationErrorKind::ExclusiveMaximum { limit } => {
                write!(f, "{} is greater than or equal to the maximum of {limit}", self.instance)
            }
            ValidationErrorKind::ExclusiveMinimum { limit } => {
                write!(f, "{} is less than or equal to the minimum of {limit}", self.instance)
            }
            ValidationErrorKind::FalseSchema => {
                write!(f, "False schema does not allow {}", self.instance)
            }
            ValidationErrorKind::Format { format } => {
                write!(f, "{} is not a {format:?}", self.instance)
            }
            ValidationErrorKind::InvalidPointer { pointer } => {
                write!(f, "Invalid JSON pointer: {pointer}")
            }
            ValidationErrorKind::InvalidRegex { pattern } => {
                write!(f, "{pattern:?} is not a valid regular expression")
            }
            ValidationErrorKind::InvalidSchema { message } => f.write_str(message),
            ValidationErrorKind::MinContains { limit } => write!(
                f,
                "Fewer than {limit} items in {} are valid under the given schema",
                self.instance
            ),
            ValidationErrorKind::MaxContains { limit } => write!(
                f,
                "More than {limit} items in {} are valid under the given schema",
                self.instance
            ),
            ValidationErrorKind::MaxItems { limit } => {
                write!(f, "{} has more than {limit} item{}", self.instance, plural(*limit))
            }
            ValidationErrorKind::Maximum { limit } => {
                write!(f, "{} is greater than the maximum of {limit}", self.instance)
            }
            ValidationErrorKind::MaxLength { limit } => {
                write!(f, "{} is longer than {limit} character{}", self.instance, plural(*limit))
            }
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{} has more than {limit} propert{}",
                self.instance,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MinItems { limit } => {
                write!(f, "{} has less than {limit} item{}", self.instance, plural(*limit))
            }
            ValidationErrorKind::Minimum { limit } => {
                write!(f, "{} is less than the minimum of {limit}", self.instance)
            }
            ValidationErrorKind::MinLength { limit } => {
                write!(f, "{} is shorter than {limit} character{}", self.instance, plural(*limit))
            }
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{} has less than {limit} propert{}",
                self.instance,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {multiple_of}", self.instance)
            }
            ValidationErrorKind::Not { schema } => {
                write!(f, "{} is not allowed for {}", schema, self.instance)
            }
            ValidationErrorKind::OneOfMultipleValid => write!(
                f,
                "{} is valid under more than one of the given schemas",
                self.instance
            ),
            ValidationErrorKind::OneOfNotValid => write!(
                f,
                "{} is not valid under any of the given schemas",
                self.instance
            ),
            ValidationErrorKind::Pattern { pattern } => {
                write!(f, "{} does not match {pattern:?}", self.instance)
            }
            ValidationErrorKind::PropertyNames { property } => {
                write!(f, "Property name {property:?} is not valid under the given schema")
            }
            ValidationErrorKind::Recursion => {
                write!(f, "Recursion limit reached while resolving references")
            }
            ValidationErrorKind::Required { property } => {
                write!(f, "{property} is a required property")
            }
            ValidationErrorKind::Type {
                kind: TypeKind::Single(type_),
            } => write!(f, "{} is not of type \"{type_}\"", self.instance),
            ValidationErrorKind::Type {
                kind: TypeKind::Multiple(types),
            } => {
                write!(f, "{} is not of types ", self.instance)?;
                let mut iter = types.iter();
                if let Some(t) = iter.next() {
                    write!(f, "\"{t}\"")?;
                }
                for t in iter {
                    write!(f, ", \"{t}\"")?;
                }
                Ok(())
            }
            ValidationErrorKind::UnevaluatedItems { unexpected } => write!(
                f,
                "Unevaluated items are not allowed ({} unexpected)",
                format_index_list(unexpected),
            ),
            ValidationErrorKind::UnevaluatedProperties { unexpected } => write!(
                f,
                "Unevaluated properties are not allowed ({} unexpected)",
                format_property_list(unexpected),
            ),
            ValidationErrorKind::UniqueItems => {
                write!(f, "{} has non-unique elements", self.instance)
            }
        }
    }
}

const fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn format_property_list(unexpected: &[String]) -> String {
    let mut buffer = String::new();
    let mut iter = unexpected.iter();
    if let Some(property) = iter.next() {
        buffer.push('\'');
        buffer.push_str(property);
        buffer.push('\'');
    }
    for property in iter {
        buffer.push_str(", '");
        buffer.push_str(property);
        buffer.push('\'');
    }
    buffer
}

fn format_index_list(unexpected: &[usize]) -> String {
    let mut buffer = String::new();
    let mut iter = unexpected.iter();
    let mut itoa_buffer = itoa::Buffer::new();
    if let Some(index) = iter.next() {
        buffer.push_str(itoa_buffer.format(*index));
    }
    for index in iter {
        buffer.push_str(", ");
        buffer.push_str(itoa_buffer.format(*index));
    }
    buffer
}
