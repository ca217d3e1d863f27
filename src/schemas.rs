//! JSON Schema draft versions and their per-draft behavior tables.
use serde_json::Value;

/// JSON Schema specification versions.
#[non_exhaustive]
#[derive(Debug, Default, PartialEq, Copy, Clone, Hash, Eq, PartialOrd, Ord)]
pub enum Draft {
    /// JSON Schema Draft 4
    Draft4,
    /// JSON Schema Draft 6
    Draft6,
    /// JSON Schema Draft 7
    Draft7,
    /// JSON Schema Draft 2019-09
    Draft201909,
    /// JSON Schema Draft 2020-12
    #[default]
    Draft202012,
}

impl Draft {
    /// Detect the draft from the document's `$schema` value.
    ///
    /// Returns `None` when `$schema` is absent or does not name a known
    /// metaschema. A trailing `#` is tolerated, as are `http`/`https`
    /// variants of the pre-2019 URIs.
    #[must_use]
    pub fn detect(contents: &Value) -> Option<Draft> {
        let uri = contents
            .as_object()
            .and_then(|contents| contents.get("$schema"))
            .and_then(Value::as_str)?;
        Draft::from_metaschema_uri(uri)
    }

    pub(crate) fn from_metaschema_uri(uri: &str) -> Option<Draft> {
        match uri.trim_end_matches('#') {
            "https://json-schema.org/draft/2020-12/schema" => Some(Draft::Draft202012),
            "https://json-schema.org/draft/2019-09/schema" => Some(Draft::Draft201909),
            "http://json-schema.org/draft-07/schema" | "https://json-schema.org/draft-07/schema" => {
                Some(Draft::Draft7)
            }
            "http://json-schema.org/draft-06/schema" | "https://json-schema.org/draft-06/schema" => {
                Some(Draft::Draft6)
            }
            "http://json-schema.org/draft-04/schema" | "https://json-schema.org/draft-04/schema" => {
                Some(Draft::Draft4)
            }
            _ => None,
        }
    }

    /// URI of this draft's metaschema.
    #[must_use]
    pub const fn metaschema_uri(self) -> &'static str {
        match self {
            Draft::Draft4 => "http://json-schema.org/draft-04/schema",
            Draft::Draft6 => "http://json-schema.org/draft-06/schema",
            Draft::Draft7 => "http://json-schema.org/draft-07/schema",
            Draft::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            Draft::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    /// The keyword that establishes a new base URI in this draft.
    pub(crate) const fn id_keyword(self) -> &'static str {
        match self {
            Draft::Draft4 => "id",
            _ => "$id",
        }
    }

    /// Extract this draft's `$id` (or legacy `id`) from a schema object.
    pub(crate) fn id_of(self, contents: &Value) -> Option<&str> {
        contents
            .as_object()
            .and_then(|schema| schema.get(self.id_keyword()))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Whether `$ref` suppresses its sibling keywords (drafts 4, 6 and 7).
    pub(crate) const fn ref_overrides_siblings(self) -> bool {
        matches!(self, Draft::Draft4 | Draft::Draft6 | Draft::Draft7)
    }

    /// Whether `"integer"` excludes floats with a zero fractional part
    /// (draft 4 only; later drafts accept `1.0` as an integer).
    pub(crate) const fn strict_integer_type(self) -> bool {
        matches!(self, Draft::Draft4)
    }

    /// Whether `exclusiveMinimum`/`exclusiveMaximum` are boolean modifiers of
    /// `minimum`/`maximum` (draft 4) rather than standalone numeric bounds.
    pub(crate) const fn boolean_exclusive_bounds(self) -> bool {
        matches!(self, Draft::Draft4)
    }

    /// Whether `format` is an assertion by default in this draft.
    ///
    /// From 2019-09 on, format assertion requires the format(-assertion)
    /// vocabulary to be active.
    pub(crate) const fn asserts_formats_by_default(self) -> bool {
        matches!(self, Draft::Draft4 | Draft::Draft6 | Draft::Draft7)
    }

    /// Identifies known JSON Schema keywords per draft.
    #[must_use]
    pub fn is_known_keyword(self, keyword: &str) -> bool {
        match keyword {
            "$ref"
            | "$schema"
            | "additionalProperties"
            | "allOf"
            | "anyOf"
            | "definitions"
            | "dependencies"
            | "enum"
            | "exclusiveMaximum"
            | "exclusiveMinimum"
            | "format"
            | "items"
            | "maxItems"
            | "maxLength"
            | "maxProperties"
            | "maximum"
            | "minItems"
            | "minLength"
            | "minProperties"
            | "minimum"
            | "multipleOf"
            | "not"
            | "oneOf"
            | "pattern"
            | "patternProperties"
            | "properties"
            | "required"
            | "type"
            | "uniqueItems" => true,

            "additionalItems" if self != Draft::Draft202012 => true,

            "id" if self == Draft::Draft4 => true,

            "$id" | "const" | "contains" | "propertyNames" if self >= Draft::Draft6 => true,

            "contentEncoding" | "contentMediaType" if self >= Draft::Draft6 => true,

            "else" | "if" | "then" | "$comment" if self >= Draft::Draft7 => true,

            "$anchor"
            | "$defs"
            | "$vocabulary"
            | "dependentRequired"
            | "dependentSchemas"
            | "maxContains"
            | "minContains"
            | "unevaluatedItems"
            | "unevaluatedProperties"
            | "contentSchema"
                if self >= Draft::Draft201909 =>
            {
                true
            }

            "$recursiveAnchor" | "$recursiveRef" if self == Draft::Draft201909 => true,

            "$dynamicAnchor" | "$dynamicRef" | "prefixItems" if self == Draft::Draft202012 => true,

            _ => false,
        }
    }

    /// Whether `dependencies` carries schema/required semantics in this draft.
    /// 2019-09 split it into `dependentSchemas` and `dependentRequired`.
    pub(crate) const fn supports_dependencies(self) -> bool {
        matches!(self, Draft::Draft4 | Draft::Draft6 | Draft::Draft7)
    }

    /// Whether `contentEncoding`/`contentMediaType` are assertions. They were
    /// introduced as assertions in draft 6/7 and demoted to annotations in
    /// 2019-09.
    pub(crate) const fn asserts_content(self) -> bool {
        matches!(self, Draft::Draft6 | Draft::Draft7)
    }
}

#[cfg(test)]
mod tests {
    use super::Draft;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema"}), Some(Draft::Draft202012); "detect Draft 2020-12")]
    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2020-12/schema#"}), Some(Draft::Draft202012); "detect Draft 2020-12 with fragment")]
    #[test_case(&json!({"$schema": "https://json-schema.org/draft/2019-09/schema"}), Some(Draft::Draft201909); "detect Draft 2019-09")]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-07/schema#"}), Some(Draft::Draft7); "detect Draft 7")]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-06/schema"}), Some(Draft::Draft6); "detect Draft 6")]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-04/schema"}), Some(Draft::Draft4); "detect Draft 4")]
    #[test_case(&json!({"$schema": "https://example.com/custom"}), None; "unknown metaschema")]
    #[test_case(&json!({}), None; "no schema keyword")]
    #[test_case(&json!(true), None; "boolean schema")]
    fn detect(contents: &serde_json::Value, expected: Option<Draft>) {
        assert_eq!(Draft::detect(contents), expected);
    }

    #[test]
    fn ref_override_table() {
        assert!(Draft::Draft4.ref_overrides_siblings());
        assert!(Draft::Draft7.ref_overrides_siblings());
        assert!(!Draft::Draft201909.ref_overrides_siblings());
        assert!(!Draft::Draft202012.ref_overrides_siblings());
    }

    #[test_case(Draft::Draft4, "id", true)]
    #[test_case(Draft::Draft4, "$id", false)]
    #[test_case(Draft::Draft4, "const", false)]
    #[test_case(Draft::Draft6, "const", true)]
    #[test_case(Draft::Draft6, "if", false)]
    #[test_case(Draft::Draft7, "if", true)]
    #[test_case(Draft::Draft7, "prefixItems", false)]
    #[test_case(Draft::Draft201909, "$recursiveRef", true)]
    #[test_case(Draft::Draft201909, "$dynamicRef", false)]
    #[test_case(Draft::Draft202012, "$dynamicRef", true)]
    #[test_case(Draft::Draft202012, "additionalItems", false)]
    #[test_case(Draft::Draft202012, "prefixItems", true)]
    fn known_keywords(draft: Draft, keyword: &str, expected: bool) {
        assert_eq!(draft.is_known_keyword(keyword), expected);
    }

    #[test]
    fn legacy_id() {
        let schema = json!({"id": "http://example.com/root"});
        assert_eq!(Draft::Draft4.id_of(&schema), Some("http://example.com/root"));
        assert_eq!(Draft::Draft7.id_of(&schema), None);
    }
}
