//! Vocabulary identification and keyword ownership.
//!
//! 2019-09 introduced vocabularies: named keyword sets a metaschema toggles
//! through its `$vocabulary` object. Earlier drafts have no vocabularies; an
//! empty set means "no restriction".
use crate::schemas::Draft;
use ahash::AHashSet;
use serde_json::Value;

/// Well-known specification vocabularies plus custom URIs.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Vocabulary {
    Core,
    Applicator,
    Unevaluated,
    Validation,
    Metadata,
    Format,
    FormatAnnotation,
    FormatAssertion,
    Content,
    Custom(String),
}

impl Vocabulary {
    fn from_uri(uri: &str) -> Vocabulary {
        match uri {
            "https://json-schema.org/draft/2020-12/vocab/core"
            | "https://json-schema.org/draft/2019-09/vocab/core" => Vocabulary::Core,
            "https://json-schema.org/draft/2020-12/vocab/applicator"
            | "https://json-schema.org/draft/2019-09/vocab/applicator" => Vocabulary::Applicator,
            "https://json-schema.org/draft/2020-12/vocab/unevaluated" => Vocabulary::Unevaluated,
            "https://json-schema.org/draft/2020-12/vocab/validation"
            | "https://json-schema.org/draft/2019-09/vocab/validation" => Vocabulary::Validation,
            "https://json-schema.org/draft/2020-12/vocab/meta-data"
            | "https://json-schema.org/draft/2019-09/vocab/meta-data" => Vocabulary::Metadata,
            "https://json-schema.org/draft/2019-09/vocab/format" => Vocabulary::Format,
            "https://json-schema.org/draft/2020-12/vocab/format-annotation" => {
                Vocabulary::FormatAnnotation
            }
            "https://json-schema.org/draft/2020-12/vocab/format-assertion" => {
                Vocabulary::FormatAssertion
            }
            "https://json-schema.org/draft/2020-12/vocab/content"
            | "https://json-schema.org/draft/2019-09/vocab/content" => Vocabulary::Content,
            _ => Vocabulary::Custom(uri.to_string()),
        }
    }
}

/// A set of active vocabularies. An empty set places no restriction on
/// keyword dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularySet {
    known: u16,
    custom: AHashSet<String>,
}

const CORE: u16 = 1 << 0;
const APPLICATOR: u16 = 1 << 1;
const UNEVALUATED: u16 = 1 << 2;
const VALIDATION: u16 = 1 << 3;
const METADATA: u16 = 1 << 4;
const FORMAT: u16 = 1 << 5;
const FORMAT_ANNOTATION: u16 = 1 << 6;
const FORMAT_ASSERTION: u16 = 1 << 7;
const CONTENT: u16 = 1 << 8;

impl VocabularySet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, vocabulary: Vocabulary) {
        match vocabulary {
            Vocabulary::Core => self.known |= CORE,
            Vocabulary::Applicator => self.known |= APPLICATOR,
            Vocabulary::Unevaluated => self.known |= UNEVALUATED,
            Vocabulary::Validation => self.known |= VALIDATION,
            Vocabulary::Metadata => self.known |= METADATA,
            Vocabulary::Format => self.known |= FORMAT,
            Vocabulary::FormatAnnotation => self.known |= FORMAT_ANNOTATION,
            Vocabulary::FormatAssertion => self.known |= FORMAT_ASSERTION,
            Vocabulary::Content => self.known |= CONTENT,
            Vocabulary::Custom(uri) => {
                self.custom.insert(uri);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, vocabulary: &Vocabulary) -> bool {
        match vocabulary {
            Vocabulary::Core => self.known & CORE != 0,
            Vocabulary::Applicator => self.known & APPLICATOR != 0,
            Vocabulary::Unevaluated => self.known & UNEVALUATED != 0,
            Vocabulary::Validation => self.known & VALIDATION != 0,
            Vocabulary::Metadata => self.known & METADATA != 0,
            Vocabulary::Format => self.known & FORMAT != 0,
            Vocabulary::FormatAnnotation => self.known & FORMAT_ANNOTATION != 0,
            Vocabulary::FormatAssertion => self.known & FORMAT_ASSERTION != 0,
            Vocabulary::Content => self.known & CONTENT != 0,
            Vocabulary::Custom(uri) => self.custom.contains(uri),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known == 0 && self.custom.is_empty()
    }

    /// Default vocabulary set for a draft. Pre-2019 drafts have none.
    pub(crate) fn for_draft(draft: Draft) -> VocabularySet {
        match draft {
            Draft::Draft4 | Draft::Draft6 | Draft::Draft7 => VocabularySet::new(),
            Draft::Draft201909 => VocabularySet {
                known: CORE | APPLICATOR | VALIDATION | METADATA | CONTENT,
                custom: AHashSet::new(),
            },
            Draft::Draft202012 => VocabularySet {
                known: CORE
                    | APPLICATOR
                    | UNEVALUATED
                    | VALIDATION
                    | METADATA
                    | FORMAT_ANNOTATION
                    | CONTENT,
                custom: AHashSet::new(),
            },
        }
    }

    /// Build a set from a metaschema's `$vocabulary` object, if present.
    pub(crate) fn from_metaschema(metaschema: &Value) -> Option<VocabularySet> {
        let vocabularies = metaschema.get("$vocabulary")?.as_object()?;
        let mut set = VocabularySet::new();
        for (uri, enabled) in vocabularies {
            if enabled == &Value::Bool(true) {
                set.add(Vocabulary::from_uri(uri));
            }
        }
        Some(set)
    }
}

/// URIs from a metaschema's `$vocabulary` object whose value is strictly
/// boolean `true`, in insertion order.
#[must_use]
pub fn active_vocabularies(metaschema: &Value) -> Vec<String> {
    metaschema
        .get("$vocabulary")
        .and_then(Value::as_object)
        .map(|vocabularies| {
            vocabularies
                .iter()
                .filter(|(_, enabled)| *enabled == &Value::Bool(true))
                .map(|(uri, _)| uri.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Vocabularies that own a keyword in a given draft. Most keywords have one
/// owner; `unevaluated*` moved from the applicator vocabulary (2019-09) to
/// its own vocabulary (2020-12), and `format` answers to any of the three
/// format vocabularies.
fn owners(draft: Draft, keyword: &str) -> &'static [Vocabulary] {
    match keyword {
        "$id" | "$schema" | "$ref" | "$anchor" | "$dynamicAnchor" | "$dynamicRef"
        | "$recursiveAnchor" | "$recursiveRef" | "$vocabulary" | "$comment" | "$defs" => {
            &[Vocabulary::Core]
        }
        "allOf" | "anyOf" | "oneOf" | "not" | "if" | "then" | "else" | "dependentSchemas"
        | "prefixItems" | "items" | "additionalItems" | "contains" | "properties"
        | "patternProperties" | "additionalProperties" | "propertyNames" => {
            &[Vocabulary::Applicator]
        }
        "unevaluatedItems" | "unevaluatedProperties" => {
            if draft == Draft::Draft201909 {
                &[Vocabulary::Applicator]
            } else {
                &[Vocabulary::Unevaluated]
            }
        }
        "type" | "enum" | "const" | "multipleOf" | "maximum" | "exclusiveMaximum" | "minimum"
        | "exclusiveMinimum" | "maxLength" | "minLength" | "pattern" | "maxItems" | "minItems"
        | "uniqueItems" | "maxContains" | "minContains" | "maxProperties" | "minProperties"
        | "required" | "dependentRequired" => &[Vocabulary::Validation],
        "format" => &[
            Vocabulary::Format,
            Vocabulary::FormatAnnotation,
            Vocabulary::FormatAssertion,
        ],
        "contentEncoding" | "contentMediaType" | "contentSchema" => &[Vocabulary::Content],
        "title" | "description" | "default" | "deprecated" | "readOnly" | "writeOnly"
        | "examples" => &[Vocabulary::Metadata],
        _ => &[],
    }
}

/// Whether a keyword may be dispatched under the active vocabulary set.
///
/// An empty set places no restriction; otherwise some active vocabulary must
/// own the keyword. Unknown vocabulary URIs own no keywords.
#[must_use]
pub fn is_keyword_allowed(draft: Draft, keyword: &str, active: &VocabularySet) -> bool {
    active.is_empty()
        || owners(draft, keyword)
            .iter()
            .any(|vocabulary| active.contains(vocabulary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn draft_defaults() {
        let set = VocabularySet::for_draft(Draft::Draft202012);
        assert!(set.contains(&Vocabulary::Unevaluated));
        assert!(set.contains(&Vocabulary::FormatAnnotation));
        assert!(!set.contains(&Vocabulary::FormatAssertion));

        let set = VocabularySet::for_draft(Draft::Draft201909);
        assert!(set.contains(&Vocabulary::Content));
        assert!(!set.contains(&Vocabulary::Format));

        assert!(VocabularySet::for_draft(Draft::Draft7).is_empty());
    }

    #[test]
    fn strictly_boolean_true() {
        let metaschema = json!({
            "$vocabulary": {
                "https://example.com/a": true,
                "https://example.com/b": false,
                "https://example.com/c": 1,
                "https://example.com/d": true,
            }
        });
        assert_eq!(
            active_vocabularies(&metaschema),
            vec!["https://example.com/a", "https://example.com/d"]
        );
    }

    #[test]
    fn no_vocabulary_object() {
        assert!(active_vocabularies(&json!({"type": "object"})).is_empty());
    }

    #[test_case("type", true; "validation keyword under default set")]
    #[test_case("properties", true; "applicator keyword under default set")]
    #[test_case("made-up", false; "unknown keyword owned by nobody")]
    fn keyword_gating_2020(keyword: &str, expected: bool) {
        let active = VocabularySet::for_draft(Draft::Draft202012);
        assert_eq!(
            is_keyword_allowed(Draft::Draft202012, keyword, &active),
            expected
        );
    }

    #[test]
    fn empty_set_allows_everything() {
        let active = VocabularySet::new();
        assert!(is_keyword_allowed(Draft::Draft7, "type", &active));
        assert!(is_keyword_allowed(Draft::Draft7, "made-up", &active));
    }

    #[test]
    fn unevaluated_ownership_moves_between_drafts() {
        let mut applicator_only = VocabularySet::new();
        applicator_only.add(Vocabulary::Applicator);
        assert!(is_keyword_allowed(
            Draft::Draft201909,
            "unevaluatedProperties",
            &applicator_only
        ));
        assert!(!is_keyword_allowed(
            Draft::Draft202012,
            "unevaluatedProperties",
            &applicator_only
        ));
    }

    #[test]
    fn custom_metaschema_set() {
        let metaschema = json!({
            "$vocabulary": {
                "https://json-schema.org/draft/2020-12/vocab/core": true,
                "https://json-schema.org/draft/2020-12/vocab/format-assertion": true,
                "https://example.com/custom": true,
            }
        });
        let set = VocabularySet::from_metaschema(&metaschema).expect("has $vocabulary");
        assert!(set.contains(&Vocabulary::Core));
        assert!(set.contains(&Vocabulary::FormatAssertion));
        assert!(set.contains(&Vocabulary::Custom("https://example.com/custom".into())));
        assert!(!set.contains(&Vocabulary::Validation));
    }
}
