//! Embedded metaschema documents for every supported draft, pre-walked into
//! per-draft registries so that `$schema`-level references and
//! `validate_schema` work without any I/O.
use crate::{registry::SchemaRegistry, schemas::Draft};
use once_cell::sync::Lazy;
use serde_json::Value;
use url::Url;

macro_rules! document {
    ($name:ident, $path:literal) => {
        static $name: Lazy<Value> = Lazy::new(|| {
            serde_json::from_str(include_str!($path)).expect("embedded metaschemas are valid JSON")
        });
    };
}

document!(DRAFT4, "draft4.json");
document!(DRAFT6, "draft6.json");
document!(DRAFT7, "draft7.json");
document!(DRAFT2019, "draft2019-09/schema.json");
document!(DRAFT2019_CORE, "draft2019-09/meta/core.json");
document!(DRAFT2019_APPLICATOR, "draft2019-09/meta/applicator.json");
document!(DRAFT2019_VALIDATION, "draft2019-09/meta/validation.json");
document!(DRAFT2019_META_DATA, "draft2019-09/meta/meta-data.json");
document!(DRAFT2019_FORMAT, "draft2019-09/meta/format.json");
document!(DRAFT2019_CONTENT, "draft2019-09/meta/content.json");
document!(DRAFT2020, "draft2020-12/schema.json");
document!(DRAFT2020_CORE, "draft2020-12/meta/core.json");
document!(DRAFT2020_APPLICATOR, "draft2020-12/meta/applicator.json");
document!(DRAFT2020_UNEVALUATED, "draft2020-12/meta/unevaluated.json");
document!(DRAFT2020_VALIDATION, "draft2020-12/meta/validation.json");
document!(DRAFT2020_META_DATA, "draft2020-12/meta/meta-data.json");
document!(
    DRAFT2020_FORMAT_ANNOTATION,
    "draft2020-12/meta/format-annotation.json"
);
document!(DRAFT2020_CONTENT, "draft2020-12/meta/content.json");

/// The main metaschema document of a draft.
pub(crate) fn for_draft(draft: Draft) -> &'static Value {
    match draft {
        Draft::Draft4 => &DRAFT4,
        Draft::Draft6 => &DRAFT6,
        Draft::Draft7 => &DRAFT7,
        Draft::Draft201909 => &DRAFT2019,
        Draft::Draft202012 => &DRAFT2020,
    }
}

fn documents() -> [(&'static str, &'static Value); 18] {
    [
        ("http://json-schema.org/draft-04/schema", &*DRAFT4),
        ("http://json-schema.org/draft-06/schema", &*DRAFT6),
        ("http://json-schema.org/draft-07/schema", &*DRAFT7),
        ("https://json-schema.org/draft/2019-09/schema", &*DRAFT2019),
        (
            "https://json-schema.org/draft/2019-09/meta/core",
            &*DRAFT2019_CORE,
        ),
        (
            "https://json-schema.org/draft/2019-09/meta/applicator",
            &*DRAFT2019_APPLICATOR,
        ),
        (
            "https://json-schema.org/draft/2019-09/meta/validation",
            &*DRAFT2019_VALIDATION,
        ),
        (
            "https://json-schema.org/draft/2019-09/meta/meta-data",
            &*DRAFT2019_META_DATA,
        ),
        (
            "https://json-schema.org/draft/2019-09/meta/format",
            &*DRAFT2019_FORMAT,
        ),
        (
            "https://json-schema.org/draft/2019-09/meta/content",
            &*DRAFT2019_CONTENT,
        ),
        ("https://json-schema.org/draft/2020-12/schema", &*DRAFT2020),
        (
            "https://json-schema.org/draft/2020-12/meta/core",
            &*DRAFT2020_CORE,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/applicator",
            &*DRAFT2020_APPLICATOR,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/unevaluated",
            &*DRAFT2020_UNEVALUATED,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/validation",
            &*DRAFT2020_VALIDATION,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/meta-data",
            &*DRAFT2020_META_DATA,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/format-annotation",
            &*DRAFT2020_FORMAT_ANNOTATION,
        ),
        (
            "https://json-schema.org/draft/2020-12/meta/content",
            &*DRAFT2020_CONTENT,
        ),
    ]
}

fn build_registry(draft: Draft) -> SchemaRegistry<'static> {
    let mut registry = SchemaRegistry::new(draft);
    for (uri, document) in documents() {
        let base = Url::parse(uri).expect("metaschema URIs are valid");
        registry.add_document(&base, document);
    }
    registry
}

/// A pre-walked registry containing every metaschema document, using the
/// given draft's identification rules. Cloned into each validation run.
pub(crate) fn registry_for(draft: Draft) -> &'static SchemaRegistry<'static> {
    static DRAFT4_REGISTRY: Lazy<SchemaRegistry<'static>> =
        Lazy::new(|| build_registry(Draft::Draft4));
    static DRAFT6_REGISTRY: Lazy<SchemaRegistry<'static>> =
        Lazy::new(|| build_registry(Draft::Draft6));
    static DRAFT7_REGISTRY: Lazy<SchemaRegistry<'static>> =
        Lazy::new(|| build_registry(Draft::Draft7));
    static DRAFT2019_REGISTRY: Lazy<SchemaRegistry<'static>> =
        Lazy::new(|| build_registry(Draft::Draft201909));
    static DRAFT2020_REGISTRY: Lazy<SchemaRegistry<'static>> =
        Lazy::new(|| build_registry(Draft::Draft202012));
    match draft {
        Draft::Draft4 => &DRAFT4_REGISTRY,
        Draft::Draft6 => &DRAFT6_REGISTRY,
        Draft::Draft7 => &DRAFT7_REGISTRY,
        Draft::Draft201909 => &DRAFT2019_REGISTRY,
        Draft::Draft202012 => &DRAFT2020_REGISTRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_documents_parse() {
        for (uri, document) in documents() {
            assert!(document.is_object(), "{uri} should be an object");
        }
    }

    #[test]
    fn registries_know_their_metaschemas() {
        for draft in [
            Draft::Draft4,
            Draft::Draft6,
            Draft::Draft7,
            Draft::Draft201909,
            Draft::Draft202012,
        ] {
            assert!(registry_for(draft).has(draft.metaschema_uri()));
        }
    }

    #[test]
    fn dynamic_anchor_of_2020_meta_is_indexed() {
        let registry = registry_for(Draft::Draft202012);
        assert!(registry
            .dynamic_anchor("https://json-schema.org/draft/2020-12/schema", "meta")
            .is_some());
    }
}
