//! Schema registry: an index of documents, `$id` resources and anchors.
//!
//! Populated by a depth-first pre-walk of each registered document, so that
//! reference resolution during validation is a couple of hash lookups. The
//! contents of `enum`, `const`, `default` and `examples` are instance
//! values, never schemas, and are skipped by the walk.
use crate::schemas::Draft;
use ahash::AHashMap;
use serde_json::Value;
use url::Url;

/// Base URI assigned to documents that do not declare an `$id`.
pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

/// Strip the fragment and render the URL as a registry key.
pub(crate) fn uri_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    url.to_string()
}

/// A call-scope index of schema documents and the anchors they declare.
///
/// Registering the same URI twice overwrites the earlier entry
/// (last-write-wins). Instances are independent; there is no global
/// registry.
#[derive(Debug, Clone)]
pub struct SchemaRegistry<'s> {
    draft: Draft,
    documents: AHashMap<String, &'s Value>,
    anchors: AHashMap<(String, String), &'s Value>,
    dynamic_anchors: AHashMap<(String, String), &'s Value>,
}

impl<'s> SchemaRegistry<'s> {
    #[must_use]
    pub fn new(draft: Draft) -> Self {
        SchemaRegistry {
            draft,
            documents: AHashMap::new(),
            anchors: AHashMap::new(),
            dynamic_anchors: AHashMap::new(),
        }
    }

    /// Register a document under the given URI and index its `$id` resources
    /// and anchors. Invalid URIs are rejected with `false`.
    pub fn register(&mut self, uri: &str, document: &'s Value) -> bool {
        let Ok(base) = Url::parse(uri) else {
            return false;
        };
        self.add_document(&base, document);
        true
    }

    #[must_use]
    pub fn get(&self, uri: &str) -> Option<&'s Value> {
        let base = Url::parse(uri).ok()?;
        self.documents.get(&uri_key(&base)).copied()
    }

    #[must_use]
    pub fn has(&self, uri: &str) -> bool {
        self.get(uri).is_some()
    }

    pub fn remove(&mut self, uri: &str) -> bool {
        let Ok(base) = Url::parse(uri) else {
            return false;
        };
        let key = uri_key(&base);
        let removed = self.documents.remove(&key).is_some();
        self.anchors.retain(|(base, _), _| base != &key);
        self.dynamic_anchors.retain(|(base, _), _| base != &key);
        removed
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.anchors.clear();
        self.dynamic_anchors.clear();
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<&'s Value> {
        self.documents.get(key).copied()
    }

    pub(crate) fn anchor(&self, base: &str, name: &str) -> Option<&'s Value> {
        self.anchors
            .get(&(base.to_string(), name.to_string()))
            .copied()
    }

    pub(crate) fn dynamic_anchor(&self, base: &str, name: &str) -> Option<&'s Value> {
        self.dynamic_anchors
            .get(&(base.to_string(), name.to_string()))
            .copied()
    }

    /// Copy every entry of another registry into this one.
    pub(crate) fn merge(&mut self, other: &SchemaRegistry<'s>) {
        self.documents
            .extend(other.documents.iter().map(|(k, v)| (k.clone(), *v)));
        self.anchors
            .extend(other.anchors.iter().map(|(k, v)| (k.clone(), *v)));
        self.dynamic_anchors
            .extend(other.dynamic_anchors.iter().map(|(k, v)| (k.clone(), *v)));
    }

    /// Walk a document, registering the root plus every `$id` subresource and
    /// anchor under the base URI each of them resolves to.
    pub(crate) fn add_document(&mut self, base: &Url, document: &'s Value) {
        // The root is reachable under the URI it was registered with even if
        // its own `$id` differs.
        self.documents.insert(uri_key(base), document);
        self.walk(base, document);
    }

    fn walk(&mut self, base: &Url, value: &'s Value) {
        match value {
            Value::Object(schema) => {
                let mut current = base.clone();
                if let Some(id) = self.draft.id_of(value) {
                    if let Some(anchor) = id.strip_prefix('#') {
                        // Legacy anchor form: draft 4 `id` and draft 6/7 `$id`
                        // may be a bare fragment.
                        if self.draft.ref_overrides_siblings() && !anchor.is_empty() {
                            self.anchors
                                .insert((uri_key(&current), anchor.to_string()), value);
                        }
                    } else if let Ok(resolved) = current.join(id) {
                        current = resolved;
                        self.documents.insert(uri_key(&current), value);
                    }
                }
                if let Some(name) = schema.get("$anchor").and_then(Value::as_str) {
                    if self.draft >= Draft::Draft201909 && !name.is_empty() {
                        self.anchors
                            .insert((uri_key(&current), name.to_string()), value);
                    }
                }
                if let Some(name) = schema.get("$dynamicAnchor").and_then(Value::as_str) {
                    if self.draft == Draft::Draft202012 && !name.is_empty() {
                        // A dynamic anchor is also reachable as a plain one.
                        self.dynamic_anchors
                            .insert((uri_key(&current), name.to_string()), value);
                        self.anchors
                            .insert((uri_key(&current), name.to_string()), value);
                    }
                }
                for (key, child) in schema {
                    if matches!(key.as_str(), "enum" | "const" | "default" | "examples") {
                        continue;
                    }
                    self.walk(&current, child);
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.walk(base, item);
                }
            }
            _ => {}
        }
    }
}
