//! Evaluation tracking for `unevaluatedItems` / `unevaluatedProperties`.
//!
//! Each object or array instance location gets its own state recording which
//! keys and indices some applicator has already covered. Composition
//! keywords run their branches against a fresh child state and merge it back
//! according to their semantics (all branches for `allOf`, matching branches
//! for `anyOf`/`oneOf`, never for `not`).
use ahash::AHashSet;

#[derive(Debug, Default)]
pub(crate) struct EvaluationState {
    properties: AHashSet<String>,
    items: AHashSet<usize>,
}

impl EvaluationState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn note_property(&mut self, name: &str) {
        if !self.properties.contains(name) {
            self.properties.insert(name.to_string());
        }
    }

    pub(crate) fn note_item(&mut self, index: usize) {
        self.items.insert(index);
    }

    /// Mark every index below `limit` as evaluated.
    pub(crate) fn note_items_up_to(&mut self, limit: usize) {
        for index in 0..limit {
            self.items.insert(index);
        }
    }

    pub(crate) fn is_property_evaluated(&self, name: &str) -> bool {
        self.properties.contains(name)
    }

    pub(crate) fn is_item_evaluated(&self, index: usize) -> bool {
        self.items.contains(&index)
    }

    /// Absorb marks from a subschema run.
    pub(crate) fn merge(&mut self, other: EvaluationState) {
        self.properties.extend(other.properties);
        self.items.extend(other.items);
    }
}
