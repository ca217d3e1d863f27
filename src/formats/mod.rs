//! Format validators: one pure predicate per format token, plus a
//! process-wide registry for user-supplied formats.
//!
//! Built-in formats are gated by the draft that introduced them; a format
//! unknown to the active draft is treated like any other unknown format
//! (silently accepted under annotation semantics). User-registered formats
//! take precedence over built-ins and apply to every draft.
//!
//! The registry is meant to be populated during application startup and read
//! during validation; writes are guarded by a lock, so late registration is
//! safe but best avoided.
mod datetime;
mod email;
mod hostname;
mod ip;
mod misc;
mod pointer;
mod uri;

use crate::schemas::Draft;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// A user-registered format predicate.
pub type FormatCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

static REGISTRY: Lazy<RwLock<AHashMap<String, FormatCheck>>> =
    Lazy::new(|| RwLock::new(AHashMap::new()));

/// Register a custom format. Replaces any previous registration (including
/// shadowing a built-in of the same name).
pub fn register(name: &str, check: impl Fn(&str) -> bool + Send + Sync + 'static) {
    REGISTRY.write().insert(name.to_string(), Arc::new(check));
}

/// Remove a custom format. Returns whether it was registered.
pub fn unregister(name: &str) -> bool {
    REGISTRY.write().remove(name).is_some()
}

/// Whether a custom format with this name is registered.
#[must_use]
pub fn has(name: &str) -> bool {
    REGISTRY.read().contains_key(name)
}

/// Names of all registered custom formats.
#[must_use]
pub fn list() -> Vec<String> {
    REGISTRY.read().keys().cloned().collect()
}

/// Remove every custom format.
pub fn clear() {
    REGISTRY.write().clear();
}

/// Fetch a registered custom format validator.
#[must_use]
pub fn get(name: &str) -> Option<FormatCheck> {
    REGISTRY.read().get(name).cloned()
}

type BuiltIn = fn(&str) -> bool;

/// Look up a built-in format for the draft in use. Formats introduced by a
/// later draft are unknown to earlier ones.
pub(crate) fn built_in(name: &str, draft: Draft) -> Option<BuiltIn> {
    match name {
        "date" => Some(datetime::is_valid_date),
        "date-time" => Some(datetime::is_valid_datetime),
        "time" => Some(datetime::is_valid_time),
        "email" => Some(email::is_valid_email),
        "hostname" => Some(hostname::is_valid_hostname),
        "ipv4" => Some(ip::is_valid_ipv4),
        "ipv6" => Some(ip::is_valid_ipv6),
        "regex" => Some(misc::is_valid_regex),
        "uri" => Some(uri::is_valid_uri),
        "json-pointer" if draft >= Draft::Draft6 => Some(pointer::is_valid_json_pointer),
        "uri-reference" if draft >= Draft::Draft6 => Some(uri::is_valid_uri_reference),
        "uri-template" if draft >= Draft::Draft6 => Some(uri::is_valid_uri_template),
        "idn-email" if draft >= Draft::Draft7 => Some(email::is_valid_idn_email),
        "idn-hostname" if draft >= Draft::Draft7 => Some(hostname::is_valid_idn_hostname),
        "iri" if draft >= Draft::Draft7 => Some(uri::is_valid_iri),
        "iri-reference" if draft >= Draft::Draft7 => Some(uri::is_valid_iri_reference),
        "relative-json-pointer" if draft >= Draft::Draft7 => {
            Some(pointer::is_valid_relative_json_pointer)
        }
        "duration" if draft >= Draft::Draft201909 => Some(datetime::is_valid_duration),
        "uuid" if draft >= Draft::Draft201909 => Some(misc::is_valid_uuid),
        _ => None,
    }
}
