//! Reference resolution: JSON Pointer decoding and URI/anchor lookup.
use crate::{
    paths::{JsonPointer, PathChunk},
    registry::{uri_key, SchemaRegistry},
    schemas::Draft,
};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::borrow::Cow;
use url::Url;

/// Why a reference could not be resolved.
///
/// `InvalidPointer` means the fragment parsed as a JSON Pointer but the path
/// does not exist (or lands on a non-schema value); `CannotResolve` means the
/// URI or anchor is unknown to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefError {
    InvalidPointer(String),
    CannotResolve(String),
}

/// A successfully resolved reference.
#[derive(Debug)]
pub(crate) struct Resolved<'s> {
    pub(crate) schema: &'s Value,
    /// Effective base URI of the target, accounting for `$id`s crossed on
    /// the way down.
    pub(crate) base: Url,
    /// Location of the target within its resource, when the fragment was a
    /// JSON Pointer.
    pub(crate) pointer: JsonPointer,
}

/// Resolve `reference` against the current base URI and registry.
pub(crate) fn resolve<'s>(
    reference: &str,
    base: &Url,
    registry: &SchemaRegistry<'s>,
    draft: Draft,
) -> Result<Resolved<'s>, RefError> {
    if let Some(fragment) = reference.strip_prefix('#') {
        let document = registry
            .lookup(&uri_key(base))
            .ok_or_else(|| RefError::CannotResolve(reference.to_string()))?;
        return resolve_fragment(reference, fragment, document, base, registry, draft);
    }
    let resolved = base
        .join(reference)
        .map_err(|_| RefError::CannotResolve(reference.to_string()))?;
    let key = uri_key(&resolved);
    let document = registry
        .lookup(&key)
        .ok_or_else(|| RefError::CannotResolve(reference.to_string()))?;
    let mut target_base = resolved.clone();
    target_base.set_fragment(None);
    match resolved.fragment() {
        None | Some("") => Ok(Resolved {
            schema: document,
            base: target_base,
            pointer: JsonPointer::new(),
        }),
        Some(fragment) => {
            resolve_fragment(reference, fragment, document, &target_base, registry, draft)
        }
    }
}

/// Mirror of [`resolve`] that swallows the error details.
#[allow(dead_code)]
pub(crate) fn can_resolve(
    reference: &str,
    base: &Url,
    registry: &SchemaRegistry<'_>,
    draft: Draft,
) -> bool {
    resolve(reference, base, registry, draft).is_ok()
}

fn resolve_fragment<'s>(
    reference: &str,
    fragment: &str,
    document: &'s Value,
    base: &Url,
    registry: &SchemaRegistry<'s>,
    draft: Draft,
) -> Result<Resolved<'s>, RefError> {
    let decoded = percent_decode_str(fragment)
        .decode_utf8()
        .map_err(|_| RefError::CannotResolve(reference.to_string()))?;
    if decoded.is_empty() {
        return Ok(Resolved {
            schema: document,
            base: base.clone(),
            pointer: JsonPointer::new(),
        });
    }
    if decoded.starts_with('/') {
        return lookup_pointer(&decoded, document, base, draft);
    }
    let schema = registry
        .anchor(&uri_key(base), &decoded)
        .ok_or_else(|| RefError::CannotResolve(reference.to_string()))?;
    Ok(Resolved {
        schema,
        base: base.clone(),
        pointer: JsonPointer::new(),
    })
}

/// Decode an RFC 6901 pointer and walk it through `document`, keeping track
/// of `$id`s crossed so the returned base URI is the one the target schema
/// actually lives under.
pub(crate) fn lookup_pointer<'s>(
    pointer: &str,
    document: &'s Value,
    base: &Url,
    draft: Draft,
) -> Result<Resolved<'s>, RefError> {
    let mut current = document;
    let mut current_base = base.clone();
    let mut chunks = Vec::new();
    for segment in pointer.split('/').skip(1) {
        let segment = unescape_segment(segment)
            .ok_or_else(|| RefError::InvalidPointer(pointer.to_string()))?;
        match current {
            Value::Object(map) => {
                current = map
                    .get(segment.as_ref())
                    .ok_or_else(|| RefError::InvalidPointer(pointer.to_string()))?;
                chunks.push(PathChunk::Property(segment.into_owned().into_boxed_str()));
            }
            Value::Array(items) => {
                let index = parse_index(&segment)
                    .ok_or_else(|| RefError::InvalidPointer(pointer.to_string()))?;
                current = items
                    .get(index)
                    .ok_or_else(|| RefError::InvalidPointer(pointer.to_string()))?;
                chunks.push(PathChunk::Index(index));
            }
            _ => return Err(RefError::InvalidPointer(pointer.to_string())),
        }
        if let Some(id) = draft.id_of(current) {
            if !id.starts_with('#') {
                if let Ok(mut joined) = current_base.join(id) {
                    joined.set_fragment(None);
                    current_base = joined;
                }
            }
        }
    }
    Ok(Resolved {
        schema: current,
        base: current_base,
        pointer: JsonPointer::from(chunks),
    })
}

/// Undo `~1` -> `/` and `~0` -> `~`, rejecting any other `~`-escape.
fn unescape_segment(segment: &str) -> Option<Cow<'_, str>> {
    if !segment.contains('~') {
        return Some(Cow::Borrowed(segment));
    }
    let mut buffer = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => buffer.push('~'),
                Some('1') => buffer.push('/'),
                _ => return None,
            }
        } else {
            buffer.push(ch);
        }
    }
    Some(Cow::Owned(buffer))
}

/// Array indices per RFC 6901: digits only, no leading zeros except `"0"`.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
