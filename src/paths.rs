//! Locations within schemas and validated instances.
use std::{fmt, fmt::Write, slice::Iter};

/// JSON Pointer as a wrapper around individual path components.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct JsonPointer(Vec<PathChunk>);

impl JsonPointer {
    #[must_use]
    pub(crate) const fn new() -> Self {
        JsonPointer(Vec::new())
    }

    /// Pointer components as strings. Consumes the pointer.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|chunk| match chunk {
                PathChunk::Property(value) => value.into_string(),
                PathChunk::Index(idx) => idx.to_string(),
                PathChunk::Keyword(keyword) => keyword.to_string(),
            })
            .collect()
    }

    /// Iterator over the underlying path components.
    pub fn iter(&self) -> Iter<'_, PathChunk> {
        self.0.iter()
    }

    /// The last pointer component, if any.
    #[must_use]
    #[inline]
    pub fn last(&self) -> Option<&PathChunk> {
        self.0.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, chunk: impl Into<PathChunk>) {
        self.0.push(chunk.into());
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn clone_with(&self, chunk: impl Into<PathChunk>) -> Self {
        let mut new = self.clone();
        new.0.push(chunk.into());
        new
    }

    pub(crate) fn extend_with(&self, chunks: &[PathChunk]) -> Self {
        let mut new = self.clone();
        new.0.extend_from_slice(chunks);
        new
    }

    pub(crate) fn as_slice(&self) -> &[PathChunk] {
        &self.0
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            f.write_char('/')?;
            match chunk {
                PathChunk::Property(value) => {
                    for ch in value.chars() {
                        match ch {
                            '/' => f.write_str("~1")?,
                            '~' => f.write_str("~0")?,
                            _ => f.write_char(ch)?,
                        }
                    }
                }
                PathChunk::Index(idx) => f.write_str(itoa::Buffer::new().format(*idx))?,
                PathChunk::Keyword(keyword) => f.write_str(keyword)?,
            }
        }
        Ok(())
    }
}

impl serde::Serialize for JsonPointer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A single step through a JSON value: an object key, an array index, or a
/// schema keyword.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum PathChunk {
    /// Property name within a JSON object.
    Property(Box<str>),
    /// Index within a JSON array.
    Index(usize),
    /// JSON Schema keyword.
    Keyword(&'static str),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Property(value.into_boxed_str())
    }
}

impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Property(value.into())
    }
}

impl From<&'static str> for JsonPointer {
    fn from(value: &'static str) -> Self {
        JsonPointer(vec![PathChunk::Keyword(value)])
    }
}

impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

impl IntoIterator for JsonPointer {
    type Item = PathChunk;
    type IntoIter = <Vec<PathChunk> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonPointer {
    type Item = &'a PathChunk;
    type IntoIter = Iter<'a, PathChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<&[PathChunk]> for JsonPointer {
    #[inline]
    fn from(path: &[PathChunk]) -> Self {
        JsonPointer(path.to_vec())
    }
}

impl From<Vec<PathChunk>> for JsonPointer {
    #[inline]
    fn from(path: Vec<PathChunk>) -> Self {
        JsonPointer(path)
    }
}
