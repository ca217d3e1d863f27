//! Output formats for validation results: flag, basic, detailed and
//! verbose, per the 2019-09/2020-12 output specification.
use crate::{
    error::ValidationError,
    paths::{JsonPointer, PathChunk},
    ValidationResult,
};
use serde::Serialize;

/// Adapter exposing the four output shapes of a [`ValidationResult`].
#[derive(Debug, Clone, Copy)]
pub struct Output<'a> {
    result: &'a ValidationResult,
}

impl<'a> Output<'a> {
    pub(crate) const fn new(result: &'a ValidationResult) -> Output<'a> {
        Output { result }
    }

    /// `{ "valid": bool }`.
    #[must_use]
    pub fn flag(&self) -> Flag {
        Flag {
            valid: self.result.is_valid(),
        }
    }

    /// Flat list of error units.
    #[must_use]
    pub fn basic(&self) -> Basic<'a> {
        Basic {
            valid: self.result.is_valid(),
            errors: self.units(false),
        }
    }

    /// Like [`Output::basic`], with `absoluteKeywordLocation` on each unit.
    #[must_use]
    pub fn verbose(&self) -> Basic<'a> {
        Basic {
            valid: self.result.is_valid(),
            errors: self.units(true),
        }
    }

    /// Errors grouped hierarchically by keyword location.
    #[must_use]
    pub fn detailed(&self) -> Detailed {
        let mut root = TreeNode::default();
        for error in self.result.errors() {
            root.insert(error, error.schema_path.as_slice());
        }
        Detailed {
            valid: self.result.is_valid(),
            keyword_location: "".to_string(),
            instance_location: None,
            errors: Vec::new(),
            nested: root.render(&JsonPointer::new()),
        }
    }

    fn units(&self, verbose: bool) -> Vec<ErrorUnit<'a>> {
        self.result
            .errors()
            .iter()
            .map(|error| ErrorUnit {
                instance_location: &error.instance_path,
                keyword_location: &error.schema_path,
                keyword: error.keyword(),
                error: error.to_string(),
                absolute_keyword_location: if verbose {
                    error.absolute_keyword_location.as_deref()
                } else {
                    None
                },
            })
            .collect()
    }
}

/// The `flag` output format.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Flag {
    pub valid: bool,
}

/// One error entry of the `basic`/`verbose` output formats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorUnit<'a> {
    pub instance_location: &'a JsonPointer,
    pub keyword_location: &'a JsonPointer,
    pub keyword: &'a str,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_keyword_location: Option<&'a str>,
}

/// The `basic` (and `verbose`) output format. The `errors` member is absent
/// for valid results.
#[derive(Debug, Serialize)]
pub struct Basic<'a> {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorUnit<'a>>,
}

/// A node of the `detailed` output format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detailed {
    pub valid: bool,
    pub keyword_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Detailed>,
}

#[derive(Default)]
struct TreeNode<'a> {
    errors: Vec<&'a ValidationError>,
    children: Vec<(PathChunk, TreeNode<'a>)>,
}

impl<'a> TreeNode<'a> {
    fn insert(&mut self, error: &'a ValidationError, path: &[PathChunk]) {
        match path.split_first() {
            None => self.errors.push(error),
            Some((head, rest)) => {
                if let Some((_, child)) = self.children.iter_mut().find(|(key, _)| key == head) {
                    child.insert(error, rest);
                } else {
                    let mut child = TreeNode::default();
                    child.insert(error, rest);
                    self.children.push((head.clone(), child));
                }
            }
        }
    }

    /// Collapse single-child chains so each emitted node carries either
    /// errors or a real branching point.
    fn render(&self, prefix: &JsonPointer) -> Vec<Detailed> {
        let mut nodes = Vec::new();
        for (chunk, child) in &self.children {
            let mut location = prefix.clone_with(chunk.clone());
            let mut current = child;
            while current.errors.is_empty() && current.children.len() == 1 {
                let (next_chunk, next) = &current.children[0];
                location = location.clone_with(next_chunk.clone());
                current = next;
            }
            nodes.push(Detailed {
                valid: false,
                keyword_location: location.to_string(),
                instance_location: current
                    .errors
                    .first()
                    .map(|error| error.instance_path.to_string()),
                errors: current.errors.iter().map(|error| error.to_string()).collect(),
                nested: current.render(&location),
            });
        }
        nodes
    }
}
