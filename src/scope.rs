//! The dynamic scope: the chain of schema resources entered so far.
//!
//! `$dynamicRef` and `$recursiveRef` resolve against the *outermost*
//! enclosing resource that declares a matching anchor, so the stack is
//! scanned front-to-back.
use crate::paths::JsonPointer;
use url::Url;

#[derive(Debug)]
pub(crate) struct Frame {
    pub(crate) base: Url,
    /// Whether the resource root carries `$recursiveAnchor: true`.
    pub(crate) recursive_anchor: bool,
    /// Location of the resource within its document (empty for roots).
    pub(crate) resource_pointer: JsonPointer,
    /// Length of the evaluator's keyword path when this frame was pushed;
    /// keyword-path chunks past this index are relative to the resource.
    pub(crate) path_mark: usize,
}

#[derive(Debug, Default)]
pub(crate) struct DynamicScope {
    frames: Vec<Frame>,
}

impl DynamicScope {
    pub(crate) fn push(
        &mut self,
        base: Url,
        recursive_anchor: bool,
        resource_pointer: JsonPointer,
        path_mark: usize,
    ) {
        self.frames.push(Frame {
            base,
            recursive_anchor,
            resource_pointer,
            path_mark,
        });
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }

    pub(crate) fn current(&self) -> &Frame {
        self.frames.last().expect("the root frame is always present")
    }

    pub(crate) fn base(&self) -> &Url {
        &self.current().base
    }

    /// Outermost-first scan for a frame satisfying `predicate`.
    pub(crate) fn find_outermost<P>(&self, predicate: P) -> Option<&Frame>
    where
        P: Fn(&Frame) -> bool,
    {
        self.frames.iter().find(|frame| predicate(frame))
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}
