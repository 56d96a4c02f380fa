//! Path-based access into loosely shaped JSON documents.
//!
//! Export files are not guaranteed to be complete, so every step of a lookup
//! may be missing. [`lookup`] walks a path and yields `None` at the first
//! step that does not resolve.

use serde_json::Value;

/// One step of a document path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Member of an object.
    Key(&'a str),
    /// Element of an array.
    Index(usize),
}

impl PathSegment<'_> {
    fn step<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match self {
            Self::Key(key) => value.as_object()?.get(*key),
            Self::Index(index) => value.as_array()?.get(*index),
        }
    }
}

/// Resolve `path` against `root`. JSON `null` counts as absent.
pub fn lookup<'v>(root: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter()
        .try_fold(root, |value, segment| segment.step(value))
        .filter(|value| !value.is_null())
}

/// Shorthand for an all-key path.
pub fn lookup_keys<'v>(root: &'v Value, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .try_fold(root, |value, key| value.as_object()?.get(*key))
        .filter(|value| !value.is_null())
}
