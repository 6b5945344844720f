//! Traversal of YAML trees along parsed object paths
//!
//! Each hop branches on the runtime container: a sequence reads the segment
//! as an index, a mapping reads it as a key. Nothing is cross-checked, so
//! `a.0` is rejected by the grammar but `a[0]` against a mapping looks up the
//! key `"0"`.
//!
//! Absence is `None` and is never an error. A YAML `null` is a present value.

use crate::core::path::parse_path;
use crate::error::{FieldPathError, Result};
use serde_yaml::{Mapping, Value};

/// Scalar mapping keys (`1: one`, `true: yes`) match their string form.
fn scalar_key_matches(key: &Value, segment: &str) -> bool {
    match key {
        Value::Number(n) => n.to_string() == segment,
        Value::Bool(b) => b.to_string() == segment,
        _ => false,
    }
}

/// The key under which `segment` is stored in `map`, if any.
pub(crate) fn resolve_key(map: &Mapping, segment: &str) -> Option<Value> {
    if map.contains_key(segment) {
        return Some(Value::String(segment.to_string()));
    }
    map.iter()
        .map(|(k, _)| k)
        .find(|k| scalar_key_matches(k, segment))
        .cloned()
}

/// Index `value` by one segment.
pub(crate) fn step<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Mapping(map) => map.get(segment).or_else(|| {
            map.iter()
                .find(|(k, _)| scalar_key_matches(k, segment))
                .map(|(_, v)| v)
        }),
        Value::Sequence(seq) => segment.parse::<usize>().ok().and_then(|i| seq.get(i)),
        _ => None,
    }
}

fn step_mut<'v>(value: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    match value {
        Value::Mapping(map) => {
            let key = resolve_key(map, segment)?;
            map.get_mut(&key)
        }
        Value::Sequence(seq) => segment.parse::<usize>().ok().and_then(|i| seq.get_mut(i)),
        _ => None,
    }
}

/// Walk `segments` from `root`.
///
/// An empty segment stops the walk and yields the current value, which makes
/// `[""]` the identity path. A missing node before the end yields `None`.
pub fn traverse_segments<'v>(segments: &[String], root: &'v Value) -> Option<&'v Value> {
    let mut current = root;
    for segment in segments {
        if segment.is_empty() {
            return Some(current);
        }
        current = step(current, segment)?;
    }
    Some(current)
}

/// Mutable counterpart of [`traverse_segments`].
pub fn traverse_segments_mut<'v>(
    segments: &[String],
    root: &'v mut Value,
) -> Option<&'v mut Value> {
    let mut current = root;
    for segment in segments {
        if segment.is_empty() {
            return Some(current);
        }
        current = step_mut(current, segment)?;
    }
    Some(current)
}

/// Value at `path`, `None` if nothing is there.
///
/// Fails only when `path` is malformed.
pub fn traverse<'v>(path: &str, root: &'v Value) -> Result<Option<&'v Value>> {
    let segments = parse_path(path)?;
    Ok(traverse_segments(&segments, root))
}

pub fn traverse_mut<'v>(path: &str, root: &'v mut Value) -> Result<Option<&'v mut Value>> {
    let segments = parse_path(path)?;
    Ok(traverse_segments_mut(&segments, root))
}

/// The container one level above a path's terminal field
#[derive(Debug, Clone, PartialEq)]
pub struct Parent<'v> {
    /// Segments that reach the parent; empty when the parent is the root
    pub path: Vec<String>,
    pub value: Option<&'v Value>,
}

/// The terminal field of a path
#[derive(Debug, Clone, PartialEq)]
pub struct Child<'v> {
    pub key: String,
    /// Current value, `None` if the field does not exist (yet)
    pub value: Option<&'v Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParentChild<'v> {
    pub parent: Parent<'v>,
    pub child: Child<'v>,
}

/// Mutable parent access used by the field mutators
#[derive(Debug)]
pub struct ParentChildMut<'v> {
    pub parent_path: Vec<String>,
    pub parent: Option<&'v mut Value>,
    pub child_key: String,
}

impl ParentChildMut<'_> {
    pub fn child_value(&self) -> Option<&Value> {
        self.parent
            .as_deref()
            .and_then(|parent| step(parent, &self.child_key))
    }
}

fn split_parent(path: &str) -> Result<(Vec<String>, String)> {
    let mut segments = parse_path(path)?;
    if segments.first().map_or(true, |s| s.is_empty()) {
        return Err(FieldPathError::self_reference(path));
    }
    let child_key = segments
        .pop()
        .ok_or_else(|| FieldPathError::self_reference(path))?;
    Ok((segments, child_key))
}

/// Split `path` into its parent and child and look both up.
///
/// The parent may be absent; callers decide whether that is an error.
/// Fails with `SelfReferenceTraversal` for the identity path.
pub fn traverse_to_parent<'v>(path: &str, root: &'v Value) -> Result<ParentChild<'v>> {
    let (parent_path, child_key) = split_parent(path)?;
    let parent_value = traverse_segments(&parent_path, root);
    let child_value = parent_value.and_then(|parent| step(parent, &child_key));

    Ok(ParentChild {
        parent: Parent {
            path: parent_path,
            value: parent_value,
        },
        child: Child {
            key: child_key,
            value: child_value,
        },
    })
}

pub fn traverse_to_parent_mut<'v>(path: &str, root: &'v mut Value) -> Result<ParentChildMut<'v>> {
    let (parent_path, child_key) = split_parent(path)?;
    let parent = traverse_segments_mut(&parent_path, root);

    Ok(ParentChildMut {
        parent_path,
        parent,
        child_key,
    })
}
