//! Field operations on YAML trees addressed by object paths
//!
//! All mutators work in place: they take the root as `&mut Value`, edit the
//! addressed container directly and return nothing but the outcome. Callers
//! that need the previous tree must clone it first.

use crate::core::traverse::{
    resolve_key, step, traverse, traverse_to_parent_mut, ParentChildMut,
};
use crate::error::{FieldPathError, Result};
use log::debug;
use serde_yaml::Value;
use std::cmp::Ordering;

/// Whether a value exists at `path`. A YAML `null` counts as existing.
pub fn has_field(path: &str, root: &Value) -> Result<bool> {
    Ok(get_field(path, root)?.is_some())
}

/// Value at `path`, `None` when absent
pub fn get_field<'v>(path: &str, root: &'v Value) -> Result<Option<&'v Value>> {
    traverse(path, root)
}

/// Create the field at `path`.
///
/// The parent must exist and the field must not.
pub fn insert_field(path: &str, value: Value, root: &mut Value) -> Result<()> {
    let (parent, child_key) = existing_parent(path, root)?;
    if step(parent, &child_key).is_some() {
        return Err(FieldPathError::field_already_exists(path));
    }
    debug!("Inserting field {}", path);
    write_child(path, parent, child_key, value)
}

/// Overwrite the field at `path`, which must already exist.
pub fn update_field(path: &str, value: Value, root: &mut Value) -> Result<()> {
    let (parent, child_key) = existing_parent(path, root)?;
    if step(parent, &child_key).is_none() {
        return Err(FieldPathError::field_does_not_exist(path));
    }
    debug!("Updating field {}", path);
    write_child(path, parent, child_key, value)
}

/// Write the field at `path` whether or not it exists. Only the parent must exist.
pub fn upsert_field(path: &str, value: Value, root: &mut Value) -> Result<()> {
    let (parent, child_key) = existing_parent(path, root)?;
    debug!("Upserting field {}", path);
    write_child(path, parent, child_key, value)
}

/// Remove the field at `path` and return it.
///
/// Sequence elements after a removed index shift down. Deleting something
/// that is not there, including an index that is not a number, is a no-op
/// returning `Ok(None)`.
pub fn delete_field(path: &str, root: &mut Value) -> Result<Option<Value>> {
    let ParentChildMut {
        parent, child_key, ..
    } = traverse_to_parent_mut(path, root)?;

    let removed = match parent {
        Some(Value::Sequence(seq)) => match child_key.parse::<usize>() {
            Ok(index) if index < seq.len() => Some(seq.remove(index)),
            _ => None,
        },
        Some(Value::Mapping(map)) => {
            resolve_key(map, &child_key).and_then(|key| map.shift_remove(&key))
        }
        _ => None,
    };

    if removed.is_some() {
        debug!("Deleted field {}", path);
    } else {
        debug!("Nothing to delete at {}", path);
    }
    Ok(removed)
}

fn existing_parent<'v>(path: &str, root: &'v mut Value) -> Result<(&'v mut Value, String)> {
    let ParentChildMut {
        parent, child_key, ..
    } = traverse_to_parent_mut(path, root)?;
    let parent = parent.ok_or_else(|| FieldPathError::missing_parent(path))?;
    Ok((parent, child_key))
}

/// Store `value` under `key` in `parent`.
///
/// A sequence index may name an existing element or the slot just past the end.
fn write_child(path: &str, parent: &mut Value, key: String, value: Value) -> Result<()> {
    match parent {
        Value::Mapping(map) => {
            let key = resolve_key(map, &key).unwrap_or(Value::String(key));
            map.insert(key, value);
            Ok(())
        }
        Value::Sequence(seq) => {
            let index = key.parse::<usize>().map_err(|_| {
                FieldPathError::unsupported_target(
                    path,
                    format!("\"{}\" is not an index into a sequence", key),
                )
            })?;
            match index.cmp(&seq.len()) {
                Ordering::Less => seq[index] = value,
                Ordering::Equal => seq.push(value),
                Ordering::Greater => {
                    return Err(FieldPathError::unsupported_target(
                        path,
                        "index out of range",
                    ))
                }
            }
            Ok(())
        }
        _ => Err(FieldPathError::unsupported_target(
            path,
            "the parent is neither a mapping nor a sequence",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_has_and_get() {
        let t = yaml("a:\n  b: 1\n  n: null\nlist: [x]");
        assert!(has_field("a.b", &t).unwrap());
        assert!(has_field("a.n", &t).unwrap());
        assert!(has_field("list[0]", &t).unwrap());
        assert!(has_field("", &t).unwrap());
        assert!(!has_field("a.c", &t).unwrap());
        assert!(!has_field("list[1]", &t).unwrap());
        assert_eq!(get_field("a.b", &t).unwrap(), Some(&yaml("1")));
        assert!(has_field("a..b", &t).is_err());
    }

    #[test]
    fn test_has_agrees_with_traverse() {
        let t = yaml("a: {b: [1, {c: 2}]}");
        for path in ["", "a", "a.b", "a.b[0]", "a.b[1].c", "a.b[2]", "z", "a.b[1].d"] {
            assert_eq!(
                has_field(path, &t).unwrap(),
                traverse(path, &t).unwrap().is_some()
            );
        }
    }

    #[test]
    fn test_insert_then_get() {
        let mut t = yaml("a: {}");
        insert_field("a.b", yaml("v"), &mut t).unwrap();
        assert_eq!(get_field("a.b", &t).unwrap(), Some(&yaml("v")));

        insert_field("top", yaml("[1, 2]"), &mut t).unwrap();
        assert_eq!(t, yaml("a: {b: v}\ntop: [1, 2]"));
    }

    #[test]
    fn test_insert_existing_fails() {
        let mut t = yaml("a: 1");
        let err = insert_field("a", yaml("2"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::FieldAlreadyExists { .. }));
        assert_eq!(t, yaml("a: 1"));

        // null is an existing value
        let mut t = yaml("a: null");
        assert!(insert_field("a", yaml("2"), &mut t).is_err());
    }

    #[test]
    fn test_insert_missing_parent_fails() {
        let mut t = yaml("a: 1");
        let err = insert_field("x.y", yaml("2"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::MissingParent { .. }));
    }

    #[test]
    fn test_update() {
        let mut t = yaml("a: {b: 1}");
        update_field("a.b", yaml("2"), &mut t).unwrap();
        assert_eq!(t, yaml("a: {b: 2}"));

        let err = update_field("a.c", yaml("3"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::FieldDoesNotExist { .. }));

        let err = update_field("x.c", yaml("3"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::MissingParent { .. }));
    }

    #[test]
    fn test_upsert_last_write_wins() {
        let mut t = yaml("a: {}");
        upsert_field("a.b", yaml("1"), &mut t).unwrap();
        upsert_field("a.b", yaml("2"), &mut t).unwrap();
        assert_eq!(t, yaml("a: {b: 2}"));

        let err = upsert_field("x.b", yaml("1"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::MissingParent { .. }));
    }

    #[test]
    fn test_mutators_reject_root() {
        let mut t = yaml("a: 1");
        for result in [
            insert_field("", yaml("1"), &mut t),
            update_field("", yaml("1"), &mut t),
            upsert_field("", yaml("1"), &mut t),
        ] {
            assert!(matches!(
                result,
                Err(FieldPathError::SelfReferenceTraversal { .. })
            ));
        }
        assert!(delete_field("", &mut t).is_err());
    }

    #[test]
    fn test_sequence_writes() {
        let mut t = yaml("s: [a, b]");
        update_field("s[1]", yaml("B"), &mut t).unwrap();
        insert_field("s[2]", yaml("c"), &mut t).unwrap();
        assert_eq!(t, yaml("s: [a, B, c]"));

        upsert_field("s[3]", yaml("d"), &mut t).unwrap();
        assert_eq!(t, yaml("s: [a, B, c, d]"));

        let err = upsert_field("s.name", yaml("x"), &mut t).unwrap_err();
        assert!(matches!(err, FieldPathError::UnsupportedTarget { .. }));
    }

    #[test]
    fn test_sequence_write_past_end_fails() {
        let mut t = yaml("s: [a]");
        for path in ["s[18446744073709551615]", "s[5]"] {
            let err = upsert_field(path, yaml("x"), &mut t).unwrap_err();
            assert!(matches!(err, FieldPathError::UnsupportedTarget { .. }), "{path}");
        }
        assert!(matches!(
            insert_field("s[2]", yaml("x"), &mut t),
            Err(FieldPathError::UnsupportedTarget { .. })
        ));
        assert_eq!(t, yaml("s: [a]"));
    }

    #[test]
    fn test_write_into_scalar_fails() {
        let mut t = yaml("title: hello\nempty: null");
        assert!(matches!(
            upsert_field("title.sub", yaml("x"), &mut t),
            Err(FieldPathError::UnsupportedTarget { .. })
        ));
        assert!(matches!(
            upsert_field("empty.sub", yaml("x"), &mut t),
            Err(FieldPathError::UnsupportedTarget { .. })
        ));
    }

    #[test]
    fn test_scalar_key_is_reused() {
        let mut t = yaml("1: one");
        update_field("[1]", yaml("uno"), &mut t).unwrap();
        assert_eq!(t, yaml("1: uno"));
    }

    #[test]
    fn test_delete_array_element() {
        let mut t = yaml("b: {d: [3, 4]}");
        let removed = delete_field("b.d[0]", &mut t).unwrap();
        assert_eq!(removed, Some(yaml("3")));
        assert_eq!(t, yaml("b: {d: [4]}"));
    }

    #[test]
    fn test_delete_twice_is_noop() {
        let mut t = yaml("a: 1\nb: 2");
        assert_eq!(delete_field("a", &mut t).unwrap(), Some(yaml("1")));
        assert_eq!(delete_field("a", &mut t).unwrap(), None);
        assert_eq!(t, yaml("b: 2"));

        let mut t = yaml("s: [1]");
        delete_field("s[0]", &mut t).unwrap();
        assert_eq!(delete_field("s[0]", &mut t).unwrap(), None);
        assert_eq!(t, yaml("s: []"));
    }

    #[test]
    fn test_delete_noops() {
        let original = yaml("s: [1, 2]\nm: {k: v}\nscalar: 3");
        let mut t = original.clone();
        assert_eq!(delete_field("s.name", &mut t).unwrap(), None);
        assert_eq!(delete_field("s[9]", &mut t).unwrap(), None);
        assert_eq!(delete_field("m.absent", &mut t).unwrap(), None);
        assert_eq!(delete_field("missing.parent", &mut t).unwrap(), None);
        assert_eq!(delete_field("scalar.x", &mut t).unwrap(), None);
        assert_eq!(t, original);
    }
}
