//! Path Resolution - Pure dot-path access into a value tree
//!
//! Paths are opaque dot-separated strings ("user.profile.name"). Segments
//! address map keys only; no validation is performed that segments exist.
//!
//! # API
//!
//! - `read_path` - Read the value at a path (absent -> `Value::Null`)
//! - `write_path` - Write a value at a path, auto-creating intermediates
//!
//! # Example
//!
//! ```ignore
//! use spark_form::store::{read_path, write_path};
//! use spark_form::Value;
//!
//! let mut tree = Value::map();
//! write_path(&mut tree, "user.name", Value::from("Ada"));
//! assert_eq!(read_path(&tree, "user.name"), Value::from("Ada"));
//! assert_eq!(read_path(&tree, "user.missing"), Value::Null);
//! ```

use crate::types::Value;

/// Read the value at a dot-separated path.
///
/// Missing segments and traversal through non-map values yield
/// `Value::Null`. Never fails.
pub fn read_path(root: &Value, path: &str) -> Value {
    let mut current = root;
    for segment in path.split('.') {
        match current {
            Value::Map(entries) => match entries.get(segment) {
                Some(next) => current = next,
                None => return Value::Null,
            },
            _ => return Value::Null,
        }
    }
    current.clone()
}

/// Write a value at a dot-separated path.
///
/// Missing intermediate segments are created as empty maps. An intermediate
/// that exists but is not a map is replaced by a fresh map: the write
/// surface never errors.
pub fn write_path(root: &mut Value, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;

    for segment in &segments[..segments.len() - 1] {
        if !matches!(current, Value::Map(_)) {
            *current = Value::map();
        }
        let Value::Map(entries) = current else {
            unreachable!("intermediate was just coerced to a map");
        };
        current = entries
            .entry((*segment).to_string())
            .or_insert_with(Value::map);
    }

    if !matches!(current, Value::Map(_)) {
        *current = Value::map();
    }
    let Value::Map(entries) = current else {
        unreachable!("leaf parent was just coerced to a map");
    };
    let last = segments[segments.len() - 1];
    entries.insert(last.to_string(), value);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trip() {
        let mut tree = Value::map();
        write_path(&mut tree, "name", Value::from("Ada"));
        assert_eq!(read_path(&tree, "name"), Value::from("Ada"));
    }

    #[test]
    fn test_write_creates_intermediate_maps() {
        let mut tree = Value::map();
        write_path(&mut tree, "a.b.c", Value::Number(1.0));

        let a = read_path(&tree, "a");
        assert!(matches!(a, Value::Map(_)));
        let ab = read_path(&tree, "a.b");
        assert!(matches!(ab, Value::Map(_)));
        assert_eq!(read_path(&tree, "a.b.c"), Value::Number(1.0));
    }

    #[test]
    fn test_read_missing_path_is_null() {
        let tree = Value::map();
        assert_eq!(read_path(&tree, "nope"), Value::Null);
        assert_eq!(read_path(&tree, "deeply.missing.path"), Value::Null);
    }

    #[test]
    fn test_read_through_leaf_is_null() {
        let mut tree = Value::map();
        write_path(&mut tree, "a", Value::Number(1.0));
        assert_eq!(read_path(&tree, "a.b"), Value::Null);
    }

    #[test]
    fn test_write_replaces_non_map_intermediate() {
        let mut tree = Value::map();
        write_path(&mut tree, "a", Value::Str("leaf".to_string()));
        write_path(&mut tree, "a.b", Value::Number(2.0));
        assert_eq!(read_path(&tree, "a.b"), Value::Number(2.0));
        assert_eq!(read_path(&tree, "a.b.c"), Value::Null);
    }

    #[test]
    fn test_overwrite_leaf() {
        let mut tree = Value::map();
        write_path(&mut tree, "x.y", Value::Number(1.0));
        write_path(&mut tree, "x.y", Value::Number(2.0));
        assert_eq!(read_path(&tree, "x.y"), Value::Number(2.0));
    }

    #[test]
    fn test_sibling_paths_do_not_clobber() {
        let mut tree = Value::map();
        write_path(&mut tree, "user.first", Value::from("Ada"));
        write_path(&mut tree, "user.last", Value::from("Lovelace"));
        assert_eq!(read_path(&tree, "user.first"), Value::from("Ada"));
        assert_eq!(read_path(&tree, "user.last"), Value::from("Lovelace"));
    }

    #[test]
    fn test_single_segment_path() {
        let mut tree = Value::map();
        write_path(&mut tree, "flag", Value::Bool(true));
        assert_eq!(read_path(&tree, "flag"), Value::Bool(true));
    }

    #[test]
    fn test_reading_subtree_clones_it() {
        let mut tree = Value::map();
        write_path(&mut tree, "a.b", Value::Number(1.0));
        let subtree = read_path(&tree, "a");
        // Mutating the original afterwards leaves the copy untouched.
        write_path(&mut tree, "a.b", Value::Number(9.0));
        assert_eq!(read_path(&subtree, "b"), Value::Number(1.0));
    }
}
