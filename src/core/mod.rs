//! Object paths and the operations that walk and edit YAML trees with them
//!
//! - path: grammar, validation and parsing of object paths
//! - traverse: lookups along parsed paths, including parent/child splits
//! - fields: has/get/insert/update/upsert/delete on a tree
//! - document: a markdown document whose front matter is such a tree
//! - value: command-line string to YAML value conversion

pub mod document;
pub mod fields;
pub mod path;
pub mod traverse;
pub mod value;

pub use document::Document;
pub use fields::{delete_field, get_field, has_field, insert_field, update_field, upsert_field};
pub use path::{normalize_quotes, parse_path, validate_path, ObjectPath};
pub use traverse::{
    traverse, traverse_mut, traverse_segments, traverse_segments_mut, traverse_to_parent,
    traverse_to_parent_mut, Child, Parent, ParentChild, ParentChildMut,
};
pub use value::{parse_value, ValueType};
