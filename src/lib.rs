//! fieldpath: addressing and editing nested YAML values with object paths
//!
//! An object path is a JavaScript-style property chain such as
//! `a.b[0]["c"]`. This library validates and parses such paths, walks
//! `serde_yaml::Value` trees with them and edits the addressed field in
//! place. On top of that it reads and writes the YAML front matter of
//! markdown files and migrates versioned settings.
//!
//! # Quick Start
//!
//! ## Paths and traversal
//!
//! ```rust
//! use fieldpath::{parse_path, traverse, validate_path, Result};
//!
//! fn main() -> Result<()> {
//!     let tree: serde_yaml::Value = serde_yaml::from_str("b: [{x: 1}, {b_1_a: a}]")?;
//!
//!     validate_path("b[1].b_1_a")?;
//!     assert_eq!(parse_path("b[1].b_1_a")?, vec!["b", "1", "b_1_a"]);
//!
//!     let value = traverse("b[1].b_1_a", &tree)?;
//!     assert_eq!(value.and_then(|v| v.as_str()), Some("a"));
//!     assert!(traverse("a[b].b", &tree).is_err());
//!     Ok(())
//! }
//! ```
//!
//! ## Editing fields
//!
//! ```rust
//! use fieldpath::{delete_field, insert_field, update_field, Result};
//! use serde_yaml::Value;
//!
//! fn main() -> Result<()> {
//!     let mut tree: Value = serde_yaml::from_str("b: {d: [3, 4]}")?;
//!
//!     insert_field("b.title", Value::from("new"), &mut tree)?;
//!     update_field("b.title", Value::from("changed"), &mut tree)?;
//!     delete_field("b.d[0]", &mut tree)?;
//!
//!     let expected: Value = serde_yaml::from_str("b: {d: [4], title: changed}")?;
//!     assert_eq!(tree, expected);
//!     Ok(())
//! }
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use fieldpath::{FrontMatterReader, FrontMatterWriter, Result};
//! use serde_yaml::Value;
//!
//! fn main() -> Result<()> {
//!     let mut document = FrontMatterReader::new().read_file("note.md")?;
//!     document.upsert_field("tags[0]", Value::from("rust"))?;
//!     FrontMatterWriter::new().write_file(&document, "note.md", None)?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: paths, traversal, field operations and the document type
//! - [`io`]: front matter reading, writing and file resolution
//! - [`settings`]: versioned settings and migration tables
//! - [`error`]: the error type shared by all of the above

pub use error::{ErrorSeverity, FieldPathError, Result};

pub use self::core::{
    delete_field, get_field, has_field, insert_field, parse_path, parse_value, traverse,
    traverse_mut, traverse_to_parent, traverse_to_parent_mut, update_field, upsert_field,
    validate_path, Document, ObjectPath, ParentChild, ParentChildMut, ValueType,
};

pub use io::{
    FrontMatterReader, FrontMatterWriter, ReaderConfig, WriteOptions, WriteResult, WriterConfig,
};

pub use settings::{migrate_settings, MigrationStep, Settings, Version};

pub mod core;
pub mod error;
pub mod io;
pub mod settings;

/// Field operations on markdown files
pub mod convenience {
    //! Each function reads the file's front matter, applies one field
    //! operation and, for the mutators, writes the file back.

    pub use crate::io::reader::convenience::*;
    pub use crate::io::writer::convenience::*;

    use crate::{Document, FrontMatterReader, FrontMatterWriter, Result, WriteResult};
    use serde_yaml::Value;
    use std::path::Path;

    fn edit_file<P, F>(path: P, edit: F) -> Result<WriteResult>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Document) -> Result<()>,
    {
        let path = path.as_ref();
        let mut document = FrontMatterReader::new().read_file(path)?;
        edit(&mut document)?;
        FrontMatterWriter::new().write_file(&document, path, None)
    }

    pub fn field_exists_in_file<P: AsRef<Path>>(path: P, field: &str) -> Result<bool> {
        FrontMatterReader::new().read_file(path)?.has_field(field)
    }

    pub fn get_field_from_file<P: AsRef<Path>>(path: P, field: &str) -> Result<Option<Value>> {
        let document = FrontMatterReader::new().read_file(path)?;
        Ok(document.get_field(field)?.cloned())
    }

    pub fn insert_field_in_file<P: AsRef<Path>>(
        path: P,
        field: &str,
        value: Value,
    ) -> Result<WriteResult> {
        edit_file(path, |document| document.insert_field(field, value))
    }

    pub fn update_field_in_file<P: AsRef<Path>>(
        path: P,
        field: &str,
        value: Value,
    ) -> Result<WriteResult> {
        edit_file(path, |document| document.update_field(field, value))
    }

    pub fn upsert_field_in_file<P: AsRef<Path>>(
        path: P,
        field: &str,
        value: Value,
    ) -> Result<WriteResult> {
        edit_file(path, |document| document.upsert_field(field, value))
    }

    /// Deleting an absent field leaves the file untouched.
    pub fn delete_field_in_file<P: AsRef<Path>>(path: P, field: &str) -> Result<WriteResult> {
        edit_file(path, |document| document.delete_field(field).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn markdown_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::with_suffix(".md").unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_end_to_end_workflow() {
        let temp_file = markdown_file(
            r#"---
title: Test Document
author: John Doe
tags: [rust, test]
---
# Hello World

This is the body content."#,
        );

        let reader = FrontMatterReader::new();
        let mut document = reader.read_file(temp_file.path()).unwrap();
        document
            .update_field("tags[1]", serde_yaml::Value::from("paths"))
            .unwrap();

        let writer = FrontMatterWriter::new();
        let result = writer.write_file(&document, temp_file.path(), None).unwrap();
        assert!(result.modified);

        let updated = reader.read_file(temp_file.path()).unwrap();
        assert_eq!(
            updated.get_field("tags[1]").unwrap().and_then(|v| v.as_str()),
            Some("paths")
        );
        assert_eq!(
            updated.body().trim(),
            "# Hello World\n\nThis is the body content."
        );
    }

    #[test]
    fn test_convenience_functions() {
        let temp_file = markdown_file("---\ntitle: Convenience Test\ncount: 42\n---\nBody content");

        let document = convenience::read_document(temp_file.path()).unwrap();
        assert_eq!(document.body(), "Body content");

        assert!(convenience::field_exists_in_file(temp_file.path(), "count").unwrap());
        convenience::insert_field_in_file(temp_file.path(), "extra", 1.into()).unwrap();
        convenience::upsert_field_in_file(temp_file.path(), "count", 43.into()).unwrap();
        convenience::delete_field_in_file(temp_file.path(), "title").unwrap();

        assert_eq!(
            convenience::get_field_from_file(temp_file.path(), "count").unwrap(),
            Some(43.into())
        );
        assert!(!convenience::field_exists_in_file(temp_file.path(), "title").unwrap());
        assert!(convenience::update_field_in_file(temp_file.path(), "title", "x".into()).is_err());
    }

    #[test]
    fn test_error_handling() {
        let reader = FrontMatterReader::new();
        let nonexistent_result = reader.read_file("/nonexistent/file.md");
        assert!(matches!(
            nonexistent_result.unwrap_err(),
            FieldPathError::FileNotFound { .. }
        ));

        assert!(matches!(
            validate_path(".a"),
            Err(FieldPathError::InvalidPath { .. })
        ));
    }
}
