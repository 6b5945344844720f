//! Markdown document with a YAML front matter block
//!
//! The front matter is held as a plain `serde_yaml::Value` tree so the field
//! operations in [`crate::core::fields`] work on it directly.

use crate::core::fields;
use crate::error::Result;
use serde_yaml::{Mapping, Value};

/// Represents a markdown document with front matter and body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    front_matter: Value,
    body: String,
    had_front_matter: bool,
}

impl Document {
    /// Create a document; absent or `null` front matter becomes an empty mapping
    pub fn new(front_matter: Option<Value>, body: String) -> Self {
        let had_front_matter = front_matter.is_some();
        let front_matter = match front_matter {
            None | Some(Value::Null) => Value::Mapping(Mapping::new()),
            Some(value) => value,
        };
        Self {
            front_matter,
            body,
            had_front_matter,
        }
    }

    /// Create a new empty document
    pub fn empty() -> Self {
        Self::new(None, String::new())
    }

    pub fn front_matter(&self) -> &Value {
        &self.front_matter
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the source text carried a front matter block
    pub fn had_front_matter_block(&self) -> bool {
        self.had_front_matter
    }

    /// Check if the document has non-empty front matter
    pub fn has_front_matter(&self) -> bool {
        match &self.front_matter {
            Value::Mapping(map) => !map.is_empty(),
            Value::Null => false,
            _ => true,
        }
    }

    pub fn has_field(&self, path: &str) -> Result<bool> {
        fields::has_field(path, &self.front_matter)
    }

    pub fn get_field(&self, path: &str) -> Result<Option<&Value>> {
        fields::get_field(path, &self.front_matter)
    }

    pub fn insert_field(&mut self, path: &str, value: Value) -> Result<()> {
        fields::insert_field(path, value, &mut self.front_matter)
    }

    pub fn update_field(&mut self, path: &str, value: Value) -> Result<()> {
        fields::update_field(path, value, &mut self.front_matter)
    }

    pub fn upsert_field(&mut self, path: &str, value: Value) -> Result<()> {
        fields::upsert_field(path, value, &mut self.front_matter)
    }

    pub fn delete_field(&mut self, path: &str) -> Result<Option<Value>> {
        fields::delete_field(path, &mut self.front_matter)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
