//! File reading and front matter parsing

use crate::core::Document;
use crate::error::{FieldPathError, Result};
use gray_matter::{engine::YAML, Matter};
use log::debug;
use regex::Regex;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// A leading `---` line, optional YAML lines, then a closing `---` line
const FRONT_MATTER_PATTERN: &str = r"^---\r?\n(?:[\s\S]*?\r?\n)?---(?:\r?\n|$)";

fn front_matter_block() -> Result<&'static Regex> {
    static BLOCK: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    BLOCK
        .get_or_init(|| Regex::new(FRONT_MATTER_PATTERN))
        .as_ref()
        .map_err(|e| FieldPathError::Regex(e.clone()))
}

/// Configuration for the front matter reader
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Maximum file size to read (in bytes)
    pub max_file_size: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: Some(10 * 1024 * 1024), // 10MB default limit
        }
    }
}

/// Front matter reader
pub struct FrontMatterReader {
    config: ReaderConfig,
    matter: Matter<YAML>,
}

impl FrontMatterReader {
    pub fn new() -> Self {
        Self::with_config(ReaderConfig::default())
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self {
            config,
            matter: Matter::<YAML>::new(),
        }
    }

    /// Read a document from a file path
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(FieldPathError::file_not_found(path));
        }

        if let Some(max_size) = self.config.max_file_size {
            let metadata = fs::metadata(path)?;
            if metadata.len() as usize > max_size {
                return Err(FieldPathError::validation(format!(
                    "File too large: {} bytes (limit: {} bytes)",
                    metadata.len(),
                    max_size
                )));
            }
        }

        debug!("Reading {}", path.display());
        let content = fs::read_to_string(path)?;
        self.parse_content(&content, Some(path))
    }

    /// Parse document from string content
    ///
    /// The body is everything after the closing `---` line, byte for byte.
    pub fn parse_content(&self, content: &str, path: Option<&Path>) -> Result<Document> {
        let Some(block) = front_matter_block()?.find(content) else {
            return Ok(Document::new(None, content.to_string()));
        };
        let body = content[block.end()..].to_string();

        let source = path.unwrap_or(Path::new("<input>"));
        let parsed = self.matter.parse(block.as_str());
        // key order is kept by deserializing the raw block ourselves
        let front_matter = if parsed.matter.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(&parsed.matter)
                .map_err(|e| FieldPathError::invalid_front_matter(source, e.to_string()))?
        };

        match front_matter {
            Value::Mapping(_) | Value::Null => Ok(Document::new(Some(front_matter), body)),
            other => Err(FieldPathError::invalid_front_matter(
                source,
                format!("Expected mapping or null, found {:?}", other),
            )),
        }
    }

    /// Read only the front matter of a file; an empty mapping if it has none
    pub fn read_front_matter_only<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let document = self.read_file(path)?;
        Ok(document.front_matter().clone())
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
}

impl Default for FrontMatterReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a leading front matter block from `content`, leaving the body untouched
pub fn remove_front_matter(content: &str) -> Result<String> {
    Ok(front_matter_block()?.replace(content, "").into_owned())
}

/// Convenience functions for common operations
pub mod convenience {
    use super::*;

    /// Read a document from a file path with default settings
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
        FrontMatterReader::new().read_file(path)
    }

    /// Parse a document from string content with default settings
    pub fn parse_document(content: &str) -> Result<Document> {
        FrontMatterReader::new().parse_content(content, None)
    }
}
