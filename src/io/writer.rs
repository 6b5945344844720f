//! Rendering documents back to text and writing them to disk

use crate::core::Document;
use crate::error::{FieldPathError, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Configuration for the front matter writer
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Copy the original to `<file><suffix>` before overwriting it
    pub backup_suffix: Option<String>,
    /// Use atomic writes (write to temp file first, then rename)
    pub atomic_writes: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            backup_suffix: None,
            atomic_writes: true,
        }
    }
}

/// Write operation options for individual operations
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Render without touching the file
    pub dry_run: bool,
    /// Print the rendered document instead of writing it
    pub stdout: bool,
}

/// Result of a write operation
#[derive(Debug)]
pub struct WriteResult {
    /// Whether the rendered content differs from what was on disk
    pub modified: bool,
    /// Path where the content was written (None for stdout)
    pub output_path: Option<PathBuf>,
    pub backup_path: Option<PathBuf>,
    /// The rendered document
    pub content: String,
}

/// Front matter writer
pub struct FrontMatterWriter {
    config: WriterConfig,
}

impl FrontMatterWriter {
    pub fn new() -> Self {
        Self {
            config: WriterConfig::default(),
        }
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Render a document as `---\n<yaml>\n---\n<body>`.
    ///
    /// An empty front matter mapping renders as the body alone.
    pub fn format_document(&self, document: &Document) -> Result<String> {
        if !document.has_front_matter() {
            return Ok(document.body().to_string());
        }
        let yaml = serde_yaml::to_string(document.front_matter())?;
        Ok(format!(
            "---\n{}\n---\n{}",
            yaml.trim_start_matches("---").trim(),
            document.body()
        ))
    }

    /// Write a document to a file
    pub fn write_file<P: AsRef<Path>>(
        &self,
        document: &Document,
        path: P,
        options: Option<WriteOptions>,
    ) -> Result<WriteResult> {
        let path = path.as_ref();
        let options = options.unwrap_or_default();
        let new_content = self.format_document(document)?;

        let original_content = if path.exists() {
            Some(fs::read_to_string(path)?)
        } else {
            None
        };
        let modified = match &original_content {
            Some(original) => original != &new_content,
            None => !new_content.is_empty(),
        };

        let mut result = WriteResult {
            modified,
            output_path: Some(path.to_path_buf()),
            backup_path: None,
            content: new_content,
        };

        if options.dry_run {
            debug!("Dry run, leaving {} untouched", path.display());
            return Ok(result);
        }

        if options.stdout {
            println!("{}", result.content);
            result.output_path = None;
            return Ok(result);
        }

        if !modified {
            debug!("No changes for {}", path.display());
            return Ok(result);
        }

        if let (Some(suffix), true) = (&self.config.backup_suffix, original_content.is_some()) {
            result.backup_path = Some(self.create_backup(path, suffix)?);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if self.config.atomic_writes {
            self.write_atomic(path, &result.content)?;
        } else {
            fs::write(path, &result.content)?;
        }
        info!("Updated {}", path.display());

        Ok(result)
    }

    fn create_backup(&self, original_path: &Path, suffix: &str) -> Result<PathBuf> {
        let mut backup_name = original_path.as_os_str().to_owned();
        backup_name.push(suffix);
        let backup_path = PathBuf::from(backup_name);

        fs::copy(original_path, &backup_path)?;
        debug!("Backed up {} to {}", original_path.display(), backup_path.display());
        Ok(backup_path)
    }

    /// Write file atomically using temporary file
    fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let parent_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        temp_file
            .persist(path)
            .map_err(|e| FieldPathError::Io(e.error))?;
        Ok(())
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }
}

impl Default for FrontMatterWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience functions for common operations
pub mod convenience {
    use super::*;

    /// Write a document to a file with default settings
    pub fn write_document<P: AsRef<Path>>(document: &Document, path: P) -> Result<WriteResult> {
        FrontMatterWriter::new().write_file(document, path, None)
    }

    /// Render what would be written without writing it
    pub fn preview_changes<P: AsRef<Path>>(document: &Document, path: P) -> Result<WriteResult> {
        let options = WriteOptions {
            dry_run: true,
            ..Default::default()
        };
        FrontMatterWriter::new().write_file(document, path, Some(options))
    }
}
