//! Error types for the fieldpath library
//!
//! Path and field errors come from the traversal engine; the remaining
//! variants cover document I/O, YAML handling and settings migration.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum FieldPathError {
    /// Grammar violation found while scanning an object path
    #[error("Invalid character {} at position {index} in \"{path}\", {reason}", display_char(.character))]
    InvalidPath {
        character: Option<char>,
        index: usize,
        path: String,
        reason: String,
    },

    /// The parent of the root was requested
    #[error("Can not traverse to parent on self reference \"{path}\"")]
    SelfReferenceTraversal { path: String },

    /// A mutator's target parent does not exist in the tree
    #[error("The parent to \"{path}\" does not exist, please create the parent first")]
    MissingParent { path: String },

    /// Insert precondition violated
    #[error("Field with key \"{path}\" does already exist")]
    FieldAlreadyExists { path: String },

    /// Update precondition violated
    #[error("Field with key \"{path}\" does not exist")]
    FieldDoesNotExist { path: String },

    /// The parent exists but can not hold the child key
    #[error("Can not write \"{path}\": {reason}")]
    UnsupportedTarget { path: String, reason: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Front matter parsing errors
    #[error("Invalid front matter in {path}: {reason}")]
    InvalidFrontMatter { path: PathBuf, reason: String },

    /// Settings version string errors
    #[error("Invalid version \"{version}\": {reason}")]
    InvalidVersion { version: String, reason: String },

    /// Value type conversion errors
    #[error("Type conversion error: cannot convert {from} to {to}")]
    TypeConversion { from: String, to: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FieldPathError>;

fn display_char(character: &Option<char>) -> String {
    match character {
        Some(c) => format!("'{}'", c),
        None => "end of path".to_string(),
    }
}

impl FieldPathError {
    /// Create a new invalid path error
    pub fn invalid_path(
        character: Option<char>,
        index: usize,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPath {
            character,
            index,
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn self_reference(path: impl Into<String>) -> Self {
        Self::SelfReferenceTraversal { path: path.into() }
    }

    pub fn missing_parent(path: impl Into<String>) -> Self {
        Self::MissingParent { path: path.into() }
    }

    pub fn field_already_exists(path: impl Into<String>) -> Self {
        Self::FieldAlreadyExists { path: path.into() }
    }

    pub fn field_does_not_exist(path: impl Into<String>) -> Self {
        Self::FieldDoesNotExist { path: path.into() }
    }

    pub fn unsupported_target(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new invalid front matter error
    pub fn invalid_front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a new type conversion error
    pub fn type_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::TypeConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether retrying after a caller-side fix can succeed.
    /// Failed field preconditions are recoverable, malformed paths are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound
                    | std::io::ErrorKind::PermissionDenied
                    | std::io::ErrorKind::AlreadyExists
            ),
            Self::InvalidPath { .. }
            | Self::SelfReferenceTraversal { .. }
            | Self::FileNotFound { .. } => false,
            Self::MissingParent { .. }
            | Self::FieldAlreadyExists { .. }
            | Self::FieldDoesNotExist { .. }
            | Self::UnsupportedTarget { .. }
            | Self::InvalidFrontMatter { .. }
            | Self::InvalidVersion { .. }
            | Self::TypeConversion { .. }
            | Self::Validation { .. } => true,
            Self::Yaml(_) | Self::Regex(_) => true,
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileNotFound { .. } => ErrorSeverity::Critical,
            Self::InvalidPath { .. }
            | Self::SelfReferenceTraversal { .. }
            | Self::InvalidFrontMatter { .. }
            | Self::Yaml(_) => ErrorSeverity::High,
            Self::MissingParent { .. }
            | Self::FieldAlreadyExists { .. }
            | Self::FieldDoesNotExist { .. }
            | Self::UnsupportedTarget { .. }
            | Self::TypeConversion { .. } => ErrorSeverity::Medium,
            Self::Validation { .. } | Self::InvalidVersion { .. } => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
