//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "fieldpath",
    version,
    about = "Read and edit YAML front matter fields addressed by object paths",
    long_about = "fieldpath addresses front matter fields with JavaScript-style object paths \
                  such as `a.b[0][\"c\"]` and reads, inserts, updates, upserts or deletes \
                  them in markdown files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate object paths and print their segments
    Check(CheckArgs),
    /// Print the value of a field
    Get(GetArgs),
    /// Print whether a field exists
    Has(HasArgs),
    /// Create a field that does not exist yet
    Insert(SetArgs),
    /// Overwrite a field that already exists
    Update(SetArgs),
    /// Write a field whether or not it exists
    Upsert(SetArgs),
    /// Remove a field
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Object paths to validate
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// The addressed field and the files to look in
#[derive(Args, Debug, Clone)]
pub struct FieldTarget {
    /// Object path of the field, e.g. `author.name` or `tags[0]`
    #[arg(short, long)]
    pub field: String,

    /// Files or directories to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub target: FieldTarget,

    /// Output format
    #[arg(long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct HasArgs {
    #[command(flatten)]
    pub target: FieldTarget,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub target: FieldTarget,

    /// Value to write
    #[arg(long)]
    pub value: String,

    /// Type of the value; detected from the text when omitted
    #[arg(long = "type", value_enum)]
    pub type_: Option<ValueType>,

    #[command(flatten)]
    pub write_options: WriteOptions,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: FieldTarget,

    #[command(flatten)]
    pub write_options: WriteOptions,
}

/// Common options for write operations
#[derive(Args, Debug, Clone)]
pub struct WriteOptions {
    /// Print the resulting documents without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Create backup files with this suffix
    #[arg(long, value_name = "SUFFIX")]
    pub backup_suffix: Option<String>,

    /// Output modified content to stdout instead of writing to file
    #[arg(long)]
    pub stdout: bool,

    /// Write files in place instead of through a temporary file
    #[arg(long)]
    pub no_atomic: bool,
}

/// Output formats for values
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Value types for --type
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ValueType {
    String,
    Int,
    Float,
    Bool,
    Array,
    Object,
}

impl From<ValueType> for fieldpath::ValueType {
    fn from(vt: ValueType) -> Self {
        match vt {
            ValueType::String => Self::String,
            ValueType::Int => Self::Int,
            ValueType::Float => Self::Float,
            ValueType::Bool => Self::Bool,
            ValueType::Array => Self::Array,
            ValueType::Object => Self::Object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_command() {
        let cli = Cli::try_parse_from([
            "fieldpath",
            "upsert",
            "--field",
            "author.name",
            "--value",
            "42",
            "--type",
            "string",
            "--dry-run",
            "a.md",
            "docs",
        ])
        .unwrap();

        match cli.command {
            Commands::Upsert(args) => {
                assert_eq!(args.target.field, "author.name");
                assert_eq!(args.target.files.len(), 2);
                assert!(matches!(args.type_, Some(ValueType::String)));
                assert!(args.write_options.dry_run);
                assert!(!args.write_options.stdout);
            }
            _ => panic!("expected upsert"),
        }
    }

    #[test]
    fn test_global_verbosity_flags() {
        let cli = Cli::try_parse_from(["fieldpath", "check", "a.b", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(Cli::try_parse_from(["fieldpath", "-v", "-q", "check", "a"]).is_err());
    }

    #[test]
    fn test_files_are_required() {
        assert!(Cli::try_parse_from(["fieldpath", "delete", "--field", "a"]).is_err());
        assert!(Cli::try_parse_from(["fieldpath", "check"]).is_err());
    }
}
