//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use fieldpath::core::{parse_value, ObjectPath};
use fieldpath::error::{FieldPathError, Result};
use fieldpath::io::{
    resolve_files, FrontMatterReader, FrontMatterWriter, WriteOptions as LibWriteOptions,
    WriterConfig,
};
use fieldpath::Document;
use log::{debug, info, warn};
use serde_yaml::Value;
use std::path::PathBuf;

/// Which field mutation a write command performs
#[derive(Debug, Clone, Copy)]
pub enum Mutation {
    Insert,
    Update,
    Upsert,
}

/// Validate each path and print its canonical form with its segments
pub fn check_command(args: CheckArgs) -> Result<()> {
    let mut first_error = None;

    for raw in &args.paths {
        match raw.parse::<ObjectPath>() {
            Ok(path) => println!("{}\t{}\t{:?}", raw, path, path.segments()),
            Err(e) => {
                println!("{}\tinvalid: {}", raw, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub fn get_command(args: GetArgs) -> Result<()> {
    debug!("Executing get command with args: {:?}", args);
    let files = files_or_warn(&args.target.files);
    let reader = FrontMatterReader::new();
    let many = files.len() > 1;

    for file in &files {
        let document = reader.read_file(file)?;
        match document.get_field(&args.target.field)? {
            Some(value) => {
                if many {
                    println!("# {}", file.display());
                }
                output_value(value, args.format)?;
            }
            None => info!("{}: no field {}", file.display(), args.target.field),
        }
    }

    Ok(())
}

pub fn has_command(args: HasArgs) -> Result<()> {
    let files = files_or_warn(&args.target.files);
    let reader = FrontMatterReader::new();

    for file in &files {
        let exists = reader.read_file(file)?.has_field(&args.target.field)?;
        if files.len() > 1 {
            println!("{}: {}", file.display(), exists);
        } else {
            println!("{}", exists);
        }
    }

    Ok(())
}

/// Execute insert, update or upsert
pub fn set_command(mutation: Mutation, args: SetArgs) -> Result<()> {
    debug!("Executing {:?} command", mutation);
    let value = parse_value(&args.value, args.type_.map(Into::into))?;
    let field = args.target.field.clone();

    edit_files(&args.target, &args.write_options, |document| {
        match mutation {
            Mutation::Insert => document.insert_field(&field, value.clone()),
            Mutation::Update => document.update_field(&field, value.clone()),
            Mutation::Upsert => document.upsert_field(&field, value.clone()),
        }
    })
}

pub fn delete_command(args: DeleteArgs) -> Result<()> {
    debug!("Executing delete command");
    let field = args.target.field.clone();

    edit_files(&args.target, &args.write_options, |document| {
        if document.delete_field(&field)?.is_none() {
            debug!("Field {} not present", field);
        }
        Ok(())
    })
}

/// Read each file, apply `edit` and write the result back.
fn edit_files<F>(target: &FieldTarget, write_options: &WriteOptions, mut edit: F) -> Result<()>
where
    F: FnMut(&mut Document) -> Result<()>,
{
    let files = files_or_warn(&target.files);
    let reader = FrontMatterReader::new();
    let writer = create_writer(write_options);
    let options = create_write_options(write_options);
    let mut processed_count = 0;

    for file in files {
        debug!("Processing file: {}", file.display());
        let mut document = reader.read_file(&file)?;
        edit(&mut document)?;

        let result = writer.write_file(&document, &file, Some(options.clone()))?;
        if write_options.dry_run {
            println!("# {}\n{}", file.display(), result.content);
        }
        if result.modified {
            processed_count += 1;
        }
    }

    if write_options.dry_run {
        info!("Dry run: {} file(s) would change", processed_count);
    } else {
        info!("Updated {} file(s)", processed_count);
    }
    Ok(())
}

fn files_or_warn(paths: &[PathBuf]) -> Vec<PathBuf> {
    let files = resolve_files(paths);
    if files.is_empty() {
        warn!("No files found to process");
    }
    files
}

fn create_writer(write_options: &WriteOptions) -> FrontMatterWriter {
    FrontMatterWriter::with_config(WriterConfig {
        backup_suffix: write_options.backup_suffix.clone(),
        atomic_writes: !write_options.no_atomic,
    })
}

fn create_write_options(write_options: &WriteOptions) -> LibWriteOptions {
    LibWriteOptions {
        dry_run: write_options.dry_run,
        stdout: write_options.stdout,
    }
}

fn output_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let output = serde_yaml::to_string(value)?;
            print!("{}", output);
        }
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(value)
                .map_err(|e| FieldPathError::validation(e.to_string()))?;
            println!("{}", output);
        }
    }
    Ok(())
}
