use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "md" | "markdown" | "mdown" | "mkd" | "mkdn")
        })
        .unwrap_or(false)
}

/// Expand files and directories into the markdown files they contain.
///
/// Explicit file arguments are kept whatever their extension.
pub fn resolve_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_markdown(entry.path()) {
                    files.push(entry.path().to_owned());
                }
            }
        }
    }
    files
}

/// Last `/`-separated component of `path`
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether `path` has more than one `/`-separated component
pub fn is_path(path: &str) -> bool {
    path.contains('/')
}

/// Drop the text after the last `.`; names without a dot are returned as is
pub fn remove_file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}
