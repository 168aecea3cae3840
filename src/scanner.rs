use crate::error::{Error, Result};
use crate::options::SearchMode;
use globset::{Glob, GlobMatcher};
use ignore::{DirEntry, WalkBuilder};
use std::io;
use std::path::{Path, PathBuf};

/// Find the directories below `root` whose name matches `pattern`
///
/// # Arguments
/// * `root` - Directory to search; never part of the result itself
/// * `pattern` - Glob matched against each directory's base name
/// * `mode` - Whether to look at immediate children only or at any depth
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Matching directories sorted by path; empty when nothing matches
pub fn discover(root: &Path, pattern: &str, mode: SearchMode) -> Result<Vec<PathBuf>> {
    let matcher = compile(pattern)?;

    // Walk everything: hidden folders and ignored folders are valid destinations too
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    if mode == SearchMode::ShallowOnly {
        builder.max_depth(Some(1));
    }

    let mut found = Vec::new();
    for result in builder.build() {
        let entry = result.map_err(|err| walk_error(root, err))?;
        if entry.depth() == 0 || !is_directory(&entry) {
            continue;
        }

        let matches = entry
            .path()
            .file_name()
            .is_some_and(|name| matcher.is_match(Path::new(name)));
        if matches {
            found.push(entry.into_path());
        }
    }

    found.sort();
    tracing::debug!(
        root = %root.display(),
        pattern,
        ?mode,
        count = found.len(),
        "discovered target directories"
    );
    Ok(found)
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::configuration(format!("Invalid search pattern <{}>: {}", pattern, e)))
}

/// Directories, and symbolic links that point at one
fn is_directory(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(kind) if kind.is_dir() => true,
        Some(kind) if kind.is_symlink() => entry.path().is_dir(),
        _ => false,
    }
}

fn walk_error(root: &Path, err: ignore::Error) -> Error {
    let source = match err.into_io_error() {
        Some(io_err) => io_err,
        None => io::Error::other("directory traversal failed"),
    };
    Error::Operation {
        operation: "target directory discovery",
        path: root.to_path_buf(),
        source,
    }
}
