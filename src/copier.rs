use crate::error::{Error, Result};
use crate::options::ExecutionPlan;
use crate::progress::ProgressSink;
use crate::scanner;
use crate::writer;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Copy the plan's source file into every discovered target directory
///
/// # Arguments
/// * `plan` - Resolved options for this run
/// * `progress` - Receives one message per destination
///
/// # Returns
/// * `Result<usize>` - Number of files written; zero when no directory matched
pub async fn copy(plan: &ExecutionPlan, progress: Arc<dyn ProgressSink>) -> Result<usize> {
    // Find the target directories first; no match at all is not an error
    let directories = discover(plan).await?;
    tracing::info!(
        count = directories.len(),
        root = %plan.target_root.display(),
        "found target directories"
    );

    // Read the source once and share it with every write
    let content = read_source(&plan.source_path).await?;

    // Each destination keeps the source file name
    let file_name = plan.source_path.file_name().ok_or_else(|| {
        Error::configuration(format!(
            "Source path has no file name: <{}>.",
            plan.source_path.display()
        ))
    })?;
    let destinations: Vec<PathBuf> = directories
        .iter()
        .map(|dir| dir.join(file_name))
        .collect();
    if !plan.replacements.is_empty() {
        tracing::debug!(
            rules = plan.replacements.len(),
            "applying replacements per destination"
        );
    }

    // Write all destinations concurrently
    let written = writer::write_all(
        destinations,
        content,
        Arc::new(plan.replacements.clone()),
        progress,
        plan.max_concurrency,
    )
    .await?;

    tracing::info!(written, source = %plan.source_path.display(), "copy finished");
    Ok(written)
}

/// Directory walking is blocking, so it runs off the async workers
async fn discover(plan: &ExecutionPlan) -> Result<Vec<PathBuf>> {
    let root = plan.target_root.clone();
    let pattern = plan.search_pattern.clone();
    let mode = plan.search_mode;

    tokio::task::spawn_blocking(move || scanner::discover(&root, &pattern, mode))
        .await
        .map_err(|e| Error::Unexpected {
            message: e.to_string(),
        })?
}

/// Read the whole source file as text. Invalid UTF-8 is replaced rather than rejected.
async fn read_source(path: &Path) -> Result<Arc<str>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| operation("source file read", path, source))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(Arc::from(text)),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "source file is not valid UTF-8; invalid sequences replaced"
            );
            Ok(Arc::from(String::from_utf8_lossy(e.as_bytes()).into_owned()))
        }
    }
}

fn operation(operation: &'static str, path: &Path, source: io::Error) -> Error {
    Error::Operation {
        operation,
        path: path.to_path_buf(),
        source,
    }
}
