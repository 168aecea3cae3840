use crate::error::{Error, Result};
use crate::options::Replacements;
use crate::progress::ProgressSink;
use crate::replacer;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Content prepared for a single destination file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteJob {
    pub destination: PathBuf,
    pub content: String,
}

impl WriteJob {
    /// Apply the replacements for `destination` to the shared source content
    pub fn build(source: &str, replacements: &Replacements, destination: PathBuf) -> Self {
        let content = replacer::transform(source, replacements, &destination);
        Self { destination, content }
    }

    /// Create or truncate the destination and write the content as UTF-8.
    /// The handle is closed when this returns, whether or not the write succeeded.
    pub async fn write(self) -> Result<PathBuf> {
        let WriteJob { destination, content } = self;

        match write_file(&destination, content.as_bytes()).await {
            Ok(()) => Ok(destination),
            Err(source) => Err(Error::Write { path: destination, source }),
        }
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(bytes).await?;
    // tokio completes writes in the background; flush surfaces their errors
    file.flush().await
}

/// Write the transformed source content into every destination concurrently
///
/// Every write runs to completion even after another one fails; the aggregate
/// result is only returned once all of them are finished.
///
/// # Arguments
/// * `destinations` - Destination file paths
/// * `source` - Source content shared by every write
/// * `replacements` - Replacement rules applied per destination
/// * `progress` - Told about each destination before its write starts
/// * `max_concurrency` - Optional cap on writes in flight
///
/// # Returns
/// * `Result<usize>` - Number of files written
pub async fn write_all(
    destinations: Vec<PathBuf>,
    source: Arc<str>,
    replacements: Arc<Replacements>,
    progress: Arc<dyn ProgressSink>,
    max_concurrency: Option<NonZeroUsize>,
) -> Result<usize> {
    let total = destinations.len();
    let limit = max_concurrency.map(|n| Arc::new(Semaphore::new(n.get())));

    // Start one task per destination; each task owns its file handle
    let mut tasks = JoinSet::new();
    for destination in destinations {
        let source = Arc::clone(&source);
        let replacements = Arc::clone(&replacements);
        let progress = Arc::clone(&progress);
        let limit = limit.clone();

        tasks.spawn(async move {
            // Wait for a slot when the number of writes in flight is capped
            let _permit = match limit {
                Some(semaphore) => Some(semaphore.acquire_owned().await.map_err(|e| {
                    Error::Unexpected {
                        message: e.to_string(),
                    }
                })?),
                None => None,
            };

            // Report first, then transform and write
            progress.report(&format!("Copy file to {}.", destination.display()));
            WriteJob::build(&source, &replacements, destination)
                .write()
                .await
        });
    }

    // Drain every task, even after a failure, keeping the first error seen
    let mut written = 0;
    let mut failed = 0;
    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined
            .map_err(|e| Error::Unexpected {
                message: e.to_string(),
            })
            .and_then(|result| result);

        match outcome {
            Ok(path) => {
                written += 1;
                tracing::debug!(path = %path.display(), "wrote destination file");
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(error = %err, "destination write failed");
                first_error.get_or_insert(err);
            }
        }
    }

    // Files written by the other tasks stay in place
    match first_error {
        Some(first) => Err(Error::Aggregate {
            failed,
            total,
            first: Box::new(first),
        }),
        None => Ok(written),
    }
}
