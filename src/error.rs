use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the copy pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving options, discovering targets or writing files
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing command line input, detected before anything is written
    #[error("{message}")]
    Configuration { message: String },

    /// A pipeline step that should always produce a result could not be performed
    #[error("{operation} failed for {}", path.display())]
    Operation {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing a single destination file failed
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// One or more destination writes failed; `first` is the first failure observed
    #[error("{failed} of {total} destination writes failed")]
    Aggregate {
        failed: usize,
        total: usize,
        #[source]
        first: Box<Error>,
    },

    /// Anything else, such as a write task that panicked
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether this error came from validating user input
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
