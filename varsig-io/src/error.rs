use std::io;
use thiserror::Error;

/// Error type for varsig-io operations.
#[derive(Error, Debug)]
pub enum TableWriteError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for varsig-io operations.
pub type Result<T> = std::result::Result<T, TableWriteError>;
