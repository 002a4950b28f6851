use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that may occur during report file creation.
///
/// # Variants
///
/// * `Serialization` - The summary could not be serialized.
/// * `FileCreation` - The output file could not be created.
/// * `FileWrite` - Writing to the output file failed.
/// * `Csv` - A row of the tabular report could not be written.
#[derive(Debug, Error)]
pub enum FileCreationError {
    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to create {}: {source}", path.display())]
    FileCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write report: {0}")]
    FileWrite(#[from] io::Error),
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
}
