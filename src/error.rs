use crate::decoder::DecodeError;
use crate::fingerprint::FingerprintError;

use std::io;
use thiserror::Error;

/// Errors scoped to a single replay file.
///
/// None of these abort a run: the worker that hits one records its `Display`
/// text in the file's `FileResult` and moves on to the next file.
///
/// # Variants
///
/// * `Open` - The file could not be opened for analysis.
/// * `Fingerprint` - The header could not be read or is structurally invalid.
/// * `Decode` - The decoder reported a malformed or truncated stream.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to open: {0}")]
    Open(#[source] io::Error),
    #[error("checksum error: {0}")]
    Fingerprint(#[from] FingerprintError),
    #[error("failed to parse: {0}")]
    Decode(#[from] DecodeError),
}

/// Errors that stop a whole run before any file is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("job queue closed before all files were queued")]
    QueueClosed,
}
