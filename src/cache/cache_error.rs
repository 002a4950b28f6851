use std::io;
use thiserror::Error;

/// Errors that may occur while persisting the result cache.
///
/// Never fatal: an unreadable cache behaves as empty and an unwritable one
/// only loses the benefit for future runs.
#[derive(Debug, Error)]
pub enum CachePersistenceError {
    #[error("cache file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
