use std::io;
use thiserror::Error;

/// Errors that may occur while fingerprinting a replay header.
///
/// # Variants
///
/// * `Io` - The file could not be opened, read or seeked, or ended early.
/// * `VarintOverflow` - A variable-length integer did not terminate within 32 bits.
/// * `UnexpectedMessageType` - The first record after the stamp is not a file header.
/// * `Header` - The file header record could not be decoded.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("variable-length integer exceeds 32 bits")]
    VarintOverflow,
    #[error("unexpected first proto message type: {0}")]
    UnexpectedMessageType(u32),
    #[error("failed to parse CDemoFileHeader: {0}")]
    Header(#[from] prost::DecodeError),
}
