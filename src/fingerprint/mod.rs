//! Header-based content identity for replay files, used as the cache key.

pub mod demo_header;
pub mod fingerprint_error;
pub mod fingerprint_extractor;
pub mod varint;

pub use fingerprint_error::FingerprintError;
pub use fingerprint_extractor::{extract_fingerprint, FingerprintInfo};
