//! Durable fingerprint → result mapping shared by all workers.

pub mod cache_error;
pub mod result_cache;

pub use cache_error::CachePersistenceError;
pub use result_cache::ResultCache;
