//! Batch analysis of replay recordings: measures the value of grenades players
//! were still carrying when they were eliminated, across any number of files.

pub mod cache;
pub mod cli;
pub mod data_processing;
pub mod data_summary;
pub mod decoder;
pub mod error;
pub mod file_creation;
pub mod fingerprint;
pub mod input;
