//! Report files: the JSON summary and the per-player table.

pub mod file_creation_error;
pub mod file_creator;

pub use file_creation_error::FileCreationError;
pub use file_creator::{create_csv_file, create_json_file};
