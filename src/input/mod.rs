//! Resolution of the replay files a run should process.

pub mod input_collector;

pub use input_collector::{collect_replay_paths, read_manifest, InputError};
