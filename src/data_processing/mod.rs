//! Per-file processing: the statistics model, the analyzer and the worker pool.

pub mod data_processor;
pub mod equipment;
pub mod file_result;
pub mod player_economy_stat;
pub mod player_id;
pub mod replay_analyzer;
