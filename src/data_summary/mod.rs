//! Cross-file aggregation and the console report.

pub mod data_summarizer;
pub mod global_summary;
pub mod summary_report;
