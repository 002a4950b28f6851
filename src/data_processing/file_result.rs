use crate::data_processing::player_economy_stat::PlayerEconomyStat;
use crate::data_processing::player_id::PlayerId;
use crate::error::ReplayError;
use crate::fingerprint::FingerprintInfo;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of processing one replay file.
///
/// A result is never patched after it is built: a cache hit produces a new
/// value through [`FileResult::from_cache`] and leaves the stored one intact.
///
/// # Fields
///
/// * `file` - Path the result was produced for in this run.
/// * `fingerprint` - Header fingerprint, empty if fingerprinting failed.
/// * `map_name`, `server_name` - Header metadata, empty when unknown.
/// * `total_wasted`, `total_deaths`, `avg_per_death` - File totals.
/// * `player_stats` - Per-player statistics keyed by player id.
/// * `error` - Why the file failed, `None` on success.
/// * `parse_time_ms` - Wall time spent analyzing the file.
/// * `from_cache` - Whether this run reused a cached result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    #[serde(rename = "demo_file")]
    pub file: PathBuf,
    #[serde(rename = "checksum")]
    pub fingerprint: String,
    pub map_name: String,
    pub server_name: String,
    pub total_wasted: u64,
    pub total_deaths: u32,
    pub avg_per_death: f64,
    pub player_stats: BTreeMap<PlayerId, PlayerEconomyStat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub parse_time_ms: u64,
    #[serde(default)]
    pub from_cache: bool,
}

impl FileResult {
    /// Builds a failed result carrying only the error and whatever header
    /// metadata was known before the failure.
    pub fn failed(
        file: &Path,
        header: Option<&FingerprintInfo>,
        error: &ReplayError,
        elapsed: Duration,
    ) -> Self {
        FileResult {
            file: file.to_path_buf(),
            fingerprint: header.map(|h| h.fingerprint.clone()).unwrap_or_default(),
            map_name: header.and_then(|h| h.map_name.clone()).unwrap_or_default(),
            server_name: header
                .and_then(|h| h.server_name.clone())
                .unwrap_or_default(),
            total_wasted: 0,
            total_deaths: 0,
            avg_per_death: 0.0,
            player_stats: BTreeMap::new(),
            error: Some(error.to_string()),
            parse_time_ms: elapsed.as_millis() as u64,
            from_cache: false,
        }
    }

    /// Builds this run's result for `file` out of a cached one.
    pub fn from_cache(cached: &FileResult, file: &Path) -> Self {
        FileResult {
            file: file.to_path_buf(),
            from_cache: true,
            ..cached.clone()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
