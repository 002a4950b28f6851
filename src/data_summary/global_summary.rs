use crate::data_processing::file_result::FileResult;
use crate::data_processing::player_economy_stat::PlayerEconomyStat;
use crate::data_processing::player_id::PlayerId;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate of a whole run.
///
/// # Fields
///
/// * `processed_at` - RFC 3339 time the summary was produced.
/// * `total_demos` - Number of file results, successful or not.
/// * `success_count`, `fail_count` - Split of `total_demos` by outcome.
/// * `cache_hits` - Results reused from the cache, counted independently of outcome.
/// * `total_wasted`, `total_deaths` - Sums over successful files.
/// * `avg_per_death` - `total_wasted / total_deaths`, computed once from the sums.
/// * `demo_results` - Every file result, ordered by path.
/// * `global_players` - Player statistics summed across successful files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub processed_at: String,
    pub total_demos: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub cache_hits: usize,
    pub total_wasted: u64,
    pub total_deaths: u32,
    pub avg_per_death: f64,
    pub demo_results: Vec<FileResult>,
    pub global_players: BTreeMap<PlayerId, PlayerEconomyStat>,
}

impl GlobalSummary {
    /// Failed file results, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.demo_results.iter().filter(|result| !result.is_success())
    }

    /// Players sorted by wasted value, highest first, ties broken by id.
    pub fn players_by_wasted(&self) -> Vec<&PlayerEconomyStat> {
        let mut players: Vec<_> = self.global_players.values().collect();
        players.sort_by(|p1, p2| {
            p2.total_wasted
                .cmp(&p1.total_wasted)
                .then_with(|| p1.player_id.cmp(&p2.player_id))
        });
        players
    }
}
