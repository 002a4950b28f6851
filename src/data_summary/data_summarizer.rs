use crate::data_processing::file_result::FileResult;
use crate::data_processing::player_economy_stat::{average_per_death, PlayerEconomyStat};
use crate::data_processing::player_id::PlayerId;
use crate::data_summary::global_summary::GlobalSummary;

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

/// Merges every file result of a run into one `GlobalSummary`.
///
/// Each result counts as either a success or a failure; cache hits are counted
/// separately. Only successes contribute statistics. Averages are recomputed
/// from the summed totals, never by averaging per-file averages, so the input
/// order does not matter.
///
/// # Arguments
///
/// * `results` - Every `FileResult` of the run, in any order.
/// * `processed_at` - The time stamped on the summary.
///
/// # Returns
///
/// The `GlobalSummary` with results ordered by file path.
pub fn summarize(mut results: Vec<FileResult>, processed_at: DateTime<Utc>) -> GlobalSummary {
    results.sort_by(|r1, r2| {
        r1.file
            .cmp(&r2.file)
            .then_with(|| r1.fingerprint.cmp(&r2.fingerprint))
    });

    let mut summary = GlobalSummary {
        processed_at: processed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        total_demos: results.len(),
        success_count: 0,
        fail_count: 0,
        cache_hits: 0,
        total_wasted: 0,
        total_deaths: 0,
        avg_per_death: 0.0,
        demo_results: Vec::new(),
        global_players: BTreeMap::new(),
    };

    for result in &results {
        if result.from_cache {
            summary.cache_hits += 1;
        }
        if !result.is_success() {
            summary.fail_count += 1;
            continue;
        }

        summary.success_count += 1;
        summary.total_wasted += result.total_wasted;
        summary.total_deaths += result.total_deaths;
        merge_player_stats(&mut summary.global_players, result);
    }

    summary.avg_per_death = average_per_death(summary.total_wasted, summary.total_deaths);
    summary
        .global_players
        .values_mut()
        .for_each(PlayerEconomyStat::refresh_average);
    summary.demo_results = results;

    summary
}

/// Folds the players of one file into the global accumulator. The first name
/// seen for a player is kept.
fn merge_player_stats(global_players: &mut BTreeMap<PlayerId, PlayerEconomyStat>, result: &FileResult) {
    for (player_id, stats) in &result.player_stats {
        global_players
            .entry(*player_id)
            .or_insert_with(|| PlayerEconomyStat::new(*player_id, stats.name.as_str()))
            .merge(stats);
    }
}
