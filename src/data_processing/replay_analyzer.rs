use crate::data_processing::file_result::FileResult;
use crate::data_processing::player_economy_stat::{average_per_death, PlayerEconomyStat};
use crate::data_processing::player_id::PlayerId;
use crate::decoder::{DecoderFactory, PlayerEliminated};
use crate::error::ReplayError;
use crate::fingerprint::FingerprintInfo;

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::time::{Duration, Instant};

/// Running totals for one replay while its events are decoded.
#[derive(Debug, Default)]
struct EliminationTally {
    player_stats: BTreeMap<PlayerId, PlayerEconomyStat>,
    total_wasted: u64,
    total_deaths: u32,
}

impl EliminationTally {
    fn record(&mut self, event: &PlayerEliminated) {
        let Some(victim) = &event.victim else {
            return;
        };

        let stats = self
            .player_stats
            .entry(victim.player_id)
            .or_insert_with(|| PlayerEconomyStat::new(victim.player_id, victim.name.as_str()));
        self.total_wasted += stats.record_death(&victim.equipment);
        self.total_deaths += 1;
    }

    fn into_result(self, path: &Path, header: &FingerprintInfo, elapsed: Duration) -> FileResult {
        let mut player_stats = self.player_stats;
        player_stats
            .values_mut()
            .for_each(PlayerEconomyStat::refresh_average);

        FileResult {
            file: path.to_path_buf(),
            fingerprint: header.fingerprint.clone(),
            map_name: header.map_name.clone().unwrap_or_default(),
            server_name: header.server_name.clone().unwrap_or_default(),
            total_wasted: self.total_wasted,
            total_deaths: self.total_deaths,
            avg_per_death: average_per_death(self.total_wasted, self.total_deaths),
            player_stats,
            error: None,
            parse_time_ms: elapsed.as_millis() as u64,
            from_cache: false,
        }
    }
}

/// Decodes the replay at `path` and accumulates the wasted grenade value of
/// every eliminated player.
///
/// The file handle is owned by the decoder and released when the decoder goes
/// out of scope, whichever way decoding ends. If the decoder fails, everything
/// accumulated so far is discarded and the result carries only the error.
///
/// # Arguments
///
/// * `path` - The replay to analyze.
/// * `header` - The fingerprint already computed for the file.
/// * `factory` - Creates the decoder for the file's byte stream.
///
/// # Returns
///
/// A `FileResult` with per-player statistics, or one whose `error` is set.
pub fn analyze_replay(
    path: &Path,
    header: &FingerprintInfo,
    factory: &dyn DecoderFactory,
) -> FileResult {
    let started = Instant::now();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            return FileResult::failed(path, Some(header), &ReplayError::Open(err), started.elapsed())
        }
    };

    let mut tally = EliminationTally::default();
    let outcome = {
        let mut decoder = factory.open(Box::new(file));
        decoder.on_player_eliminated(Box::new(|event: &PlayerEliminated| tally.record(event)));
        decoder.parse_to_end()
    };

    match outcome {
        Ok(()) => tally.into_result(path, header, started.elapsed()),
        Err(err) => FileResult::failed(path, Some(header), &ReplayError::Decode(err), started.elapsed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_processing::equipment::EquipmentType;
    use crate::decoder::KillFeedDecoderFactory;
    use std::fs;
    use tempfile::TempDir;

    fn header() -> FingerprintInfo {
        FingerprintInfo {
            fingerprint: "abc123".into(),
            map_name: Some("de_nuke".into()),
            server_name: Some("Test Server".into()),
        }
    }

    fn write_feed(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    #[test]
    fn two_deaths_with_smoke_and_flash_average_250() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(
            &dir,
            "a.dem",
            &[
                r#"{"victim":{"player_id":42,"name":"A","equipment":["Smoke Grenade","Knife"]}}"#,
                r#"{"victim":{"player_id":42,"name":"A","equipment":["Flashbang"]}}"#,
            ],
        );

        let result = analyze_replay(&path, &header(), &KillFeedDecoderFactory);

        assert!(result.is_success());
        let stats = &result.player_stats[&PlayerId(42)];
        assert_eq!(stats.deaths, 2);
        assert_eq!(stats.total_wasted, 500);
        assert_eq!(stats.avg_per_death, 250.0);
        assert_eq!(stats.lost(EquipmentType::Smoke), 1);
        assert_eq!(stats.lost(EquipmentType::Flash), 1);
        assert_eq!(result.total_wasted, 500);
        assert_eq!(result.total_deaths, 2);
        assert_eq!(result.fingerprint, "abc123");
        assert_eq!(result.map_name, "de_nuke");
    }

    #[test]
    fn file_totals_span_players_and_skip_unknown_victims() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(
            &dir,
            "b.dem",
            &[
                r#"{"victim":{"player_id":1,"name":"one","equipment":["Molotov"]}}"#,
                r#"{"victim":null}"#,
                r#"{"victim":{"player_id":2,"name":"two","equipment":[]}}"#,
                r#"{"victim":{"player_id":2,"name":"two","equipment":["Decoy Grenade"]}}"#,
            ],
        );

        let result = analyze_replay(&path, &header(), &KillFeedDecoderFactory);

        assert_eq!(result.total_deaths, 3);
        assert_eq!(result.total_wasted, 450);
        assert_eq!(result.avg_per_death, 150.0);
        assert_eq!(result.player_stats[&PlayerId(2)].avg_per_death, 25.0);
    }

    #[test]
    fn replay_without_eliminations_has_zero_average() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(&dir, "quiet.dem", &[]);

        let result = analyze_replay(&path, &header(), &KillFeedDecoderFactory);

        assert!(result.is_success());
        assert_eq!(result.total_deaths, 0);
        assert_eq!(result.avg_per_death, 0.0);
    }

    #[test]
    fn decode_error_discards_partial_stats() {
        let dir = TempDir::new().unwrap();
        let path = write_feed(
            &dir,
            "broken.dem",
            &[
                r#"{"victim":{"player_id":1,"name":"one","equipment":["Molotov"]}}"#,
                "truncated{",
            ],
        );

        let result = analyze_replay(&path, &header(), &KillFeedDecoderFactory);

        let error = result.error.as_deref().unwrap();
        assert!(error.starts_with("failed to parse:"), "{}", error);
        assert!(result.player_stats.is_empty());
        assert_eq!(result.total_wasted, 0);
        assert_eq!(result.fingerprint, "abc123");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = TempDir::new().unwrap();
        let result = analyze_replay(&dir.path().join("gone.dem"), &header(), &KillFeedDecoderFactory);

        assert!(result.error.unwrap().starts_with("failed to open:"));
    }
}
