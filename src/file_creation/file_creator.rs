use crate::data_processing::equipment::GRENADE_PRICES;
use crate::data_summary::global_summary::GlobalSummary;
use crate::file_creation::FileCreationError;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Short column names of the grenade counts, in `GRENADE_PRICES` order.
const GRENADE_COLUMNS: [&str; 6] = ["Smoke", "Flash", "HE", "Incendiary", "Molotov", "Decoy"];

fn create_file(path: &Path) -> Result<BufWriter<File>, FileCreationError> {
    let file = File::create(path).map_err(|source| FileCreationError::FileCreation {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Writes `summary` as pretty-printed JSON to `path`.
///
/// # Arguments
///
/// * `path` - The file to create or truncate.
/// * `summary` - The aggregated run.
///
/// # Returns
///
/// A `Result` indicating success or failure. Errors are represented by `FileCreationError`.
pub fn create_json_file(path: &Path, summary: &GlobalSummary) -> Result<(), FileCreationError> {
    let json_output = serde_json::to_string_pretty(summary)?;

    let mut writer = create_file(path)?;
    writer.write_all(json_output.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Writes one row per globally aggregated player to `path`, highest wasted
/// value first, with a count column for every grenade kind.
///
/// # Arguments
///
/// * `path` - The file to create or truncate.
/// * `summary` - The aggregated run.
///
/// # Returns
///
/// A `Result` indicating success or failure. Errors are represented by `FileCreationError`.
pub fn create_csv_file(path: &Path, summary: &GlobalSummary) -> Result<(), FileCreationError> {
    let mut writer = csv::Writer::from_writer(create_file(path)?);

    let mut header = vec!["SteamID64", "Name", "TotalWasted", "Deaths", "AvgPerDeath"];
    header.extend(GRENADE_COLUMNS);
    writer.write_record(&header)?;

    for player in summary.players_by_wasted() {
        let mut row = vec![
            player.player_id.to_string(),
            player.name.clone(),
            player.total_wasted.to_string(),
            player.deaths.to_string(),
            format!("{:.2}", player.avg_per_death),
        ];
        row.extend(
            GRENADE_PRICES
                .iter()
                .map(|(grenade, _)| player.lost(*grenade).to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
