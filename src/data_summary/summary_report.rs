use crate::data_summary::global_summary::GlobalSummary;

use std::io::{self, Write};
use std::time::Duration;

const RULE: &str = "========================================";

/// Prints the human-readable run summary to stdout.
pub fn print_summary(summary: &GlobalSummary, elapsed: Duration) -> io::Result<()> {
    let stdout = io::stdout();
    write_summary(&mut stdout.lock(), summary, elapsed)
}

/// Writes the run summary: every player who lost grenades, the failed files
/// with their reasons, then the grand totals.
///
/// # Arguments
///
/// * `out` - Destination of the report.
/// * `summary` - The aggregated run.
/// * `elapsed` - Wall time of the whole run.
pub fn write_summary<W: Write>(out: &mut W, summary: &GlobalSummary, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "     GLOBAL PLAYER SUMMARY (ALL DEMOS)")?;
    writeln!(out, "{}", RULE)?;

    for player in summary
        .players_by_wasted()
        .into_iter()
        .filter(|player| player.total_wasted > 0)
    {
        writeln!(out, "\n{} (SteamID64: {})", player.name, player.player_id)?;
        writeln!(out, "  Total Wasted: ${}", player.total_wasted)?;
        writeln!(out, "  Deaths: {}", player.deaths)?;
        writeln!(out, "  Avg per Death: ${:.2}", player.avg_per_death)?;
        writeln!(out, "  Grenades lost:")?;
        for (item, count) in &player.items {
            writeln!(out, "    - {}: {}", item, count)?;
        }
    }

    if summary.fail_count > 0 {
        writeln!(out, "\n{}", RULE)?;
        writeln!(out, "           FAILED DEMOS")?;
        writeln!(out, "{}", RULE)?;
        for failure in summary.failures() {
            writeln!(
                out,
                "{}: {}",
                failure.file.display(),
                failure.error.as_deref().unwrap_or_default()
            )?;
        }
    }

    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "           GRAND TOTAL")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Demos: {} success, {} failed, {} from cache",
        summary.success_count, summary.fail_count, summary.cache_hits
    )?;
    writeln!(out, "TOTAL WASTED UTILITY: ${}", summary.total_wasted)?;
    writeln!(out, "TOTAL DEATHS: {}", summary.total_deaths)?;
    writeln!(out, "AVERAGE PER DEATH: ${:.2}", summary.avg_per_death)?;
    writeln!(out, "Processing time: {}ms", elapsed.as_millis())?;
    writeln!(out, "{}", RULE)
}
