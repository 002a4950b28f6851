use anyhow::{bail, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wasted_utility::cache::ResultCache;
use wasted_utility::cli::Cli;
use wasted_utility::data_processing::data_processor::{process_files_in_parallel, resolve_worker_count};
use wasted_utility::data_summary::data_summarizer::summarize;
use wasted_utility::data_summary::summary_report::print_summary;
use wasted_utility::decoder::KillFeedDecoderFactory;
use wasted_utility::file_creation::{create_csv_file, create_json_file};
use wasted_utility::input::collect_replay_paths;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar(total: usize, verbose: bool) -> ProgressBar {
    if verbose {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("Processing: {pos}/{len} demos ({msg}) {wide_bar}") {
        bar.set_style(style);
    }
    bar
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cache = match cli.cache_path() {
        Some(path) => {
            let cache = ResultCache::load(path);
            tracing::info!("Cache loaded: {} entries", cache.len());
            cache
        }
        None => ResultCache::new(),
    };

    let replays = collect_replay_paths(cli.manifest.as_deref(), &cli.paths, &cli.extension)?;
    if replays.is_empty() {
        Cli::command().print_help()?;
        bail!("no replay files to process");
    }

    let workers = resolve_worker_count(cli.workers);
    tracing::info!("Found {} replay file(s), using {} workers", replays.len(), workers);

    let started = Instant::now();
    let progress = progress_bar(replays.len(), cli.verbose);
    let results = process_files_in_parallel(replays, workers, &cache, &KillFeedDecoderFactory, &progress)?;

    if let Some(path) = cli.cache_path() {
        match cache.save(path) {
            Ok(()) => tracing::info!(path = %path.display(), entries = cache.len(), "cache saved"),
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "failed to save cache"),
        }
    }

    let summary = summarize(results, Utc::now());
    print_summary(&summary, started.elapsed())?;

    if let Some(path) = &cli.output {
        match create_json_file(path, &summary) {
            Ok(()) => tracing::info!("Results saved to: {}", path.display()),
            Err(err) => tracing::error!("Failed to save JSON: {}", err),
        }
    }
    if let Some(path) = &cli.output_csv {
        match create_csv_file(path, &summary) {
            Ok(()) => tracing::info!("Player summary saved to: {}", path.display()),
            Err(err) => tracing::error!("Failed to save CSV: {}", err),
        }
    }

    Ok(())
}
