use crate::cache::ResultCache;
use crate::data_processing::file_result::FileResult;
use crate::data_processing::replay_analyzer::analyze_replay;
use crate::decoder::DecoderFactory;
use crate::error::{PipelineError, ReplayError};
use crate::fingerprint::extract_fingerprint;

use crossbeam::channel::{bounded, Receiver, Sender};
use indicatif::ProgressBar;
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

/// Processes every replay in `paths` on a pool of `num_workers` threads.
///
/// All paths are queued up front and the job queue is closed before any worker
/// starts, so each path is claimed by exactly one worker. A coordinator waits
/// for the workers and then closes the result queue, which the calling thread
/// drains. One file failing never stops the others.
///
/// # Arguments
///
/// * `paths` - The replay files to process.
/// * `num_workers` - Pool size; `0` means the host's available parallelism.
/// * `cache` - Consulted before analysis and filled with fresh successes.
/// * `factory` - Creates a decoder for each analyzed file.
/// * `progress` - Advanced once per collected result.
///
/// # Returns
///
/// Exactly one `FileResult` per input path, in completion order, or a
/// `PipelineError` if the pool could not be set up.
pub fn process_files_in_parallel(
    paths: Vec<PathBuf>,
    num_workers: usize,
    cache: &ResultCache,
    factory: &dyn DecoderFactory,
    progress: &ProgressBar,
) -> Result<Vec<FileResult>, PipelineError> {
    let num_workers = resolve_worker_count(num_workers);
    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(num_workers)
        .thread_name(|index| format!("replay-worker-{}", index))
        .build()?;

    let total = paths.len();
    let (job_sender, job_receiver) = bounded::<PathBuf>(total.max(1));
    for path in paths {
        job_sender
            .send(path)
            .map_err(|_| PipelineError::QueueClosed)?;
    }
    drop(job_sender);

    let (result_sender, result_receiver) = bounded::<FileResult>(num_workers);

    let results = thread::scope(|scope| {
        scope.spawn(move || {
            thread_pool.scope(|workers| {
                for worker_id in 0..num_workers {
                    let jobs = job_receiver.clone();
                    let results = result_sender.clone();
                    workers.spawn(move |_| run_worker(worker_id, jobs, results, cache, factory));
                }
            });
            drop(result_sender);
        });

        collect_results(result_receiver, total, progress)
    });

    Ok(results)
}

/// Worker count to use for a requested `num_workers`, where `0` asks for the
/// host's available parallelism.
pub fn resolve_worker_count(num_workers: usize) -> usize {
    if num_workers > 0 {
        return num_workers;
    }
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Drains the job queue, emitting one result per claimed path.
fn run_worker(
    worker_id: usize,
    jobs: Receiver<PathBuf>,
    results: Sender<FileResult>,
    cache: &ResultCache,
    factory: &dyn DecoderFactory,
) {
    for path in jobs.iter() {
        let result = process_file(worker_id, &path, cache, factory);
        if results.send(result).is_err() {
            tracing::warn!(worker = worker_id, "result queue closed, stopping");
            return;
        }
    }
}

/// Fingerprint, then cache lookup, then analysis on a miss. Only successful
/// fresh results are written back to the cache.
fn process_file(
    worker_id: usize,
    path: &Path,
    cache: &ResultCache,
    factory: &dyn DecoderFactory,
) -> FileResult {
    let started = Instant::now();

    let header = match extract_fingerprint(path) {
        Ok(header) => header,
        Err(err) => {
            let result =
                FileResult::failed(path, None, &ReplayError::Fingerprint(err), started.elapsed());
            tracing::debug!(
                worker = worker_id,
                file = %path.display(),
                error = result.error.as_deref().unwrap_or_default(),
                "fingerprint failed"
            );
            return result;
        }
    };

    if let Some(cached) = cache.get(&header.fingerprint) {
        tracing::debug!(
            worker = worker_id,
            file = %path.display(),
            total_wasted = cached.total_wasted,
            "cache hit"
        );
        return FileResult::from_cache(&cached, path);
    }

    let result = analyze_replay(path, &header, factory);
    match &result.error {
        None => {
            cache.set(header.fingerprint, result.clone());
            tracing::debug!(
                worker = worker_id,
                file = %path.display(),
                total_wasted = result.total_wasted,
                parse_time_ms = result.parse_time_ms,
                "analyzed"
            );
        }
        Some(error) => {
            tracing::debug!(worker = worker_id, file = %path.display(), error = %error, "analysis failed");
        }
    }
    result
}

/// Collects results until every worker is done, keeping the progress bar in
/// step with processed and cached counts.
fn collect_results(
    results: Receiver<FileResult>,
    total: usize,
    progress: &ProgressBar,
) -> Vec<FileResult> {
    let mut all_results = Vec::with_capacity(total);
    let mut cache_hits = 0;

    for result in results.iter() {
        if result.from_cache {
            cache_hits += 1;
        }
        all_results.push(result);
        progress.inc(1);
        progress.set_message(format!("{} cached", cache_hits));
    }
    progress.finish();

    all_results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::KillFeedDecoderFactory;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn write_replays(dir: &TempDir, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|index| {
                let path = dir.path().join(format!("replay_{:03}.dem", index));
                let line = format!(
                    r#"{{"victim":{{"player_id":{},"name":"p{}","equipment":["HE Grenade"]}}}}"#,
                    index % 10,
                    index % 10
                );
                fs::write(&path, line).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn every_path_yields_exactly_one_result() {
        let dir = TempDir::new().unwrap();
        let paths = write_replays(&dir, 100);
        let cache = ResultCache::new();

        let results = process_files_in_parallel(
            paths.clone(),
            8,
            &cache,
            &KillFeedDecoderFactory,
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(results.len(), 100);
        let files: HashSet<_> = results.iter().map(|r| r.file.clone()).collect();
        assert_eq!(files, paths.into_iter().collect::<HashSet<_>>());
        let fingerprints: HashSet<_> = results.iter().map(|r| r.fingerprint.clone()).collect();
        assert_eq!(fingerprints.len(), 100);
        assert!(results.iter().all(|r| r.is_success() && !r.from_cache));
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn second_pass_is_served_from_cache() {
        let dir = TempDir::new().unwrap();
        let paths = write_replays(&dir, 12);
        let cache = ResultCache::new();
        let progress = ProgressBar::hidden();

        let first = process_files_in_parallel(paths.clone(), 3, &cache, &KillFeedDecoderFactory, &progress).unwrap();
        let second = process_files_in_parallel(paths, 3, &cache, &KillFeedDecoderFactory, &progress).unwrap();

        assert!(second.iter().all(|r| r.from_cache));
        let total = |results: &[FileResult]| results.iter().map(|r| r.total_wasted).sum::<u64>();
        assert_eq!(total(&first), 12 * 300);
        assert_eq!(total(&first), total(&second));
    }

    #[test]
    fn failures_are_reported_and_never_cached() {
        let dir = TempDir::new().unwrap();
        let empty = dir.path().join("empty.dem");
        fs::write(&empty, b"").unwrap();
        let garbled = dir.path().join("garbled.dem");
        fs::write(&garbled, b"{\"victim\":").unwrap();
        let mut paths = write_replays(&dir, 3);
        paths.push(empty.clone());
        paths.push(garbled.clone());
        let cache = ResultCache::new();

        let results =
            process_files_in_parallel(paths, 2, &cache, &KillFeedDecoderFactory, &ProgressBar::hidden())
                .unwrap();

        assert_eq!(results.len(), 5);
        let failed: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
        assert_eq!(failed.len(), 2);
        let empty_result = failed.iter().find(|r| r.file == empty).unwrap();
        assert!(empty_result.error.as_deref().unwrap().starts_with("checksum error:"));
        let garbled_result = failed.iter().find(|r| r.file == garbled).unwrap();
        assert!(garbled_result.error.as_deref().unwrap().starts_with("failed to parse:"));
        assert!(cache.get(&garbled_result.fingerprint).is_none());
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn more_workers_than_files_and_no_files_are_fine() {
        let dir = TempDir::new().unwrap();
        let cache = ResultCache::new();
        let progress = ProgressBar::hidden();

        let results =
            process_files_in_parallel(write_replays(&dir, 2), 16, &cache, &KillFeedDecoderFactory, &progress).unwrap();
        assert_eq!(results.len(), 2);

        let none = process_files_in_parallel(Vec::new(), 4, &cache, &KillFeedDecoderFactory, &progress).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn zero_workers_means_host_parallelism() {
        assert!(resolve_worker_count(0) >= 1);
        assert_eq!(resolve_worker_count(5), 5);
    }
}
