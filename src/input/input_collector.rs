use std::fs::{self, read_dir};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header keywords a manifest may carry in its first line.
const MANIFEST_HEADER_KEYWORDS: [&str; 3] = ["path", "demo", "file"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Gathers every replay to process from a manifest and from command-line paths.
///
/// Manifest entries come first, in file order, followed by the positional
/// paths. Directories are searched recursively. Paths that cannot be accessed
/// are logged and skipped.
///
/// # Arguments
///
/// * `manifest` - Optional manifest listing one replay per line.
/// * `paths` - Files or directories given on the command line.
/// * `extension` - Replay file extension, compared case-insensitively.
///
/// # Returns
///
/// The replay paths, or an `InputError` if the manifest cannot be read.
pub fn collect_replay_paths(
    manifest: Option<&Path>,
    paths: &[PathBuf],
    extension: &str,
) -> Result<Vec<PathBuf>, InputError> {
    let mut replays = match manifest {
        Some(manifest) => read_manifest(manifest, extension)?,
        None => Vec::new(),
    };

    for path in paths {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot access input, skipping");
                continue;
            }
        };

        if metadata.is_dir() {
            match find_replay_files(path, extension) {
                Ok(found) => replays.extend(found),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "error scanning directory, skipping");
                }
            }
        } else if has_extension(path, extension) {
            replays.push(path.clone());
        }
    }

    Ok(replays)
}

/// Reads replay paths from a manifest.
///
/// Only the first field of each record is used, trimmed. Blank entries,
/// entries starting with `#`, header keywords and entries without the replay
/// extension are skipped.
pub fn read_manifest(path: &Path, extension: &str) -> Result<Vec<PathBuf>, InputError> {
    let manifest_error = |source: csv::Error| InputError::Manifest {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(manifest_error)?;

    let mut replays = Vec::new();
    for record in reader.records() {
        let record = record.map_err(manifest_error)?;
        let Some(entry) = record.get(0).map(str::trim) else {
            continue;
        };
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        if MANIFEST_HEADER_KEYWORDS
            .iter()
            .any(|keyword| entry.eq_ignore_ascii_case(keyword))
        {
            continue;
        }
        let entry = PathBuf::from(entry);
        if has_extension(&entry, extension) {
            replays.push(entry);
        }
    }

    Ok(replays)
}

/// Recursively collects files with the replay extension under `dir`, sorted.
fn find_replay_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            found.extend(find_replay_files(&path, extension)?);
        } else if has_extension(&path, extension) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn manifest_skips_comments_headers_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("demos.csv");
        fs::write(
            &manifest,
            "Path,notes\n\n# warmup\n  /data/a.dem , first\n/data/B.DEM\n/data/readme.txt\nfile\n",
        )
        .unwrap();

        let paths = read_manifest(&manifest, "dem").unwrap();

        assert_eq!(paths, vec![PathBuf::from("/data/a.dem"), PathBuf::from("/data/B.DEM")]);
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_manifest(&dir.path().join("none.csv"), "dem").is_err());
    }

    #[test]
    fn directories_are_walked_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("season").join("week1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("top.dem"), b"x").unwrap();
        fs::write(nested.join("deep.dem"), b"x").unwrap();
        fs::write(nested.join("notes.md"), b"x").unwrap();

        let paths = collect_replay_paths(None, &[dir.path().to_path_buf()], "dem").unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&nested.join("deep.dem")));
        assert!(paths.contains(&dir.path().join("top.dem")));
    }

    #[test]
    fn inaccessible_and_foreign_paths_are_skipped() {
        let dir = TempDir::new().unwrap();
        let replay = dir.path().join("one.dem");
        let other = dir.path().join("one.txt");
        fs::write(&replay, b"x").unwrap();
        fs::write(&other, b"x").unwrap();

        let paths = collect_replay_paths(
            None,
            &[dir.path().join("ghost.dem"), other, replay.clone()],
            "dem",
        )
        .unwrap();

        assert_eq!(paths, vec![replay]);
    }
}
