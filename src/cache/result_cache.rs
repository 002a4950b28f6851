use crate::cache::CachePersistenceError;
use crate::data_processing::file_result::FileResult;

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

/// Successful file results keyed by fingerprint.
///
/// One reader/writer lock guards the whole map: lookups run concurrently with
/// each other, inserts are exclusive. Entries are inserted or replaced whole,
/// never modified in place.
#[derive(Debug, Default)]
pub struct ResultCache {
    results: RwLock<HashMap<String, FileResult>>,
}

impl ResultCache {
    /// Creates an empty cache that lives only for this run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a cache previously written by [`ResultCache::save`].
    ///
    /// A missing or unreadable file yields an empty cache, as does one that
    /// does not deserialize.
    ///
    /// # Arguments
    ///
    /// * `path` - The cache file.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read(path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no cache file yet");
                return Self::new();
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cache file unreadable, starting empty");
                return Self::new();
            }
        };

        match serde_json::from_slice::<HashMap<String, FileResult>>(&data) {
            Ok(results) => ResultCache {
                results: RwLock::new(results),
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cache file corrupt, starting empty");
                Self::new()
            }
        }
    }

    /// Returns a copy of the result cached under `fingerprint`, if any.
    pub fn get(&self, fingerprint: &str) -> Option<FileResult> {
        self.results.read().get(fingerprint).cloned()
    }

    /// Stores `result` under `fingerprint`, replacing any previous entry.
    pub fn set(&self, fingerprint: impl Into<String>, result: FileResult) {
        self.results.write().insert(fingerprint.into(), result);
    }

    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }

    /// Writes the whole map to `path` as a JSON object keyed by fingerprint.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the file is written, or a `CachePersistenceError` the
    /// caller is expected to log and move past.
    pub fn save(&self, path: &Path) -> Result<(), CachePersistenceError> {
        let results = self.results.read();
        let ordered: BTreeMap<&String, &FileResult> = results.iter().collect();

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &ordered)?;
        writer.flush()?;
        Ok(())
    }
}
