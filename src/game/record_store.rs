use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{Record, RecordKey};

/// Backing storage for best records. Loads report an unreadable or malformed
/// entry as absent; stores may fail, and the caller decides what that means.
pub trait RecordStorage {
    fn load_record(&self, key: &RecordKey) -> Option<Record>;
    fn store_record(&mut self, key: &RecordKey, record: &Record) -> Result<()>;
}

/// Picks the record to keep. Only a strictly better candidate replaces the
/// previous one.
pub fn compare_and_store(key: &RecordKey, candidate: Record, previous: Option<Record>) -> Record {
    match previous {
        Some(previous) if !candidate.is_better_than(&previous, key.mode) => previous,
        _ => candidate,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub record: Record,
    pub is_new_record: bool,
}

pub struct RecordStore {
    storage: Box<dyn RecordStorage>,
}

impl RecordStore {
    pub fn new(storage: Box<dyn RecordStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryRecordStorage::default()))
    }

    pub fn best(&self, key: &RecordKey) -> Option<Record> {
        self.storage.load_record(key)
    }

    /// Compares `candidate` against the stored best for `key` and persists the
    /// winner when it changed. A failed write is logged; the round result stands.
    pub fn submit(&mut self, key: &RecordKey, candidate: Record) -> RecordOutcome {
        let candidate = candidate.truncated();
        let previous = self.storage.load_record(key);
        let is_new_record = previous
            .as_ref()
            .map_or(true, |previous| candidate.is_better_than(previous, key.mode));
        let winner = compare_and_store(key, candidate, previous);

        if is_new_record {
            debug!(target: "records", "New best for {}: {:?}", key, winner);
            if let Err(e) = self.storage.store_record(key, &winner) {
                warn!(target: "records", "Failed to persist record for {}: {}", key, e);
            }
        }
        RecordOutcome {
            record: winner,
            is_new_record,
        }
    }
}

/// Records kept as raw JSON strings, so a corrupted entry can be simulated.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStorage {
    entries: HashMap<String, String>,
}

impl MemoryRecordStorage {
    pub fn insert_raw(&mut self, key: &RecordKey, raw: &str) {
        self.entries.insert(key.storage_key(), raw.to_string());
    }
}

impl RecordStorage for MemoryRecordStorage {
    fn load_record(&self, key: &RecordKey) -> Option<Record> {
        let raw = self.entries.get(&key.storage_key())?;
        serde_json::from_str(raw).ok()
    }

    fn store_record(&mut self, key: &RecordKey, record: &Record) -> Result<()> {
        self.entries
            .insert(key.storage_key(), serde_json::to_string(record)?);
        Ok(())
    }
}

/// All records in one JSON object keyed by `RecordKey::storage_key`. Entries
/// are parsed lazily so one bad value does not hide the others.
#[derive(Debug)]
pub struct JsonFileRecordStorage {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileRecordStorage {
    pub fn open(path: &Path) -> Self {
        let entries = fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Map<String, Value>>(&contents).ok())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl RecordStorage for JsonFileRecordStorage {
    fn load_record(&self, key: &RecordKey) -> Option<Record> {
        let value = self.entries.get(&key.storage_key())?;
        serde_json::from_value(value.clone()).ok()
    }

    fn store_record(&mut self, key: &RecordKey, record: &Record) -> Result<()> {
        self.entries
            .insert(key.storage_key(), serde_json::to_value(record)?);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Mode};
    use std::time::Duration;

    fn record(attempts: u32, ms: u64) -> Record {
        Record::new(attempts, Duration::from_millis(ms))
    }

    fn classic() -> RecordKey {
        RecordKey::new(Difficulty::Easy, Mode::Classic)
    }

    fn speedrun() -> RecordKey {
        RecordKey::new(Difficulty::Easy, Mode::Speedrun)
    }

    #[test]
    fn test_absent_previous_takes_candidate() {
        assert_eq!(compare_and_store(&classic(), record(9, 9000), None), record(9, 9000));
    }

    #[test]
    fn test_classic_ordering() {
        let key = classic();
        assert_eq!(
            compare_and_store(&key, record(3, 5000), Some(record(5, 1000))),
            record(3, 5000)
        );
        assert_eq!(
            compare_and_store(&key, record(3, 5000), Some(record(3, 4000))),
            record(3, 4000)
        );
    }

    #[test]
    fn test_speedrun_ignores_attempts() {
        let key = speedrun();
        assert_eq!(
            compare_and_store(&key, record(8, 1000), Some(record(2, 3000))),
            record(8, 1000)
        );
        assert_eq!(
            compare_and_store(&key, record(1, 3000), Some(record(8, 1000))),
            record(8, 1000)
        );
    }

    #[test]
    fn test_tie_keeps_previous() {
        let previous = record(4, 2000).achieved_at(chrono::Utc::now());
        let kept = compare_and_store(&classic(), record(4, 2000), Some(previous.clone()));
        assert_eq!(kept.achieved_at, previous.achieved_at);
    }

    #[test]
    fn test_submit_is_idempotent() {
        let mut store = RecordStore::in_memory();
        let key = classic();

        let first = store.submit(&key, record(4, 2000));
        assert!(first.is_new_record);
        let second = store.submit(&key, record(4, 2000));
        assert!(!second.is_new_record);
        assert_eq!(first.record, second.record);
        assert_eq!(store.best(&key), Some(record(4, 2000)));
    }

    #[test]
    fn test_sub_millisecond_resubmit_is_not_a_new_record() {
        let mut store = RecordStore::new(Box::new(MemoryRecordStorage::default()));
        let key = speedrun();
        let run = Record::new(3, Duration::from_micros(1_234_600));

        let first = store.submit(&key, run.clone());
        assert!(first.is_new_record);
        assert_eq!(store.best(&key), Some(first.record.clone()));

        let second = store.submit(&key, run);
        assert!(!second.is_new_record);
        assert_eq!(second.record, first.record);

        let mut slower = record(3, 0);
        slower.elapsed = Duration::from_micros(1_234_700);
        let outcome = store.submit(&key, slower);
        assert!(!outcome.is_new_record);
        assert_eq!(outcome.record.elapsed, Duration::from_millis(1234));
    }

    #[test]
    fn test_submit_keeps_better_previous() {
        let mut store = RecordStore::in_memory();
        let key = classic();
        store.submit(&key, record(2, 2000));

        let outcome = store.submit(&key, record(5, 100));
        assert!(!outcome.is_new_record);
        assert_eq!(outcome.record, record(2, 2000));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = RecordStore::in_memory();
        store.submit(&classic(), record(2, 9000));
        assert_eq!(store.best(&speedrun()), None);
        assert!(store.submit(&speedrun(), record(6, 8000)).is_new_record);
    }

    #[test]
    fn test_malformed_previous_counts_as_absent() {
        let key = classic();
        let mut storage = MemoryRecordStorage::default();
        storage.insert_raw(&key, "{\"attempts\":\"three\"}");
        let mut store = RecordStore::new(Box::new(storage));

        assert_eq!(store.best(&key), None);
        let outcome = store.submit(&key, record(7, 7000));
        assert!(outcome.is_new_record);
        assert_eq!(store.best(&key), Some(record(7, 7000)));
    }

    #[test]
    fn test_json_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let key = speedrun();

        let mut storage = JsonFileRecordStorage::open(&path);
        assert_eq!(storage.load_record(&key), None);
        storage.store_record(&key, &record(3, 1234)).unwrap();

        let reopened = JsonFileRecordStorage::open(&path);
        assert_eq!(reopened.load_record(&key), Some(record(3, 1234)));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_json_file_storage_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "][").unwrap();

        let mut storage = JsonFileRecordStorage::open(&path);
        assert_eq!(storage.load_record(&classic()), None);
        storage.store_record(&classic(), &record(1, 10)).unwrap();
        assert_eq!(
            JsonFileRecordStorage::open(&path).load_record(&classic()),
            Some(record(1, 10))
        );
    }

    #[test]
    fn test_json_file_storage_isolates_bad_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"{"ns:record:easy:classic": 12, "ns:record:easy:speedrun": {"attempts": 2, "elapsed_ms": 50}}"#,
        )
        .unwrap();

        let storage = JsonFileRecordStorage::open(&path);
        assert_eq!(storage.load_record(&classic()), None);
        assert_eq!(storage.load_record(&speedrun()), Some(record(2, 50)));
    }
}
