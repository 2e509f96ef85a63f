use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationMilliSeconds;
use std::fmt;
use std::time::Duration;

use super::{Difficulty, Mode};

/// Best outcome for one (difficulty, mode) pair.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub attempts: u32,
    #[serde(rename = "elapsed_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_at: Option<DateTime<Utc>>,
}

/// Stored records hold whole milliseconds, so finer precision is dropped on entry.
fn whole_millis(elapsed: Duration) -> Duration {
    Duration::from_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

impl Record {
    pub fn new(attempts: u32, elapsed: Duration) -> Self {
        Self {
            attempts,
            elapsed: whole_millis(elapsed),
            achieved_at: None,
        }
    }

    /// Same record with `elapsed` truncated to whole milliseconds.
    pub fn truncated(mut self) -> Self {
        self.elapsed = whole_millis(self.elapsed);
        self
    }

    pub fn achieved_at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.achieved_at = Some(timestamp);
        self
    }

    /// Strict ordering: `false` when the two records tie under `mode`.
    pub fn is_better_than(&self, other: &Record, mode: Mode) -> bool {
        match mode {
            Mode::Speedrun => self.elapsed < other.elapsed,
            Mode::Classic => (self.attempts, self.elapsed) < (other.attempts, other.elapsed),
        }
    }
}

/// Two records are equal when they score the same; the timestamp is metadata.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.attempts == other.attempts && self.elapsed == other.elapsed
    }
}

impl Eq for Record {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub difficulty: Difficulty,
    pub mode: Mode,
}

impl RecordKey {
    pub fn new(difficulty: Difficulty, mode: Mode) -> Self {
        Self { difficulty, mode }
    }

    pub fn storage_key(&self) -> String {
        format!("ns:record:{}:{}", self.difficulty, self.mode)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.difficulty, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(attempts: u32, ms: u64) -> Record {
        Record::new(attempts, Duration::from_millis(ms))
    }

    #[test]
    fn test_classic_prefers_fewer_attempts() {
        assert!(record(3, 5000).is_better_than(&record(5, 1000), Mode::Classic));
        assert!(!record(3, 5000).is_better_than(&record(3, 4000), Mode::Classic));
        assert!(record(3, 4000).is_better_than(&record(3, 5000), Mode::Classic));
    }

    #[test]
    fn test_speedrun_ignores_attempts() {
        assert!(record(9, 1000).is_better_than(&record(1, 2000), Mode::Speedrun));
        assert!(!record(1, 2000).is_better_than(&record(9, 1000), Mode::Speedrun));
    }

    #[test]
    fn test_ties_are_not_better() {
        for mode in [Mode::Classic, Mode::Speedrun] {
            assert!(!record(4, 3000).is_better_than(&record(4, 3000), mode));
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&record(3, 4200)).unwrap();
        assert_eq!(json, r#"{"attempts":3,"elapsed_ms":4200}"#);

        let parsed: Record = serde_json::from_str(r#"{"attempts":2,"elapsed_ms":900}"#).unwrap();
        assert_eq!(parsed, record(2, 900));
    }

    #[test]
    fn test_sub_millisecond_time_is_truncated() {
        let record = Record::new(3, Duration::from_micros(1_234_600));
        assert_eq!(record.elapsed, Duration::from_millis(1234));

        let json = serde_json::to_string(&record).unwrap();
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_storage_key() {
        let key = RecordKey::new(Difficulty::Medium, Mode::Speedrun);
        assert_eq!(key.storage_key(), "ns:record:medium:speedrun");
    }
}
