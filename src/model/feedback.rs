use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the guess sits relative to the secret. `Higher` means the guess was too
/// high, so the secret is smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Higher,
    Lower,
    Exact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub direction: Direction,
    pub tier: Tier,
    pub distance: u32,
}

/// One line of the per-round guess log, newest first on the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub attempt: u32,
    pub guess: u32,
    pub direction: Direction,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Continue {
        guess: u32,
        direction: Direction,
        tier: Tier,
        distance: u32,
        hint_min: u32,
        hint_max: u32,
    },
    Won {
        guess: u32,
        attempts: u32,
        elapsed: Duration,
    },
}
