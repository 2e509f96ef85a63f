use std::time::Duration;

use super::{Difficulty, Direction, HistoryEntry, Mode, Record, Tier, TimerState};
use crate::error::ValidationError;
use crate::game::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    RoundInProgress,
    RoundWon,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    RoundStarted {
        difficulty: Difficulty,
        mode: Mode,
        bound: u32,
        hint_min: u32,
        hint_max: u32,
    },
    /// The round could not start; the controller stays idle.
    RoundRefused {
        reason: String,
    },
    RecordLoaded(Option<Record>),
    GuessFeedback {
        direction: Direction,
        tier: Tier,
        attempts: u32,
        hint_min: u32,
        hint_max: u32,
        proximity: u8,
        entry: HistoryEntry,
    },
    RoundWon {
        attempts: u32,
        elapsed: Duration,
        record: Record,
        is_new_record: bool,
    },
    ValidationFailed {
        reason: ValidationError,
    },
    TimerStateChanged(TimerState),
    Tick {
        elapsed: Duration,
    },
    SettingsChanged(Settings),
}
