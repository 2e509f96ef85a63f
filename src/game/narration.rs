use std::time::Duration;

use crate::error::ValidationError;
use crate::helpers::{format_elapsed, Pluralize};
use crate::model::{Direction, HistoryEntry, Mode, Record, Tier};

pub const TITLE: &str = "Secret number game";

pub fn round_prompt(bound: u32) -> String {
    format!("Pick a number between 1 and {}", bound)
}

pub fn direction_message(direction: Direction) -> &'static str {
    match direction {
        Direction::Higher => "The secret number is lower",
        Direction::Lower => "The secret number is higher",
        Direction::Exact => "You got it!",
    }
}

pub fn tier_label(tier: Tier) -> &'static str {
    match tier {
        Tier::Hot => "hot",
        Tier::Warm => "warm",
        Tier::Cold => "cold",
    }
}

pub fn validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::InvalidInput { .. } => "Please enter a valid number.".to_string(),
        ValidationError::OutOfRange { bound, .. } => {
            format!("The number must be between 1 and {}.", bound)
        }
        ValidationError::RoundNotActive => "Start a new round to keep playing.".to_string(),
    }
}

pub fn win_message(mode: Mode, attempts: u32, elapsed: Duration) -> String {
    match mode {
        Mode::Classic => format!(
            "You found the secret number with {} {} in {}!",
            attempts,
            "attempt".pluralize(attempts),
            format_elapsed(elapsed)
        ),
        Mode::Speedrun => format!(
            "Found it in {} ({} {})!",
            format_elapsed(elapsed),
            attempts,
            "attempt".pluralize(attempts)
        ),
    }
}

/// `#3 → 42 (too high | warm)`
pub fn history_line(entry: &HistoryEntry) -> String {
    let hint = match entry.direction {
        Direction::Higher => "too high",
        Direction::Lower => "too low",
        Direction::Exact => "exact",
    };
    format!(
        "#{} → {} ({} | {})",
        entry.attempt,
        entry.guess,
        hint,
        tier_label(entry.tier)
    )
}

pub fn record_summary(record: Option<&Record>) -> String {
    match record {
        Some(record) => format!(
            "{} {} / {}",
            record.attempts,
            "attempt".pluralize(record.attempts),
            format_elapsed(record.elapsed)
        ),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_message_pluralizes() {
        assert_eq!(
            win_message(Mode::Classic, 1, Duration::from_secs(4)),
            "You found the secret number with 1 attempt in 00:04!"
        );
        assert_eq!(
            win_message(Mode::Classic, 3, Duration::from_secs(65)),
            "You found the secret number with 3 attempts in 01:05!"
        );
        assert_eq!(
            win_message(Mode::Speedrun, 2, Duration::from_secs(9)),
            "Found it in 00:09 (2 attempts)!"
        );
    }

    #[test]
    fn test_history_line() {
        let entry = HistoryEntry {
            attempt: 3,
            guess: 42,
            direction: Direction::Higher,
            tier: Tier::Warm,
        };
        assert_eq!(history_line(&entry), "#3 → 42 (too high | warm)");
    }

    #[test]
    fn test_record_summary() {
        assert_eq!(record_summary(None), "—");
        let record = Record::new(3, Duration::from_millis(5400));
        assert_eq!(record_summary(Some(&record)), "3 attempts / 00:05");
    }

    #[test]
    fn test_validation_messages() {
        let error = ValidationError::OutOfRange { guess: 0, bound: 50 };
        assert_eq!(validation_message(&error), "The number must be between 1 and 50.");
    }
}
