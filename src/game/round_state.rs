use chrono::{DateTime, Utc};
use log::trace;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{GameError, Result, ValidationError};
use crate::game::feedback_classifier::FeedbackClassifier;
use crate::model::{Classification, Direction, GuessOutcome, Mode, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    NotStarted,
    /// `timer_pending` is set in classic mode until the first accepted guess.
    Active {
        timer_pending: bool,
    },
    Won,
}

/// One round of play. Fields are readable from anywhere but only this module
/// mutates them, which keeps `hint_min <= secret <= hint_max` intact.
#[readonly::make]
#[derive(Debug, Clone)]
pub struct RoundState {
    pub round_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub mode: Mode,
    pub bound: u32,
    pub secret: u32,
    pub attempts: u32,
    pub hint_min: u32,
    pub hint_max: u32,
    pub status: RoundStatus,
    pub timer: TimerState,
    classifier: FeedbackClassifier,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            round_id: Uuid::nil(),
            started_at: None,
            mode: Mode::default(),
            bound: 0,
            secret: 0,
            attempts: 1,
            hint_min: 0,
            hint_max: 0,
            status: RoundStatus::NotStarted,
            timer: TimerState::default(),
            classifier: FeedbackClassifier::default(),
        }
    }
}

impl RoundState {
    pub fn new(classifier: FeedbackClassifier) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }

    pub fn set_classifier(&mut self, classifier: FeedbackClassifier) {
        self.classifier = classifier;
    }

    /// Resets everything for a new secret. Speedrun rounds start the clock here.
    pub fn start(&mut self, bound: u32, secret: u32, mode: Mode) -> Result<()> {
        if bound < 1 {
            return Err(GameError::InvalidConfiguration(format!(
                "round bound must be at least 1, got {}",
                bound
            )));
        }
        if !(1..=bound).contains(&secret) {
            return Err(GameError::InvalidConfiguration(format!(
                "secret {} outside 1..={}",
                secret, bound
            )));
        }

        self.round_id = Uuid::new_v4();
        self.started_at = Some(Utc::now());
        self.mode = mode;
        self.bound = bound;
        self.secret = secret;
        self.attempts = 1;
        self.hint_min = 1;
        self.hint_max = bound;
        self.timer = self.timer.reset();
        if mode.starts_clock_immediately() {
            self.timer = self.timer.started();
        }
        self.status = RoundStatus::Active {
            timer_pending: !self.timer.is_running(),
        };
        trace!(target: "game_state", "Round {} started: bound {} mode {}", self.round_id, bound, mode);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, RoundStatus::Active { .. })
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Parses and validates `raw`, then scores it. Rejected input leaves the
    /// round untouched.
    pub fn submit_guess(&mut self, raw: &str) -> std::result::Result<GuessOutcome, ValidationError> {
        if !self.is_active() {
            return Err(ValidationError::RoundNotActive);
        }
        let guess = parse_guess(raw)?;
        if guess < 1 || guess > self.bound as i64 {
            return Err(ValidationError::OutOfRange {
                guess,
                bound: self.bound,
            });
        }
        let guess = guess as u32;

        if let RoundStatus::Active {
            timer_pending: true,
        } = self.status
        {
            self.timer = self.timer.started();
            self.status = RoundStatus::Active {
                timer_pending: false,
            };
        }

        let classification = self.classifier.classify(guess, self.secret, self.bound);
        match classification.direction {
            Direction::Exact => {
                self.timer = self.timer.stopped();
                self.status = RoundStatus::Won;
                Ok(GuessOutcome::Won {
                    guess,
                    attempts: self.attempts,
                    elapsed: self.timer.elapsed(),
                })
            }
            Direction::Higher => {
                self.hint_max = self.hint_max.min(guess - 1);
                self.attempts += 1;
                Ok(self.continue_outcome(guess, classification))
            }
            Direction::Lower => {
                self.hint_min = self.hint_min.max(guess + 1);
                self.attempts += 1;
                Ok(self.continue_outcome(guess, classification))
            }
        }
    }

    fn continue_outcome(&self, guess: u32, classification: Classification) -> GuessOutcome {
        GuessOutcome::Continue {
            guess,
            direction: classification.direction,
            tier: classification.tier,
            distance: classification.distance,
            hint_min: self.hint_min,
            hint_max: self.hint_max,
        }
    }

    /// Accrues time while the round is active and its clock is running.
    pub fn advance_time(&mut self, delta: Duration) {
        self.advance_time_for(self.timer.epoch, delta);
    }

    /// Like `advance_time`, but ignored unless `epoch` is the current clock's.
    pub fn advance_time_for(&mut self, epoch: u64, delta: Duration) -> bool {
        if !self.is_active() {
            return false;
        }
        let before = self.timer.elapsed();
        self.timer = self.timer.advanced(epoch, delta);
        self.timer.elapsed() != before
    }

    /// Drops the round without a result; guesses and ticks are refused until
    /// the next `start`.
    pub fn abandon(&mut self) {
        self.timer = self.timer.stopped();
        self.status = RoundStatus::NotStarted;
    }
}

/// Accepts integers, surrounding whitespace, and whole-valued decimals like `7.0`.
fn parse_guess(raw: &str) -> std::result::Result<i64, ValidationError> {
    let trimmed = raw.trim();
    let invalid = || ValidationError::InvalidInput {
        raw: raw.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid());
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => {
            Ok(value.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
        }
        _ => Err(invalid()),
    }
}
