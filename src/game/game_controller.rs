use chrono::Utc;
use log::{debug, error, info, trace};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::collaborators::{Collaborators, ToneKind};
use super::draw_pool::SecretSource;
use super::feedback_classifier::FeedbackClassifier;
use super::narration;
use super::record_store::RecordStore;
use super::round_state::RoundState;
use super::settings::Settings;
use crate::destroyable::Destroyable;
use crate::error::{GameError, Result, ValidationError};
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::helpers::proximity_percent;
use crate::model::{
    Difficulty, Direction, GameCommand, GameEvent, GamePhase, GuessOutcome, HistoryEntry, Mode, Record,
    RecordKey, SettingsChange,
};

/// Owns the round, the secret source and the configuration, and routes every
/// mutation through its own methods. Presentation talks to it through
/// `GameCommand`s and listens on `GameEvent`s.
pub struct GameController {
    phase: GamePhase,
    round: RoundState,
    history: Vec<HistoryEntry>,
    secret_source: Box<dyn SecretSource>,
    records: RecordStore,
    collaborators: Collaborators,
    settings: Settings,
    debug_mode: bool,
    subscription: Option<Unsubscriber<GameCommand>>,
    game_event_emitter: EventEmitter<GameEvent>,
}

impl Destroyable for GameController {
    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl GameController {
    pub fn new(
        settings: Settings,
        secret_source: Box<dyn SecretSource>,
        records: RecordStore,
        collaborators: Collaborators,
        game_event_emitter: EventEmitter<GameEvent>,
    ) -> Self {
        let classifier = FeedbackClassifier::new(settings.thresholds);
        Self {
            phase: GamePhase::Idle,
            round: RoundState::new(classifier),
            history: Vec::new(),
            secret_source,
            records,
            collaborators,
            settings,
            debug_mode: Settings::is_debug_mode(),
            subscription: None,
            game_event_emitter,
        }
    }

    /// Builds a controller that also reacts to commands sent on
    /// `game_command_observer`.
    pub fn wired(
        settings: Settings,
        secret_source: Box<dyn SecretSource>,
        records: RecordStore,
        collaborators: Collaborators,
        game_event_emitter: EventEmitter<GameEvent>,
        game_command_observer: EventObserver<GameCommand>,
    ) -> Rc<RefCell<Self>> {
        let controller = Rc::new(RefCell::new(Self::new(
            settings,
            secret_source,
            records,
            collaborators,
            game_event_emitter,
        )));
        GameController::wire_subscription(controller.clone(), game_command_observer);
        controller
    }

    fn wire_subscription(
        controller: Rc<RefCell<Self>>,
        game_command_observer: EventObserver<GameCommand>,
    ) {
        let handler = controller.clone();
        let subscription = game_command_observer.subscribe(move |command| {
            handler.borrow_mut().handle_command(command.clone());
        });
        controller.borrow_mut().subscription = Some(subscription);
    }

    pub fn handle_command(&mut self, command: GameCommand) {
        trace!(target: "game_state", "Handling command: {:?}", command);
        // Failures are reported through events; nothing to return to a channel.
        match command {
            GameCommand::NewRound | GameCommand::Restart => {
                let _ = self.start_round();
            }
            GameCommand::SubmitGuess(raw) => {
                let _ = self.submit_guess(&raw);
            }
            GameCommand::Tick { epoch, delta } => self.tick(epoch, delta),
            GameCommand::ChangeDifficulty(difficulty) => {
                let _ = self.change_difficulty(difficulty);
            }
            GameCommand::ChangeMode(mode) => {
                let _ = self.change_mode(mode);
            }
            GameCommand::ChangeSettings(change) => self.change_settings(&change),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.settings.difficulty, self.settings.mode)
    }

    pub fn best_record(&self) -> Option<Record> {
        self.records.best(&self.record_key())
    }

    /// Epoch a scheduler must stamp its ticks with, or `None` while the clock is stopped.
    pub fn timer_epoch(&self) -> Option<u64> {
        if self.round.is_active() && self.round.timer.is_running() {
            Some(self.round.timer.epoch)
        } else {
            None
        }
    }

    /// Starts a fresh round with the current difficulty and mode, abandoning
    /// whatever round was in progress.
    pub fn start_round(&mut self) -> Result<()> {
        let bound = match self.settings.bound_for(self.settings.difficulty) {
            Ok(bound) => bound,
            Err(e) => return Err(self.refuse_round(e)),
        };
        let secret = match self.secret_source.next_secret(bound) {
            Ok(secret) => secret,
            Err(e) => return Err(self.refuse_round(e)),
        };

        if let Err(e) = self.round.start(bound, secret, self.settings.mode) {
            return Err(self.refuse_round(e));
        }
        self.history.clear();
        if self.debug_mode {
            debug!(target: "game_state", "Round {} secret: {}", self.round.round_id, secret);
        }
        info!(
            target: "game_state",
            "New round {}; difficulty: {}; mode: {}; bound: {}",
            self.round.round_id, self.settings.difficulty, self.settings.mode, bound
        );

        self.set_phase(GamePhase::RoundInProgress);
        self.game_event_emitter.emit(GameEvent::RoundStarted {
            difficulty: self.settings.difficulty,
            mode: self.settings.mode,
            bound,
            hint_min: self.round.hint_min,
            hint_max: self.round.hint_max,
        });
        self.game_event_emitter
            .emit(GameEvent::TimerStateChanged(self.round.timer.clone()));
        self.game_event_emitter
            .emit(GameEvent::RecordLoaded(self.best_record()));
        self.collaborators
            .announce(&self.settings, &narration::round_prompt(bound));
        Ok(())
    }

    fn refuse_round(&mut self, e: GameError) -> GameError {
        error!(target: "game_state", "Cannot start round: {}", e);
        self.round.abandon();
        self.history.clear();
        self.set_phase(GamePhase::Idle);
        self.game_event_emitter.emit(GameEvent::RoundRefused {
            reason: e.to_string(),
        });
        e
    }

    pub fn submit_guess(&mut self, raw: &str) -> std::result::Result<GuessOutcome, ValidationError> {
        let clock_was_running = self.round.timer.is_running();
        let outcome = match self.round.submit_guess(raw) {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(target: "game_state", "Rejected guess {:?}: {}", raw, reason);
                self.collaborators
                    .announce(&self.settings, &narration::validation_message(&reason));
                self.collaborators
                    .play_feedback_tone(&self.settings, ToneKind::Invalid);
                self.game_event_emitter.emit(GameEvent::ValidationFailed {
                    reason: reason.clone(),
                });
                return Err(reason);
            }
        };

        if !clock_was_running && self.round.timer.is_running() {
            self.game_event_emitter
                .emit(GameEvent::TimerStateChanged(self.round.timer.clone()));
        }

        match &outcome {
            GuessOutcome::Continue {
                guess,
                direction,
                tier,
                distance,
                hint_min,
                hint_max,
            } => {
                let entry = HistoryEntry {
                    attempt: self.round.attempts - 1,
                    guess: *guess,
                    direction: *direction,
                    tier: *tier,
                };
                trace!(target: "game_state", "{}", narration::history_line(&entry));
                self.history.insert(0, entry.clone());

                self.collaborators
                    .announce(&self.settings, narration::direction_message(*direction));
                self.collaborators.play_feedback_tone(
                    &self.settings,
                    ToneKind::Error {
                        distance: *distance,
                    },
                );
                self.game_event_emitter.emit(GameEvent::GuessFeedback {
                    direction: *direction,
                    tier: *tier,
                    attempts: self.round.attempts,
                    hint_min: *hint_min,
                    hint_max: *hint_max,
                    proximity: proximity_percent(*guess, self.round.secret, self.round.bound),
                    entry,
                });
            }
            GuessOutcome::Won {
                attempts, elapsed, ..
            } => self.finish_round(*attempts, *elapsed),
        }
        Ok(outcome)
    }

    fn finish_round(&mut self, attempts: u32, elapsed: Duration) {
        let key = self.record_key();
        let candidate = Record::new(attempts, elapsed).achieved_at(Utc::now());
        let outcome = self.records.submit(&key, candidate);
        info!(
            target: "game_state",
            "Round {} won in {} attempts / {:?}; new record: {}",
            self.round.round_id, attempts, elapsed, outcome.is_new_record
        );

        self.set_phase(GamePhase::RoundWon);
        self.game_event_emitter
            .emit(GameEvent::TimerStateChanged(self.round.timer.clone()));
        self.game_event_emitter.emit(GameEvent::RoundWon {
            attempts,
            elapsed,
            record: outcome.record,
            is_new_record: outcome.is_new_record,
        });

        self.collaborators
            .announce(&self.settings, narration::direction_message(Direction::Exact));
        self.collaborators.announce(
            &self.settings,
            &narration::win_message(self.settings.mode, attempts, elapsed),
        );
        self.collaborators
            .play_feedback_tone(&self.settings, ToneKind::Success);
        self.collaborators.celebrate(&self.settings);
    }

    /// Periodic clock tick. Safe to call at any time: it does nothing unless
    /// the round is active, its clock runs, and `epoch` is current.
    pub fn tick(&mut self, epoch: u64, delta: Duration) {
        if self.round.advance_time_for(epoch, delta) {
            self.game_event_emitter.emit(GameEvent::Tick {
                elapsed: self.round.elapsed(),
            });
        }
    }

    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        self.settings.difficulty = difficulty;
        self.settings_changed();
        self.start_round()
    }

    pub fn change_mode(&mut self, mode: Mode) -> Result<()> {
        self.settings.mode = mode;
        self.settings_changed();
        self.start_round()
    }

    pub fn change_settings(&mut self, change: &SettingsChange) {
        self.settings.apply(change);
        self.settings_changed();
    }

    fn settings_changed(&mut self) {
        self.round
            .set_classifier(FeedbackClassifier::new(self.settings.thresholds));
        self.game_event_emitter
            .emit(GameEvent::SettingsChanged(self.settings.clone()));
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            trace!(target: "game_state", "Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
        self.game_event_emitter.emit(GameEvent::PhaseChanged(phase));
    }
}
