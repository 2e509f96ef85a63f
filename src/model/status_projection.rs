use crate::events::EventHandler;
use crate::helpers::format_elapsed;
use crate::model::{GameEvent, GamePhase, HistoryEntry, Record};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Read model of the status bar: everything a front end shows between events.
#[derive(Debug, Default)]
pub struct StatusProjection {
    pub phase: Option<GamePhase>,
    pub bound: u32,
    pub attempts: u32,
    pub hint_min: u32,
    pub hint_max: u32,
    pub proximity: u8,
    pub elapsed: Duration,
    pub best: Option<Record>,
    pub history: Vec<HistoryEntry>,
}

impl StatusProjection {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

impl EventHandler<GameEvent> for StatusProjection {
    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PhaseChanged(phase) => self.phase = Some(*phase),
            GameEvent::RoundStarted {
                bound,
                hint_min,
                hint_max,
                ..
            } => {
                self.bound = *bound;
                self.attempts = 1;
                self.hint_min = *hint_min;
                self.hint_max = *hint_max;
                self.proximity = 0;
                self.elapsed = Duration::ZERO;
                self.history.clear();
            }
            GameEvent::RecordLoaded(record) => self.best = record.clone(),
            GameEvent::GuessFeedback {
                attempts,
                hint_min,
                hint_max,
                proximity,
                entry,
                ..
            } => {
                self.attempts = *attempts;
                self.hint_min = *hint_min;
                self.hint_max = *hint_max;
                self.proximity = *proximity;
                self.history.insert(0, entry.clone());
            }
            GameEvent::RoundWon {
                attempts,
                elapsed,
                record,
                ..
            } => {
                self.attempts = *attempts;
                self.elapsed = *elapsed;
                self.proximity = 100;
                self.best = Some(record.clone());
            }
            GameEvent::Tick { elapsed } => self.elapsed = *elapsed,
            GameEvent::TimerStateChanged(timer) => self.elapsed = timer.elapsed(),
            _ => (),
        }
    }
}
