mod difficulty;
mod feedback;
mod game_command;
mod game_event;
mod mode;
mod record;
mod status_projection;
mod timer_state;

pub use difficulty::Difficulty;
pub use feedback::{Classification, Direction, GuessOutcome, HistoryEntry, Tier};
pub use game_command::{GameCommand, SettingsChange};
pub use game_event::{GameEvent, GamePhase};
pub use mode::Mode;
pub use record::{Record, RecordKey};
pub use status_projection::StatusProjection;
pub use timer_state::TimerState;
