use std::time::Duration;

use super::{Difficulty, Mode};
use crate::game::settings::Theme;

#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    pub voice_enabled: Option<bool>,
    pub tones_enabled: Option<bool>,
    pub celebration_enabled: Option<bool>,
    pub theme: Option<Theme>,
}

#[derive(Debug, Clone)]
pub enum GameCommand {
    NewRound,
    Restart,
    SubmitGuess(String),
    Tick { epoch: u64, delta: Duration },
    ChangeDifficulty(Difficulty),
    ChangeMode(Mode),
    ChangeSettings(SettingsChange),
}
