use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scoring variant. Classic ranks by attempts and starts the clock on the first
/// guess; speedrun ranks by time only and starts the clock with the round.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Classic,
    Speedrun,
}

impl Mode {
    pub fn starts_clock_immediately(&self) -> bool {
        matches!(self, Mode::Speedrun)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Speedrun => "speedrun",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Mode::Classic),
            "speedrun" => Ok(Mode::Speedrun),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}
