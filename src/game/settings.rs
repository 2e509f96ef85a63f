use crate::error::{GameError, Result};
use crate::model::{Difficulty, Mode, SettingsChange};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Fractions of the bound under which a miss counts as hot or warm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProximityThresholds {
    pub hot: f64,
    pub warm: f64,
}

impl Default for ProximityThresholds {
    fn default() -> Self {
        Self {
            hot: 0.05,
            warm: 0.15,
        }
    }
}

impl ProximityThresholds {
    /// Both fractions finite and within `0.0..=1.0`, with `hot <= warm`.
    pub fn is_valid(&self) -> bool {
        let in_range = |f: f64| f.is_finite() && (0.0..=1.0).contains(&f);
        in_range(self.hot) && in_range(self.warm) && self.hot <= self.warm
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default = "default_true")]
    pub voice_enabled: bool,

    #[serde(default = "default_true")]
    pub tones_enabled: bool,

    #[serde(default = "default_true")]
    pub celebration_enabled: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "default_bounds")]
    pub bounds: HashMap<Difficulty, u32>,

    #[serde(default)]
    pub thresholds: ProximityThresholds,
}

// Helper functions for default values
fn default_version() -> u32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_bounds() -> HashMap<Difficulty, u32> {
    Difficulty::all()
        .into_iter()
        .map(|difficulty| (difficulty, difficulty.default_bound()))
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            mode: Mode::default(),
            voice_enabled: true,
            tones_enabled: true,
            celebration_enabled: true,
            theme: Theme::default(),
            bounds: default_bounds(),
            thresholds: ProximityThresholds::default(),
        }
    }
}

impl Settings {
    /// Loads from the platform data directory, falling back to (and writing)
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Settings::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                settings.check_thresholds();
                return settings;
            }
        }
        let default = Settings::default();
        if let Err(e) = default.save_to(path) {
            log::warn!(target: "settings", "Could not write default settings to {:?}: {}", path, e);
        }
        default
    }

    pub fn save(&self) -> Result<()> {
        match Self::settings_path() {
            Some(path) => self.save_to(&path),
            None => Err(GameError::InvalidConfiguration(
                "no data directory available".to_string(),
            )),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "secretnumber").map(|dirs| dirs.data_dir().to_path_buf())
    }

    fn settings_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("settings.json"))
    }

    fn migrate(&mut self) {
        match self.version {
            // v1 had no mode and a single record per difficulty
            0 | 1 => {
                self.version = 2;
            }
            _ => (),
        }
    }

    fn check_thresholds(&mut self) {
        if !self.thresholds.is_valid() {
            log::warn!(
                target: "settings",
                "Ignoring proximity thresholds {:?}; using defaults",
                self.thresholds
            );
            self.thresholds = ProximityThresholds::default();
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Upper bound for `difficulty`; zero or missing entries are configuration errors.
    pub fn bound_for(&self, difficulty: Difficulty) -> Result<u32> {
        match self.bounds.get(&difficulty) {
            Some(&bound) if bound >= 1 => Ok(bound),
            Some(bound) => Err(GameError::InvalidConfiguration(format!(
                "bound for {} must be positive, got {}",
                difficulty, bound
            ))),
            None => Err(GameError::InvalidConfiguration(format!(
                "no bound configured for {}",
                difficulty
            ))),
        }
    }

    pub fn apply(&mut self, change: &SettingsChange) {
        if let Some(voice_enabled) = change.voice_enabled {
            self.voice_enabled = voice_enabled;
        }
        if let Some(tones_enabled) = change.tones_enabled {
            self.tones_enabled = tones_enabled;
        }
        if let Some(celebration_enabled) = change.celebration_enabled {
            self.celebration_enabled = celebration_enabled;
        }
        if let Some(theme) = change.theme {
            self.theme = theme;
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    /// Fixed RNG seed from `SEED`; unparseable values are ignored.
    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}
