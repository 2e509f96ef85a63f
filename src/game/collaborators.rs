//! Side-effecting services the controller calls into. All of them are
//! fire-and-forget: implementations swallow their own failures.

use crate::game::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Invalid,
    /// A miss; `distance` lets the synth pitch the tone by how far off it was.
    Error { distance: u32 },
    Success,
}

pub trait Narrator {
    fn announce(&self, text: &str);
}

pub trait TonePlayer {
    fn play_feedback_tone(&self, kind: ToneKind);
}

pub trait Celebration {
    fn celebrate(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Narrator for Silent {
    fn announce(&self, _text: &str) {}
}

impl TonePlayer for Silent {
    fn play_feedback_tone(&self, _kind: ToneKind) {}
}

impl Celebration for Silent {
    fn celebrate(&self) {}
}

pub struct Collaborators {
    narrator: Box<dyn Narrator>,
    tones: Box<dyn TonePlayer>,
    celebration: Box<dyn Celebration>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            narrator: Box::new(Silent),
            tones: Box::new(Silent),
            celebration: Box::new(Silent),
        }
    }
}

impl Collaborators {
    pub fn new(
        narrator: Box<dyn Narrator>,
        tones: Box<dyn TonePlayer>,
        celebration: Box<dyn Celebration>,
    ) -> Self {
        Self {
            narrator,
            tones,
            celebration,
        }
    }

    pub fn with_narrator(mut self, narrator: Box<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn announce(&self, settings: &Settings, text: &str) {
        if settings.voice_enabled {
            self.narrator.announce(text);
        }
    }

    pub fn play_feedback_tone(&self, settings: &Settings, kind: ToneKind) {
        if settings.tones_enabled {
            self.tones.play_feedback_tone(kind);
        }
    }

    pub fn celebrate(&self, settings: &Settings) {
        if settings.celebration_enabled {
            self.celebration.celebrate();
        }
    }
}
