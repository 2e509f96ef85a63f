pub mod collaborators;
pub mod draw_pool;
pub mod feedback_classifier;
pub mod game_controller;
pub mod narration;
pub mod record_store;
pub mod round_state;
pub mod settings;

pub use collaborators::{Celebration, Collaborators, Narrator, ToneKind, TonePlayer};
pub use draw_pool::{draw, DrawPool, FixedSecret, RandomDraw, SecretSource};
pub use feedback_classifier::{classify, FeedbackClassifier};
pub use game_controller::GameController;
pub use record_store::{
    compare_and_store, JsonFileRecordStorage, MemoryRecordStorage, RecordOutcome, RecordStorage,
    RecordStore,
};
pub use round_state::{RoundState, RoundStatus};
pub use settings::{ProximityThresholds, Settings, Theme};
