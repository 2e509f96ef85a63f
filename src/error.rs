/// Errors that stop the game from starting or saving. Guess validation failures
/// are not errors in this sense; see [`ValidationError`].
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Recoverable rejection of a submitted guess. The round is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("not a number: {raw:?}")]
    InvalidInput { raw: String },

    #[error("{guess} is outside 1..={bound}")]
    OutOfRange { guess: i64, bound: u32 },

    #[error("no round is in progress")]
    RoundNotActive,
}
