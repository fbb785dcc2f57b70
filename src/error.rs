use thiserror::Error;

/// Every failure the game core can report. None of them are fatal: callers
/// fall back to a placeholder word, ignore the input, or use generic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the word bank is empty")]
    EmptyBank,
    #[error("'{0}' is not a letter between a and z")]
    InvalidLetter(char),
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
