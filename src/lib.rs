// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod shake;
pub mod theme;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use game_state::{GameInterface, GameTally, UserAction, game_loop};
pub use session::{Banner, GameStatus, GuessOutcome, Outcome, Session, evaluate};
pub use theme::{Theme, ThemeRegistry};
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
