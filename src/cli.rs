use crate::debug_log;
use crate::game_state::{GameInterface, UserAction};
use crate::session::{Banner, Session};
use crate::theme::{DEFAULT_THEME_ID, ThemeSummary};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Hangman options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Theme to start with
    #[arg(short = 't', long = "theme", default_value = DEFAULT_THEME_ID)]
    pub theme: String,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Print the available themes and exit
    #[arg(long = "list-themes")]
    pub list_themes: bool,

    /// Log at debug level
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Where to write the log (defaults to the local data directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum CommandInput {
    Action(UserAction),
    Invalid(String),
}

pub fn parse_command(input: &str) -> CommandInput {
    let input = input.trim().to_lowercase();
    let mut parts = input.split_whitespace();
    let Some(head) = parts.next() else {
        return CommandInput::Invalid("Enter a letter to guess.".to_string());
    };

    match (head, parts.next()) {
        ("exit" | "quit", None) => CommandInput::Action(UserAction::Exit),
        ("new" | "next", None) => CommandInput::Action(UserAction::NewGame),
        ("themes", None) => CommandInput::Action(UserAction::ListThemes),
        ("theme", Some(id)) => CommandInput::Action(UserAction::ChangeTheme(id.to_string())),
        ("theme", None) => CommandInput::Invalid("Usage: theme <id>".to_string()),
        (word, None) => {
            let mut chars = word.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_lowercase() => {
                    CommandInput::Action(UserAction::Guess(c))
                }
                (Some(c), None) => CommandInput::Invalid(format!("'{c}' is not a letter.")),
                _ => usage(),
            }
        }
        _ => usage(),
    }
}

fn usage() -> CommandInput {
    CommandInput::Invalid(
        "Guess one letter at a time, or use new, theme <id>, themes, exit.".to_string(),
    )
}

pub fn masked_word(session: &Session) -> String {
    session
        .letter_slots()
        .iter()
        .map(|slot| {
            if slot.revealed {
                slot.letter.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn lives_line(session: &Session) -> String {
    session
        .chips()
        .map(|(token, lost)| {
            if lost {
                format!("[x {}]", token.name)
            } else {
                format!("[{}]", token.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn banner_lines(session: &Session) -> Vec<String> {
    match session.banner() {
        Banner::None => Vec::new(),
        Banner::Farewell(text) => vec![text],
        Banner::Won(text) => vec!["YOU WIN!".to_string(), text],
        Banner::Lost(text) => vec![
            "GAME OVER".to_string(),
            text,
            format!("The word was: {}", session.target_word().to_uppercase()),
        ],
    }
}

/// CLI implementation of the `GameInterface` trait.
/// Reads commands line by line and writes plain text, so it doubles as the
/// scriptable interface used by tests.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("CliInterface::emit() - write failed: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_session(&mut self, session: &Session) {
        self.emit("");
        self.emit(&format!("Lives: {}", lives_line(session)));
        self.emit(&format!("Word:  {}", masked_word(session)));
        let guessed: String = session.guessed_letters().iter().collect();
        if !guessed.is_empty() {
            self.emit(&format!("Guessed: {guessed}"));
        }
        for line in banner_lines(session) {
            self.emit(&line);
        }
        if session.is_over() {
            self.emit("Type 'new' to play again or 'exit' to quit:");
        } else {
            self.emit("Guess a letter (or 'new', 'theme <id>', 'themes', 'exit'):");
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                debug_log!("CliInterface::read_action() - read failed: {}", e);
                return Some(UserAction::Exit);
            }
        }

        match parse_command(&input) {
            CommandInput::Action(action) => Some(action),
            CommandInput::Invalid(message) => {
                self.emit(&message);
                None
            }
        }
    }

    fn display_error(&mut self, message: &str) {
        self.emit(message);
    }

    fn display_themes(&mut self, themes: &[ThemeSummary]) {
        self.emit("Themes:");
        for theme in themes {
            self.emit(&format!("  {:<12} {}", theme.id, theme.name));
        }
    }

    fn display_new_game_message(&mut self, session: &Session) {
        let theme = session.theme();
        self.emit(&format!("== {} ==", theme.title));
        self.emit(&theme.tagline);
        self.emit(&format!(
            "New game ({}). The word has {} letters; you have {} lives.",
            theme.name,
            session.target_word().chars().count(),
            theme.lives()
        ));
    }

    fn display_exit_message(&mut self) {
        self.emit("Exiting.");
    }
}
