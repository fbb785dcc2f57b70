//! One round of play: the hidden word, the letters tried so far and the
//! outcome derived from them.
//!
//! # State Machine
//! - `Active` → `Over` once the word is complete (`Won`) or the wrong guesses
//!   reach the theme's lives (`Lost`)
//! - `reset` returns to `Active` from anywhere

use crate::error::{GameError, Result};
use crate::info_log;
use crate::shake::ShakeTimer;
use crate::theme::{LifeToken, Theme};
use crate::wordbank::WordBank;
use rand::Rng;
use std::collections::BTreeSet;
use std::time::Instant;

/// Snapshot of everything derived from `(word, guessed, lives)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub wrong_guess_count: usize,
    pub is_won: bool,
    pub is_lost: bool,
    pub is_over: bool,
}

/// Compute the outcome of a round from one consistent snapshot.
pub fn evaluate(word: &str, guessed: &BTreeSet<char>, lives: usize) -> Outcome {
    let wrong_guess_count = guessed.iter().filter(|&&c| !word.contains(c)).count();
    let is_won = word.chars().all(|c| guessed.contains(&c));
    let is_lost = wrong_guess_count >= lives;
    Outcome {
        wrong_guess_count,
        is_won,
        is_lost,
        is_over: is_won || is_lost,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl Outcome {
    /// A completed word counts as a win even when the loss condition holds too.
    pub fn status(&self) -> GameStatus {
        if self.is_won {
            GameStatus::Won
        } else if self.is_lost {
            GameStatus::Lost
        } else {
            GameStatus::Active
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    /// Letter was already guessed; nothing changed.
    Repeated,
    /// The round is over; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterSlot {
    pub letter: char,
    pub revealed: bool,
    /// Revealed only because the round was lost.
    pub missed: bool,
}

/// Status line for the round, announced after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    None,
    Farewell(String),
    Won(String),
    Lost(String),
}

pub struct Session<'a> {
    bank: &'a WordBank,
    theme: &'a Theme,
    target_word: String,
    guessed: BTreeSet<char>,
    last_guess: Option<char>,
    outcome: Outcome,
    shake: ShakeTimer,
}

impl<'a> Session<'a> {
    pub fn new(bank: &'a WordBank, theme: &'a Theme) -> Self {
        Self::new_with_rng(bank, theme, &mut rand::rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        bank: &'a WordBank,
        theme: &'a Theme,
        rng: &mut R,
    ) -> Self {
        let mut session = Self {
            bank,
            theme,
            target_word: String::new(),
            guessed: BTreeSet::new(),
            last_guess: None,
            outcome: Outcome::default(),
            shake: ShakeTimer::default(),
        };
        session.reset_with_rng(None, rng);
        session
    }

    /// Start a new round, optionally switching theme first.
    pub fn reset(&mut self, theme: Option<&'a Theme>) {
        self.reset_with_rng(theme, &mut rand::rng());
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, theme: Option<&'a Theme>, rng: &mut R) {
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self.target_word = self.bank.sample_or_default(rng);
        self.guessed.clear();
        self.last_guess = None;
        self.shake.cancel();
        self.refresh();
        info_log!(
            "New round: theme '{}', {} letters, {} lives",
            self.theme.id,
            self.target_word.len(),
            self.theme.lives()
        );
    }

    pub fn guess(&mut self, letter: char) -> Result<GuessOutcome> {
        self.guess_at(letter, Instant::now())
    }

    /// Guess `letter`, using `now` as the start of any shake it triggers.
    pub fn guess_at(&mut self, letter: char, now: Instant) -> Result<GuessOutcome> {
        if !letter.is_ascii_lowercase() {
            return Err(GameError::InvalidLetter(letter));
        }
        if self.outcome.is_over {
            return Ok(GuessOutcome::Ignored);
        }
        if !self.guessed.insert(letter) {
            return Ok(GuessOutcome::Repeated);
        }

        self.last_guess = Some(letter);
        self.refresh();

        let correct = self.target_word.contains(letter);
        self.shake.cancel();
        if !correct && !self.outcome.is_over {
            self.shake.arm(now);
        }

        match self.outcome.status() {
            GameStatus::Won => log::info!("Round won: '{}'", self.target_word),
            GameStatus::Lost => log::info!("Round lost: '{}'", self.target_word),
            GameStatus::Active => {}
        }

        Ok(if correct {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Wrong
        })
    }

    /// Let time pass; clears the shake flag once it is due.
    pub fn tick(&mut self, now: Instant) {
        self.shake.tick(now);
    }

    fn refresh(&mut self) {
        self.outcome = evaluate(&self.target_word, &self.guessed, self.theme.lives());
    }

    pub fn theme(&self) -> &'a Theme {
        self.theme
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn status(&self) -> GameStatus {
        self.outcome.status()
    }

    pub fn wrong_guess_count(&self) -> usize {
        self.outcome.wrong_guess_count
    }

    pub fn remaining_lives(&self) -> usize {
        self.theme.lives().saturating_sub(self.outcome.wrong_guess_count)
    }

    pub fn is_won(&self) -> bool {
        self.outcome.is_won
    }

    pub fn is_lost(&self) -> bool {
        self.outcome.is_lost
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_active()
    }

    /// The most recent guess, if it missed.
    pub fn last_wrong_guess(&self) -> Option<char> {
        self.last_guess.filter(|&c| !self.target_word.contains(c))
    }

    pub fn key_state(&self, letter: char) -> KeyState {
        if !self.guessed.contains(&letter) {
            KeyState::Unused
        } else if self.target_word.contains(letter) {
            KeyState::Correct
        } else {
            KeyState::Wrong
        }
    }

    pub fn keyboard(&self) -> Vec<(char, KeyState)> {
        ('a'..='z').map(|c| (c, self.key_state(c))).collect()
    }

    pub fn letter_slots(&self) -> Vec<LetterSlot> {
        let lost = self.outcome.is_lost && !self.outcome.is_won;
        self.target_word
            .chars()
            .map(|letter| {
                let guessed = self.guessed.contains(&letter);
                LetterSlot {
                    letter,
                    revealed: guessed || lost,
                    missed: lost && !guessed,
                }
            })
            .collect()
    }

    /// Life tokens paired with whether each one has been lost.
    pub fn chips(&self) -> impl Iterator<Item = (&'a LifeToken, bool)> {
        let wrong = self.outcome.wrong_guess_count;
        self.theme
            .lives
            .iter()
            .enumerate()
            .map(move |(i, token)| (token, i < wrong))
    }

    pub fn banner(&self) -> Banner {
        match self.outcome.status() {
            GameStatus::Won => Banner::Won(self.theme.win_message.clone()),
            GameStatus::Lost => Banner::Lost(self.theme.lose_message.clone()),
            GameStatus::Active if self.outcome.wrong_guess_count > 0 => {
                Banner::Farewell(self.theme.farewell_text(self.outcome.wrong_guess_count - 1))
            }
            GameStatus::Active => Banner::None,
        }
    }
}
