//! Theme registry: life tokens and the messages shown as they are lost.
//!
//! Every theme shares the same master word list; a theme only decides how
//! many lives a round has and what the player reads along the way.

use crate::error::{GameError, Result};

/// Shown when a theme or its farewell function cannot be found.
pub const FALLBACK_FAREWELL: &str = "Oh no!";
pub const FALLBACK_LOSE_MESSAGE: &str = "You lose!";
pub const DEFAULT_THEME_ID: &str = "languages";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// One life. Rendered as a chip that is crossed out once the matching wrong
/// guess has been made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeToken {
    pub name: String,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl LifeToken {
    pub fn new(name: &str, background: Rgb, foreground: Rgb) -> Self {
        Self {
            name: name.to_string(),
            background,
            foreground,
        }
    }
}

/// Maps a zero-based wrong-guess index to the text shown after that miss.
pub type FarewellFn = fn(&Theme, usize) -> String;

#[derive(Debug, Clone)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub title: String,
    pub tagline: String,
    pub lives: Vec<LifeToken>,
    pub farewell: Option<FarewellFn>,
    pub lose_message: String,
    pub win_message: String,
}

impl Theme {
    pub fn lives(&self) -> usize {
        self.lives.len()
    }

    pub fn farewell_text(&self, wrong_index: usize) -> String {
        match self.farewell {
            Some(farewell) => farewell(self, wrong_index),
            None => FALLBACK_FAREWELL.to_string(),
        }
    }
}

/// Ordered `(id, display name)` pair used to populate a theme selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// Build a registry from an explicit list. The first theme is the default.
    pub fn new(themes: Vec<Theme>) -> Self {
        Self { themes }
    }

    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![languages_theme(), archery_theme()])
    }

    pub fn list_themes(&self) -> Vec<ThemeSummary> {
        self.themes
            .iter()
            .map(|t| ThemeSummary {
                id: t.id.clone(),
                name: t.name.clone(),
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<&Theme> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| GameError::UnknownTheme(id.to_string()))
    }

    pub fn default_theme(&self) -> Option<&Theme> {
        self.themes.first()
    }

    /// Resolve `id`, or fall back to the default theme with a warning.
    pub fn get_or_default(&self, id: &str) -> Option<&Theme> {
        match self.get(id) {
            Ok(theme) => Some(theme),
            Err(e) => {
                log::warn!("{e}; falling back to the default theme");
                self.default_theme()
            }
        }
    }

    /// The theme after `id` in selector order, wrapping around.
    pub fn next_after(&self, id: &str) -> Option<&Theme> {
        let position = self.themes.iter().position(|t| t.id == id);
        match position {
            Some(i) => self.themes.get((i + 1) % self.themes.len()),
            None => self.default_theme(),
        }
    }

    pub fn lives_for(&self, id: &str) -> Result<usize> {
        self.get(id).map(Theme::lives)
    }

    pub fn farewell_text(&self, id: &str, wrong_index: usize) -> String {
        match self.get(id) {
            Ok(theme) => theme.farewell_text(wrong_index),
            Err(_) => FALLBACK_FAREWELL.to_string(),
        }
    }

    pub fn lose_message(&self, id: &str) -> String {
        match self.get(id) {
            Ok(theme) => theme.lose_message.clone(),
            Err(_) => FALLBACK_LOSE_MESSAGE.to_string(),
        }
    }
}

const CREAM: Rgb = Rgb(0xF9, 0xF4, 0xDA);
const INK: Rgb = Rgb(0x1E, 0x1E, 0x1E);

fn language_farewell(theme: &Theme, index: usize) -> String {
    theme
        .lives
        .get(index)
        .map_or_else(|| "unknown".to_string(), |token| token.name.clone())
}

fn archery_farewell(theme: &Theme, index: usize) -> String {
    match theme.lives.get(index) {
        Some(token) => format!("You missed! Goodbye, {}!", token.name),
        None => "You missed an arrow!".to_string(),
    }
}

fn languages_theme() -> Theme {
    Theme {
        id: "languages".to_string(),
        name: "Programming Languages".to_string(),
        title: "Assembly: Endgame".to_string(),
        tagline: "Guess the word. Save the modern web.".to_string(),
        lives: vec![
            LifeToken::new("HTML", Rgb(0xE2, 0x68, 0x0F), CREAM),
            LifeToken::new("CSS", Rgb(0x32, 0x8A, 0xF1), CREAM),
            LifeToken::new("JavaScript", Rgb(0xF4, 0xEB, 0x13), INK),
            LifeToken::new("React", Rgb(0x2E, 0xD3, 0xE9), INK),
            LifeToken::new("TypeScript", Rgb(0x29, 0x8E, 0xC6), CREAM),
            LifeToken::new("Node.js", Rgb(0x59, 0x91, 0x37), CREAM),
            LifeToken::new("Python", Rgb(0xFF, 0xD7, 0x42), INK),
            LifeToken::new("Ruby", Rgb(0xD0, 0x2B, 0x2B), CREAM),
            LifeToken::new("Assembly", Rgb(0x2D, 0x51, 0x9F), CREAM),
        ],
        farewell: Some(language_farewell),
        lose_message: "You lose! Better start learning Assembly 😭".to_string(),
        win_message: "The programming world is safe. Well done! 🎉".to_string(),
    }
}

fn archery_theme() -> Theme {
    Theme {
        id: "archery".to_string(),
        name: "Archery Terms".to_string(),
        title: "Bullseye: Endgame".to_string(),
        tagline: "Aim true, don't let your arrows fly forever!".to_string(),
        lives: vec![
            LifeToken::new("Nock", Rgb(0x8B, 0x5A, 0x2B), CREAM),
            LifeToken::new("Fletching", Rgb(0xC0, 0x39, 0x2B), CREAM),
            LifeToken::new("Shaft", Rgb(0xD4, 0xA3, 0x73), INK),
            LifeToken::new("Point", Rgb(0x7F, 0x8C, 0x8D), INK),
            LifeToken::new("Quiver", Rgb(0x27, 0xAE, 0x60), CREAM),
            LifeToken::new("Longbow", Rgb(0x6E, 0x44, 0x1F), CREAM),
            LifeToken::new("Recurve", Rgb(0x29, 0x80, 0xB9), CREAM),
            LifeToken::new("Bullseye", Rgb(0xF1, 0xC4, 0x0F), INK),
        ],
        farewell: Some(archery_farewell),
        lose_message: "You ran out of arrows! 🏹".to_string(),
        win_message: "Right in the gold. Well shot! 🎯".to_string(),
    }
}
