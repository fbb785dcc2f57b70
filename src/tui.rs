//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the latest session snapshot and turns key
//!   presses into `UserAction`s for the game loop
//! - `View`: owned copy of what the session exposed on the last
//!   `display_session` call, so drawing never borrows the session
//!
//! Input is polled with a short timeout; a timeout returns control to the
//! game loop, which ticks the shake timer and redraws.

use crate::game_state::{GameInterface, UserAction};
use crate::session::{Banner, KeyState, LetterSlot, Session};
use crate::theme::{Rgb, ThemeSummary};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const KEYS_PER_ROW: usize = 13;
const SHAKE_OFFSET: &str = "  ";

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const FAREWELL_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::ITALIC);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn key_colors(state: KeyState, over: bool) -> (Color, Color) {
    match state {
        KeyState::Correct => (Color::Green, Color::Black),
        KeyState::Wrong => (Color::Red, Color::White),
        KeyState::Unused if over => (Color::Black, Color::DarkGray),
        KeyState::Unused => (Color::DarkGray, Color::White),
    }
}

#[derive(Debug, Clone)]
struct Chip {
    name: String,
    background: Rgb,
    foreground: Rgb,
    lost: bool,
}

#[derive(Debug, Default)]
struct View {
    title: String,
    tagline: String,
    theme_name: String,
    chips: Vec<Chip>,
    slots: Vec<LetterSlot>,
    keys: Vec<(char, KeyState)>,
    banner: Banner,
    remaining_lives: usize,
    shaking: bool,
    over: bool,
}

impl View {
    fn from_session(session: &Session) -> Self {
        let theme = session.theme();
        Self {
            title: theme.title.clone(),
            tagline: theme.tagline.clone(),
            theme_name: theme.name.clone(),
            chips: session
                .chips()
                .map(|(token, lost)| Chip {
                    name: token.name.clone(),
                    background: token.background,
                    foreground: token.foreground,
                    lost,
                })
                .collect(),
            slots: session.letter_slots(),
            keys: session.keyboard(),
            banner: session.banner(),
            remaining_lives: session.remaining_lives(),
            shaking: session.is_shaking(),
            over: session.is_over(),
        }
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: &'a View,
    message: &'a str,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: View,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: View::default(),
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: &self.view,
            message: &self.message,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + tagline
                Constraint::Length(3), // Life chips
                Constraint::Length(3), // Word
                Constraint::Min(5),    // Status and messages
                Constraint::Length(4), // Keyboard
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.view);
        Self::render_chips(f, chunks[1], ctx.view);
        Self::render_word(f, chunks[2], ctx.view);
        Self::render_status(f, chunks[3], ctx);
        Self::render_keyboard(f, chunks[4], ctx.view);
        Self::render_instructions(f, chunks[5], ctx.view);
    }

    fn render_title(f: &mut Frame, area: Rect, view: &View) {
        let lines = vec![
            Line::from(Span::styled(view.title.to_uppercase(), HEADER_STYLE)),
            Line::from(view.tagline.as_str()),
        ];
        let title = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_chips(f: &mut Frame, area: Rect, view: &View) {
        let mut spans = Vec::new();
        for chip in &view.chips {
            let style = if chip.lost {
                Style::default()
                    .fg(Color::DarkGray)
                    .bg(Color::Black)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
                    .fg(rgb(chip.foreground))
                    .bg(rgb(chip.background))
            };
            spans.push(Span::styled(format!(" {} ", chip.name), style));
            spans.push(Span::raw(" "));
        }

        let title = format!(
            "{} - {} of {} lives left",
            view.theme_name,
            view.remaining_lives,
            view.chips.len()
        );
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, view: &View) {
        let mut spans = Vec::new();
        if view.shaking {
            spans.push(Span::raw(SHAKE_OFFSET));
        }
        for slot in &view.slots {
            let letter = if slot.revealed {
                slot.letter.to_ascii_uppercase()
            } else {
                ' '
            };
            let style = if slot.missed {
                Style::default().fg(Color::Red).bg(Color::DarkGray)
            } else {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }

        let border_style = if view.shaking {
            ERROR_STYLE
        } else {
            Style::default()
        };
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title("Word")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        match &ctx.view.banner {
            Banner::None => {}
            Banner::Farewell(text) => {
                lines.push(Line::from(Span::styled(text.as_str(), FAREWELL_STYLE)));
            }
            Banner::Won(text) => {
                lines.push(Line::from(Span::styled("YOU WIN!", SUCCESS_STYLE)));
                lines.push(Line::from(text.as_str()));
            }
            Banner::Lost(text) => {
                lines.push(Line::from(Span::styled("GAME OVER", LOSS_STYLE)));
                lines.push(Line::from(text.as_str()));
            }
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Status").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_keyboard(f: &mut Frame, area: Rect, view: &View) {
        let lines: Vec<Line> = view
            .keys
            .chunks(KEYS_PER_ROW)
            .map(|row| {
                let mut spans = Vec::new();
                for &(letter, state) in row {
                    let (bg, fg) = key_colors(state, view.over);
                    spans.push(Span::styled(
                        format!(" {} ", letter.to_ascii_uppercase()),
                        Style::default().fg(fg).bg(bg),
                    ));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("Keyboard").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, view: &View) {
        let text = if view.over {
            "ENTER: Play again | TAB: Next theme | ESC: Quit"
        } else {
            "Type a letter to guess | TAB: Next theme (new game) | ESC: Quit"
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            // No event available, let the game loop tick and redraw
            return Ok(None);
        }

        let event = event::read()?;
        match event {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    debug_log!(
                        "handle_input() - Ignoring non-Press key event: {:?}",
                        key.kind
                    );
                    return Ok(None);
                }

                // Filter out garbage that terminals emit on focus changes (alt-tab)
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!(
                        "handle_input() - Ignoring invalid character from escape sequence: {:?}",
                        c
                    );
                    return Ok(None);
                }

                Ok(self.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring non-key event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UserAction> {
        debug_log!(
            "handle_key() - code={:?}, modifiers={:?}",
            key.code,
            key.modifiers
        );

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier");
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_key() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Tab => {
                self.clear_messages();
                Some(UserAction::NextTheme)
            }
            KeyCode::Enter if self.view.over => {
                self.clear_messages();
                Some(UserAction::NewGame)
            }
            KeyCode::Enter => {
                self.error_message =
                    "Finish this round first, or press TAB to switch theme.".to_string();
                None
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                self.clear_messages();
                Some(UserAction::Guess(c.to_ascii_lowercase()))
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
                None
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn clear_messages(&mut self) {
        self.message.clear();
        self.error_message.clear();
    }
}

impl GameInterface for TuiInterface {
    fn display_session(&mut self, session: &Session) {
        self.view = View::from_session(session);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match self.handle_input() {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Terminal input failed, exiting: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_themes(&mut self, themes: &[ThemeSummary]) {
        let names: Vec<&str> = themes.iter().map(|t| t.name.as_str()).collect();
        self.message = format!("Themes: {}", names.join(", "));
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, session: &Session) {
        self.error_message.clear();
        self.message = format!(
            "New game: {} letters, {} lives",
            session.target_word().chars().count(),
            session.theme().lives()
        );
        self.view = View::from_session(session);
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
