use crate::error::GameError;
use crate::session::{GameStatus, GuessOutcome, Session};
use crate::theme::{ThemeRegistry, ThemeSummary};
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};
use std::time::Instant;

/// Input forwarded by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    NewGame,
    ChangeTheme(String),
    NextTheme,
    ListThemes,
    Exit,
}

/// Presentation seam. Implementations render what the session exposes and
/// translate user input into [`UserAction`]s; they hold no game rules.
pub trait GameInterface {
    fn display_session(&mut self, session: &Session);
    /// `None` means no action yet (invalid input, or an input poll timed out).
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_error(&mut self, message: &str);
    fn display_themes(&mut self, themes: &[ThemeSummary]);
    fn display_new_game_message(&mut self, session: &Session);
    fn display_exit_message(&mut self);
}

/// Rounds finished before the player quit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTally {
    pub won: usize,
    pub lost: usize,
}

impl GameTally {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won => self.won += 1,
            GameStatus::Lost => self.lost += 1,
            GameStatus::Active => {}
        }
    }
}

/// Run rounds until the interface asks to exit.
///
/// The loop owns the one live [`Session`]; theme changes go through `registry`
/// and always start a fresh round.
pub fn game_loop<I: GameInterface + ?Sized>(
    bank: &WordBank,
    registry: &ThemeRegistry,
    theme_id: &str,
    interface: &mut I,
) -> GameTally {
    let mut tally = GameTally::default();
    let Some(theme) = registry.get_or_default(theme_id) else {
        interface.display_error("No themes are configured.");
        return tally;
    };
    if bank.is_empty() {
        interface.display_error(&GameError::EmptyBank.to_string());
    }

    let mut session = Session::new(bank, theme);
    interface.display_new_game_message(&session);

    loop {
        session.tick(Instant::now());
        interface.display_session(&session);

        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::Guess(letter) => {
                let was_over = session.is_over();
                match session.guess(letter) {
                    Ok(GuessOutcome::Repeated) => {
                        interface.display_error(&format!("You already tried '{letter}'."));
                    }
                    Ok(GuessOutcome::Ignored) => {
                        interface.display_error("This round is over. Start a new game.");
                    }
                    Ok(GuessOutcome::Correct | GuessOutcome::Wrong) => {
                        if !was_over && session.is_over() {
                            tally.record(session.status());
                        }
                    }
                    Err(e) => interface.display_error(&e.to_string()),
                }
            }
            UserAction::NewGame => {
                session.reset(None);
                interface.display_new_game_message(&session);
            }
            UserAction::ChangeTheme(id) => match registry.get(&id) {
                Ok(theme) => {
                    info_log!("Switching theme to '{}'", theme.id);
                    session.reset(Some(theme));
                    interface.display_new_game_message(&session);
                }
                Err(e) => {
                    log::warn!("{e}");
                    interface.display_error(&e.to_string());
                }
            },
            UserAction::NextTheme => {
                if let Some(theme) = registry.next_after(&session.theme().id) {
                    session.reset(Some(theme));
                    interface.display_new_game_message(&session);
                }
            }
            UserAction::ListThemes => interface.display_themes(&registry.list_themes()),
        }
    }

    log::info!("Leaving after {} won, {} lost", tally.won, tally.lost);
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Feeds scripted actions and records what the loop asked it to show.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        errors: Vec<String>,
        themes_shown: Vec<String>,
        new_games: Vec<String>,
        renders: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_session(&mut self, _session: &Session) {
            self.renders += 1;
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn display_themes(&mut self, themes: &[ThemeSummary]) {
            self.themes_shown = themes.iter().map(|t| t.id.clone()).collect();
        }

        fn display_new_game_message(&mut self, session: &Session) {
            self.new_games.push(session.theme().id.clone());
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn guesses(word: &str) -> Vec<Option<UserAction>> {
        word.chars().map(|c| Some(UserAction::Guess(c))).collect()
    }

    #[test]
    fn test_immediate_exit() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::Exit)]);

        let tally = game_loop(&bank, &registry, "languages", &mut ui);
        assert_eq!(tally, GameTally::default());
        assert!(ui.exited);
        assert_eq!(ui.new_games, vec!["languages"]);
    }

    #[test]
    fn test_win_then_new_game_then_loss() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut script = guesses("cat");
        script.push(Some(UserAction::NewGame));
        script.extend(guesses("bdefghijkl"));

        let mut ui = ScriptedInterface::new(script);
        let tally = game_loop(&bank, &registry, "languages", &mut ui);
        assert_eq!(tally, GameTally { won: 1, lost: 1 });
        // the ninth wrong letter ends the round; the tenth is ignored
        assert_eq!(ui.errors, vec!["This round is over. Start a new game."]);
    }

    #[test]
    fn test_none_actions_keep_looping() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![None, None, Some(UserAction::Exit)]);

        game_loop(&bank, &registry, "archery", &mut ui);
        assert_eq!(ui.renders, 3);
    }

    #[test]
    fn test_invalid_and_repeated_guesses_report_errors() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![
            Some(UserAction::Guess('1')),
            Some(UserAction::Guess('x')),
            Some(UserAction::Guess('x')),
        ]);

        game_loop(&bank, &registry, "languages", &mut ui);
        assert_eq!(
            ui.errors,
            vec![
                "'1' is not a letter between a and z".to_string(),
                "You already tried 'x'.".to_string(),
            ]
        );
    }

    #[test]
    fn test_theme_changes() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![
            Some(UserAction::ChangeTheme("archery".to_string())),
            Some(UserAction::ChangeTheme("pirates".to_string())),
            Some(UserAction::NextTheme),
            Some(UserAction::ListThemes),
        ]);

        game_loop(&bank, &registry, "languages", &mut ui);
        assert_eq!(ui.new_games, vec!["languages", "archery", "languages"]);
        assert_eq!(ui.errors, vec!["unknown theme 'pirates'"]);
        assert_eq!(ui.themes_shown, vec!["languages", "archery"]);
    }

    #[test]
    fn test_unknown_start_theme_falls_back() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![]);

        game_loop(&bank, &registry, "pirates", &mut ui);
        assert_eq!(ui.new_games, vec!["languages"]);
    }

    #[test]
    fn test_empty_bank_is_reported_not_fatal() {
        let bank = WordBank::default();
        let registry = ThemeRegistry::builtin();
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::NewGame)]);

        game_loop(&bank, &registry, "languages", &mut ui);
        assert_eq!(ui.errors, vec!["the word bank is empty"]);
        assert!(ui.exited);
    }
}
