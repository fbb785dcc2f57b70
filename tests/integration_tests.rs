// Integration tests for the hangman game
// These tests drive complete games through the plain interface

use hangman::cli::CliInterface;
use hangman::*;
use std::io::{Cursor, Write};

fn play(bank: &WordBank, theme: &str, input: &str) -> (GameTally, String) {
    let registry = ThemeRegistry::builtin();
    let mut interface = CliInterface::new(Cursor::new(input.to_string()), Vec::new());
    let tally = game_loop(bank, &registry, theme, &mut interface);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (tally, output)
}

fn cat_bank() -> WordBank {
    WordBank::new(vec!["cat".to_string()])
}

#[test]
fn test_winning_game() {
    let (tally, output) = play(&cat_bank(), "languages", "c\na\nt\nexit\n");

    assert_eq!(tally, GameTally { won: 1, lost: 0 });
    assert!(output.contains("== Assembly: Endgame =="));
    assert!(output.contains("Word:  C _ _"));
    assert!(output.contains("Word:  C A T"));
    assert!(output.contains("YOU WIN!"));
    assert!(output.contains("The programming world is safe."));
    assert!(output.trim_end().ends_with("Exiting."));
}

#[test]
fn test_losing_game_shows_farewells_and_word() {
    let input = "b\nd\ne\nf\ng\nh\ni\nj\n";
    let (tally, output) = play(&cat_bank(), "archery", input);

    assert_eq!(tally, GameTally { won: 0, lost: 1 });
    assert!(output.contains("You missed! Goodbye, Nock!"));
    assert!(output.contains("You missed! Goodbye, Recurve!"));
    assert!(output.contains("GAME OVER"));
    assert!(output.contains("You ran out of arrows!"));
    assert!(output.contains("The word was: CAT"));
    assert!(output.contains("Word:  C A T"));
}

#[test]
fn test_guesses_after_game_over_are_ignored() {
    let input = "b\nd\ne\nf\ng\nh\ni\nj\nc\n";
    let (tally, output) = play(&cat_bank(), "archery", input);

    assert_eq!(tally.lost, 1);
    assert!(output.contains("This round is over. Start a new game."));
    assert!(!output.contains("YOU WIN!"));
}

#[test]
fn test_multiple_rounds_with_new_game() {
    let input = "c\na\nt\nnew\nC\nA\nT\nexit\n";
    let (tally, output) = play(&cat_bank(), "languages", input);

    assert_eq!(tally, GameTally { won: 2, lost: 0 });
    assert_eq!(output.matches("New game (Programming Languages)").count(), 2);
}

#[test]
fn test_switching_theme_restarts_round() {
    let input = "x\ntheme archery\nthemes\ntheme pirates\nexit\n";
    let (_, output) = play(&cat_bank(), "languages", input);

    assert!(output.contains("HTML"));
    assert!(output.contains("New game (Archery Terms). The word has 3 letters; you have 8 lives."));
    assert!(output.contains("archery      Archery Terms"));
    assert!(output.contains("unknown theme 'pirates'"));
}

#[test]
fn test_invalid_and_repeated_input() {
    let input = "7\nhello\nx\nx\nexit\n";
    let (tally, output) = play(&cat_bank(), "languages", input);

    assert_eq!(tally, GameTally::default());
    assert!(output.contains("'7' is not a letter."));
    assert!(output.contains("Guess one letter at a time"));
    assert!(output.contains("You already tried 'x'."));
    assert!(output.contains("Guessed: x"));
}

#[test]
fn test_end_of_input_exits() {
    let (tally, output) = play(&cat_bank(), "languages", "c\n");
    assert_eq!(tally, GameTally::default());
    assert!(output.contains("Exiting."));
}

#[test]
fn test_empty_bank_does_not_crash() {
    let (_, output) = play(&WordBank::default(), "languages", "a\nexit\n");
    assert!(output.contains("the word bank is empty"));
    assert!(output.contains("Exiting."));
}

#[test]
fn test_word_list_file_to_game() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Dog").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "not a word").unwrap();
    writeln!(file, "d0g").unwrap();

    let bank = WordBank::from_file(file.path()).unwrap();
    assert_eq!(bank.words(), ["dog".to_string()]);

    let (tally, _) = play(&bank, "languages", "d\no\ng\n");
    assert_eq!(tally.won, 1);
}

#[test]
fn test_missing_word_list_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(WordBank::from_file(dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_session_properties_over_random_words() {
    let bank = WordBank::embedded();
    let registry = ThemeRegistry::builtin();
    let theme = registry.get("languages").unwrap();

    for _ in 0..50 {
        let mut session = Session::new(&bank, theme);
        assert!(bank.contains(session.target_word()));
        assert!(session.guessed_letters().is_empty());

        let mut previous = 0;
        for letter in "etaoinshrdlucmfwypvbgkjqxz".chars() {
            let was_over = session.is_over();
            let before = session.guessed_letters().clone();
            let result = session.guess(letter).unwrap();

            if was_over {
                assert_eq!(result, GuessOutcome::Ignored);
                assert_eq!(session.guessed_letters(), &before);
                continue;
            }
            assert_eq!(session.guessed_letters().len(), previous + 1);
            previous += 1;

            let outcome = evaluate(session.target_word(), session.guessed_letters(), theme.lives());
            assert_eq!(session.outcome(), outcome);
            assert_eq!(
                session.is_won(),
                session
                    .target_word()
                    .chars()
                    .all(|c| session.guessed_letters().contains(&c))
            );
            assert_eq!(session.is_lost(), session.wrong_guess_count() >= theme.lives());
        }
        assert!(session.is_over());
    }
}
