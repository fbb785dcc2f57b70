use hangman::cli::{CliInterface, parse_cli};
use hangman::logging::init_logging;
use hangman::theme::ThemeRegistry;
use hangman::tui::TuiInterface;
use hangman::wordbank::WordBank;
use hangman::game_loop;
use std::io;

fn main() {
    let cli = parse_cli();

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Logging disabled: {e}");
    }

    let registry = ThemeRegistry::builtin();
    if cli.list_themes {
        for theme in registry.list_themes() {
            println!("{:<12} {}", theme.id, theme.name);
        }
        return;
    }

    let bank = match &cli.wordbank_path {
        Some(path) => match WordBank::from_file(path) {
            Ok(bank) => bank,
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        },
        None => WordBank::embedded(),
    };
    log::info!("Loaded {} words", bank.len());

    let tally = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&bank, &registry, &cli.theme, &mut interface)
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&bank, &registry, &cli.theme, &mut interface),
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return;
            }
        }
    };

    println!("Thanks for playing! Won {}, lost {}.", tally.won, tally.lost);
}
