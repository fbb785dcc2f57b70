use crate::error::{GameError, Result};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase()) {
        Some(word)
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Immutable list of candidate target words shared by every theme.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    words: Vec<String>,
}

impl WordBank {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn embedded() -> Self {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        load_wordbank_from_file(path).map(Self::new)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Pick a word uniformly at random using the thread-local generator.
    pub fn sample(&self) -> Result<String> {
        self.sample_with(&mut rand::rng())
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String> {
        if self.words.is_empty() {
            return Err(GameError::EmptyBank);
        }
        let index = rng.random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }

    /// Like [`WordBank::sample_with`], but an empty bank yields the empty word
    /// and a warning instead of an error.
    pub fn sample_or_default<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.sample_with(rng) {
            Ok(word) => word,
            Err(e) => {
                log::warn!("{e}; using an empty placeholder word");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_load_from_str_normalizes_and_filters() {
        let words = load_wordbank_from_str("  Apple \nbanana\n\nfoo bar\nc4t\nKIWI\n");
        assert_eq!(words, vec!["apple", "banana", "kiwi"]);
    }

    #[test]
    fn test_embedded_bank_is_usable() {
        let bank = WordBank::embedded();
        assert!(!bank.is_empty());
        assert!(
            bank.words()
                .iter()
                .all(|w| !w.is_empty() && w.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    #[test]
    fn test_sample_single_word() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        assert_eq!(bank.sample().unwrap(), "cat");
    }

    #[test]
    fn test_sample_empty_bank_errors() {
        let bank = WordBank::default();
        assert_eq!(bank.sample(), Err(GameError::EmptyBank));
    }

    #[test]
    fn test_sample_or_default_on_empty_bank() {
        let bank = WordBank::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(bank.sample_or_default(&mut rng), "");
    }

    #[test]
    fn test_sample_reaches_every_word() {
        let bank = WordBank::new(vec!["one".into(), "two".into(), "three".into()]);
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<String> = (0..200)
            .map(|_| bank.sample_with(&mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_contains() {
        let bank = WordBank::new(vec!["cat".to_string()]);
        assert!(bank.contains("cat"));
        assert!(!bank.contains("dog"));
    }
}
