use crate::error::{GameError, Result};
use crate::game::to_upper;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// The words of one language, normalised to uppercase.
///
/// Every word is a legal word of the language, but only those without a
/// repeated letter are drawn as secret words.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    words: Vec<String>,
    candidates: Vec<String>,
}

impl Dictionary {
    /// Builds a dictionary from a newline-delimited word list.
    ///
    /// Blank lines are skipped, as are words holding anything but letters
    /// (`T-REX`, `ICE CREAM`), since those could never be guessed in full.
    /// Fails when nothing usable remains, or when no word qualifies as a
    /// secret word.
    pub fn load(raw_word_list: &str) -> Result<Self> {
        let mut skipped = 0;
        let words: Vec<String> = raw_word_list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| {
                let letters_only = line.chars().all(char::is_alphabetic);
                if !letters_only {
                    skipped += 1;
                }
                letters_only
            })
            .map(|line| line.chars().map(to_upper).collect())
            .collect();

        if skipped > 0 {
            tracing::warn!(skipped, "skipped words with non-letter characters");
        }

        Self::from_words(words)
    }

    /// Drops every word using a letter the alphabet lacks.
    ///
    /// A custom list may hold `CAFÉ` while the keyboard only offers `A` to
    /// `Z`; such a word cannot be finished and is not kept.
    pub fn restricted_to(self, alphabet: &[char]) -> Result<Self> {
        let before = self.words.len();
        let words: Vec<String> = self
            .words
            .into_iter()
            .filter(|word| word.chars().all(|c| alphabet.contains(&c)))
            .collect();

        if words.len() < before {
            tracing::warn!(
                skipped = before - words.len(),
                "skipped words with letters outside the alphabet"
            );
        }

        Self::from_words(words)
    }

    fn from_words(words: Vec<String>) -> Result<Self> {
        if words.is_empty() {
            return Err(GameError::EmptyDictionary);
        }

        let candidates: Vec<String> = words
            .iter()
            .filter(|word| !has_repeating_letters(word))
            .cloned()
            .collect();

        if candidates.is_empty() {
            return Err(GameError::NoCandidateWords);
        }

        Ok(Self { words, candidates })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Words eligible to be a secret word
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniformly picks a secret word from the candidates
    pub fn choose_secret<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.candidates.choose(rng).map(String::as_str)
    }
}

/// True if any letter occurs more than once, ignoring case.
///
/// `HELLO` repeats `L`; `GREAT` has no repeats.
pub fn has_repeating_letters(word: &str) -> bool {
    let mut seen = HashSet::new();
    word.chars().map(to_upper).any(|c| !seen.insert(c))
}
