use crate::error::{GameError, Result};
use chrono::{DateTime, Local};
use itertools::Itertools;
use std::fmt;
use std::time::Duration;

/// Shown in the revealed pattern for letters not yet guessed
pub const PLACEHOLDER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won,
    /// Either the mistake allowance ran out or the player gave up
    Lost,
}

/// One round of hangman, from secret-word selection to win or loss
#[derive(Clone, Debug)]
pub struct GameSession {
    secret: Vec<char>,
    revealed: Vec<char>,
    guesses: Vec<char>,
    wrong_guesses: usize,
    outcome: Outcome,
    started_at: DateTime<Local>,
    ended_at: Option<DateTime<Local>>,
    pub(crate) archived: bool,
}

impl GameSession {
    pub fn new(secret_word: &str) -> Self {
        let secret: Vec<char> = secret_word.chars().map(to_upper).collect();
        let revealed = vec![PLACEHOLDER; secret.len()];

        Self {
            secret,
            revealed,
            guesses: vec![],
            wrong_guesses: 0,
            outcome: Outcome::InProgress,
            started_at: Local::now(),
            ended_at: None,
            archived: false,
        }
    }

    pub fn secret_word(&self) -> String {
        self.secret.iter().collect()
    }

    pub fn pattern(&self) -> String {
        self.revealed.iter().collect()
    }

    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    pub fn has_guess_been_made(&self) -> bool {
        !self.guesses.is_empty()
    }

    pub fn has_guessed(&self, letter: char) -> bool {
        self.guesses.contains(&to_upper(letter))
    }

    pub fn wrong_guesses(&self) -> usize {
        self.wrong_guesses
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_in_progress(&self) -> bool {
        self.outcome == Outcome::InProgress
    }

    pub fn is_word_found(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Local>> {
        self.ended_at
    }

    /// True iff `letter` occurs anywhere in the secret word
    pub fn is_correct_guess(&self, letter: char) -> bool {
        self.secret.contains(&to_upper(letter))
    }

    /// Applies a guess and returns the revealed pattern afterwards.
    ///
    /// Finished rounds are left untouched. Repeated letters are recorded again;
    /// a guess only counts as wrong when the letter is absent from the word.
    pub fn guess(&mut self, letter: char) -> String {
        if !self.is_in_progress() {
            return self.pattern();
        }

        let letter = to_upper(letter);
        self.guesses.push(letter);

        if self.is_correct_guess(letter) {
            for (slot, &c) in self.revealed.iter_mut().zip(self.secret.iter()) {
                if c == letter {
                    *slot = letter;
                }
            }
        } else {
            self.wrong_guesses += 1;
        }

        if self.revealed == self.secret {
            self.finish(Outcome::Won);
        }

        self.pattern()
    }

    /// Ends the round without finding the word. Has no effect on a finished round.
    pub fn give_up(&mut self) {
        if self.is_in_progress() {
            self.finish(Outcome::Lost);
        }
    }

    /// Time from start to finish, or `None` while the round is still live
    pub fn elapsed(&self) -> Option<Duration> {
        self.ended_at
            .map(|end| (end - self.started_at).to_std().unwrap_or_default())
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.ended_at = Some(Local::now());
    }

    #[cfg(test)]
    pub(crate) fn set_times(&mut self, started_at: DateTime<Local>, ended_at: DateTime<Local>) {
        self.started_at = started_at;
        self.ended_at = Some(ended_at);
    }
}

impl fmt::Display for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self
            .elapsed()
            .map_or_else(|| String::from("-:--:--"), format_duration);

        write!(
            f,
            "{} ({}) - {}",
            self.secret_word(),
            time,
            self.guesses.iter().join(", ")
        )
    }
}

/// Formats as `H:MM:SS`, hours unpadded
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Validates raw player input as a single letter.
///
/// An empty `alphabet` accepts any alphabetic character.
pub fn parse_guess(input: &str, alphabet: &[char]) -> Result<char> {
    let mut chars = input.trim().chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => to_upper(c),
        _ => return Err(GameError::InvalidGuess(input.to_string())),
    };

    if !alphabet.is_empty() && !alphabet.contains(&letter) {
        return Err(GameError::InvalidGuess(input.to_string()));
    }

    Ok(letter)
}

/// Single-char uppercase; characters whose uppercase form expands (e.g. ß) are kept as is
pub(crate) fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_session() {
        let game = GameSession::new("CRANE");

        assert_eq!(game.secret_word(), "CRANE");
        assert_eq!(game.pattern(), "_____");
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.wrong_guesses(), 0);
        assert!(!game.has_guess_been_made());
        assert!(game.ended_at().is_none());
        assert!(game.elapsed().is_none());
    }

    #[test]
    fn test_new_session_uppercases() {
        let game = GameSession::new("crane");
        assert_eq!(game.secret_word(), "CRANE");
    }

    #[test]
    fn test_guess_reveals_in_order() {
        let mut game = GameSession::new("CRANE");

        assert_eq!(game.guess('C'), "C____");
        assert_eq!(game.guess('R'), "CR___");
        assert_eq!(game.guess('A'), "CRA__");
        assert_eq!(game.guess('N'), "CRAN_");
        assert_eq!(game.guess('E'), "CRANE");

        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(game.wrong_guesses(), 0);
        assert!(game.ended_at().is_some());
        assert!(game.elapsed().is_some());
    }

    #[test]
    fn test_guess_lowercase_letter() {
        let mut game = GameSession::new("CRANE");
        assert_eq!(game.guess('a'), "__A__");
        assert_eq!(game.guesses(), &['A']);
    }

    #[test]
    fn test_wrong_guesses_counted() {
        let mut game = GameSession::new("CRANE");

        for c in ['Z', 'X', 'Q', 'W', 'V', 'T'] {
            assert_eq!(game.guess(c), "_____");
        }

        assert_eq!(game.wrong_guesses(), 6);
        // the session itself has no allowance; the manager decides when it is lost
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_repeated_correct_guess_is_not_wrong() {
        let mut game = GameSession::new("CRANE");

        game.guess('C');
        game.guess('C');

        assert_eq!(game.wrong_guesses(), 0);
        assert_eq!(game.guesses(), &['C', 'C']);
    }

    #[test]
    fn test_repeated_wrong_guess_counts_each_time() {
        let mut game = GameSession::new("CRANE");

        game.guess('Z');
        game.guess('Z');

        assert_eq!(game.wrong_guesses(), 2);
        assert_eq!(game.num_guesses(), 2);
    }

    #[test]
    fn test_guess_after_win_is_noop() {
        let mut game = GameSession::new("AB");
        game.guess('A');
        game.guess('B');
        assert!(game.is_word_found());

        assert_eq!(game.guess('Z'), "AB");
        assert_eq!(game.num_guesses(), 2);
        assert_eq!(game.wrong_guesses(), 0);
    }

    #[test]
    fn test_guess_after_give_up_is_noop() {
        let mut game = GameSession::new("CRANE");
        game.guess('C');
        game.give_up();

        assert_eq!(game.guess('R'), "C____");
        assert_eq!(game.num_guesses(), 1);
    }

    #[test]
    fn test_is_correct_guess() {
        let game = GameSession::new("CRANE");

        assert!(game.is_correct_guess('C'));
        assert!(game.is_correct_guess('e'));
        assert!(!game.is_correct_guess('Z'));
        assert!(!game.has_guess_been_made());
    }

    #[test]
    fn test_give_up() {
        let mut game = GameSession::new("CRANE");
        game.give_up();

        assert_eq!(game.outcome(), Outcome::Lost);
        assert!(!game.is_word_found());
        assert!(game.ended_at().is_some());
    }

    #[test]
    fn test_give_up_after_win_keeps_win() {
        let mut game = GameSession::new("A");
        game.guess('A');
        let ended = game.ended_at();

        game.give_up();

        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(game.ended_at(), ended);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "0:01:05");
        assert_eq!(format_duration(Duration::from_secs(3600 * 12 + 61)), "12:01:01");
        assert_eq!(format_duration(Duration::from_millis(9_999)), "0:00:09");
    }

    #[test]
    fn test_summary() {
        let mut game = GameSession::new("CRANE");
        for c in "CRXANE".chars() {
            game.guess(c);
        }
        let start = game.started_at();
        game.set_times(start, start + chrono::Duration::seconds(75));

        assert_eq!(game.summary(), "CRANE (0:01:15) - C, R, X, A, N, E");
    }

    #[test]
    fn test_summary_live_and_empty() {
        let game = GameSession::new("CRANE");
        assert_eq!(game.summary(), "CRANE (-:--:--) - ");
    }

    #[test]
    fn test_unicode_secret() {
        let mut game = GameSession::new("niño");
        assert_eq!(game.pattern(), "____");
        assert_eq!(game.guess('ñ'), "__Ñ_");
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(parse_guess("a", &[]).unwrap(), 'A');
        assert_eq!(parse_guess(" q ", &[]).unwrap(), 'Q');
        assert_matches!(parse_guess("", &[]), Err(GameError::InvalidGuess(_)));
        assert_matches!(parse_guess("ab", &[]), Err(GameError::InvalidGuess(_)));
        assert_matches!(parse_guess("7", &[]), Err(GameError::InvalidGuess(_)));
    }

    #[test]
    fn test_parse_guess_with_alphabet() {
        let alphabet: Vec<char> = "ABC".chars().collect();
        assert_eq!(parse_guess("b", &alphabet).unwrap(), 'B');
        assert_matches!(parse_guess("z", &alphabet), Err(GameError::InvalidGuess(s)) if s == "z");
    }
}
