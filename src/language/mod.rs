use crate::dictionary::Dictionary;
use crate::error::{GameError, Result};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};

static LANG_DIR: Dir = include_dir!("src/lang");

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    English,
    Spanish,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 2] = [SupportedLanguage::English, SupportedLanguage::Spanish];

    pub fn as_pack(&self) -> Result<LanguagePack> {
        LanguagePack::load(&self.to_string().to_lowercase())
    }

    /// The language after this one, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Interface text for one language
#[derive(Deserialize, Clone, Debug)]
pub struct UiText {
    pub title: String,
    pub guess_label: String,
    pub guesses_header: String,
    pub win: String,
    pub lose: String,
    pub wrong: String,
    pub stats_title: String,
    pub games_played: String,
    pub wins: String,
    pub losses: String,
    pub fewest_guesses: String,
    pub fastest_win: String,
    pub results: String,
    pub lifetime: String,
    pub last_recorded: String,
    pub none: String,
    pub help_title: String,
    pub help: Vec<String>,
}

/// Everything a language contributes: its alphabet, its words and its interface text
#[derive(Deserialize, Clone, Debug)]
pub struct LanguagePack {
    pub name: String,
    pub alphabet: String,
    pub text: UiText,
    /// Newline-delimited word list, read from the sibling `.txt` file
    #[serde(skip)]
    pub word_list: String,
}

impl LanguagePack {
    pub fn load(file_stem: &str) -> Result<Self> {
        let mut pack: LanguagePack = serde_json::from_str(read_embedded(file_stem, "json")?)?;
        pack.word_list = read_embedded(file_stem, "txt")?.to_string();
        Ok(pack)
    }

    pub fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }

    /// The bundled words, limited to what can be typed with this alphabet
    pub fn dictionary(&self) -> Result<Dictionary> {
        Dictionary::load(&self.word_list)?.restricted_to(&self.alphabet_chars())
    }
}

fn read_embedded(file_stem: &str, ext: &str) -> Result<&'static str> {
    LANG_DIR
        .get_file(format!("{file_stem}.{ext}"))
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| GameError::UnknownLanguage(file_stem.to_string()))
}
