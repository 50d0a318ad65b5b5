//! Runtime tuning for the extraction heuristics.
//!
//! Every knob has a default matching the engine's built-in constants, so
//! `Config::default()` and `Config::from_env()` with a clean environment
//! behave identically to calling the free functions directly.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::extractor::cards::DEFAULT_DESCRIPTION_WORDS;
use crate::extractor::lists::{ListScoring, MIN_CANDIDATE_ITEMS, MIN_LIST_SCORE};
use crate::extractor::section::DEFAULT_MIN_FRAGMENT_CHARS;

/// Environment variable names.
pub const ENV_MIN_LIST_SCORE: &str = "PAGESIFT_MIN_LIST_SCORE";
pub const ENV_MIN_LIST_ITEMS: &str = "PAGESIFT_MIN_LIST_ITEMS";
pub const ENV_CARD_DESCRIPTION_WORDS: &str = "PAGESIFT_CARD_DESCRIPTION_WORDS";
pub const ENV_MIN_FRAGMENT_CHARS: &str = "PAGESIFT_MIN_FRAGMENT_CHARS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    min_list_score: u32,
    min_list_items: usize,
    card_description_words: usize,
    min_fragment_chars: usize,
}

impl Config {
    pub fn new(
        min_list_score: u32,
        min_list_items: usize,
        card_description_words: usize,
        min_fragment_chars: usize,
    ) -> Self {
        Self {
            min_list_score,
            min_list_items,
            card_description_words,
            min_fragment_chars,
        }
    }

    /// Load from environment variables, falling back to defaults for any
    /// variable that is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            min_list_score: read_var(ENV_MIN_LIST_SCORE, MIN_LIST_SCORE)?,
            min_list_items: read_var(ENV_MIN_LIST_ITEMS, MIN_CANDIDATE_ITEMS)?,
            card_description_words: read_var(ENV_CARD_DESCRIPTION_WORDS, DEFAULT_DESCRIPTION_WORDS)?,
            min_fragment_chars: read_var(ENV_MIN_FRAGMENT_CHARS, DEFAULT_MIN_FRAGMENT_CHARS)?,
        })
    }

    /// Lowest score a scored list needs to be picked.
    pub fn min_list_score(&self) -> u32 {
        self.min_list_score
    }
    /// Fewest direct items a list needs to be scored at all.
    pub fn min_list_items(&self) -> usize {
        self.min_list_items
    }
    /// Word cap for card descriptions built from the card's full text.
    pub fn card_description_words(&self) -> usize {
        self.card_description_words
    }
    /// Section fragments this long or shorter are dropped.
    pub fn min_fragment_chars(&self) -> usize {
        self.min_fragment_chars
    }

    /// List scoring thresholds with this config's overrides applied.
    pub fn list_scoring(&self) -> ListScoring {
        ListScoring {
            min_items: self.min_list_items,
            min_score: self.min_list_score,
            ..ListScoring::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            MIN_LIST_SCORE,
            MIN_CANDIDATE_ITEMS,
            DEFAULT_DESCRIPTION_WORDS,
            DEFAULT_MIN_FRAGMENT_CHARS,
        )
    }
}

fn read_var<T>(field: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(field) {
        Ok(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            field,
            reason: format!("{raw:?}: {err}"),
        }),
        Err(_) => Ok(default),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
