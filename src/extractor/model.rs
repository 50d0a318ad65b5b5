use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Result shape shared by every extraction entry point.
///
/// Absence and advice are values, not errors: `NotFound` carries the reason a
/// keyword search came back empty, `Info` carries guidance from a detector
/// that ran but could not produce anything useful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    NotFound(String),
    Info(String),
    Single(T),
    Many(Vec<T>),
}

impl<T> Outcome<T> {
    /// Flatten a match list: none becomes `NotFound`, one becomes `Single`.
    pub fn from_matches(mut matches: Vec<T>, not_found: impl FnOnce() -> String) -> Self {
        match matches.len() {
            0 => Self::NotFound(not_found()),
            1 => Self::Single(matches.remove(0)),
            _ => Self::Many(matches),
        }
    }

    /// Record sequences never flatten; an empty set becomes `Info`.
    pub fn records(records: Vec<T>, info: impl FnOnce() -> String) -> Self {
        if records.is_empty() {
            Self::Info(info())
        } else {
            Self::Many(records)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Single(_) | Self::Many(_))
    }

    /// Reason text for `NotFound` and `Info`.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound(msg) | Self::Info(msg) => Some(msg),
            Self::Single(_) | Self::Many(_) => None,
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Single(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
            Self::NotFound(_) | Self::Info(_) => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Single(item) => vec![item],
            Self::Many(items) => items,
            Self::NotFound(_) | Self::Info(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Outcome<U> {
        match self {
            Self::NotFound(msg) => Outcome::NotFound(msg),
            Self::Info(msg) => Outcome::Info(msg),
            Self::Single(item) => Outcome::Single(f(item)),
            Self::Many(items) => Outcome::Many(items.into_iter().map(f).collect()),
        }
    }
}

/// One entry of a list-style result section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub index: usize,
    pub title: String,
    pub text: String,
    pub link: String,
    pub status: String,
}

/// One card-shaped record (tile, search hit, product).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub text: String,
    pub image: String,
    pub link: String,
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned()
}
