//! Heuristic content extraction from parsed HTML pages.
//!
//! Each submodule owns one locator or detector and exposes free functions
//! taking a [`DocumentView`]. [`Extractor`] bundles a [`Config`] with a page
//! so callers get tuned thresholds without threading them through.

pub mod cards;
pub mod document;
pub mod errors;
pub mod export;
pub mod links;
pub mod lists;
pub mod media;
pub mod model;
pub mod section;
pub mod selector;
pub mod text;
pub mod urls;

#[cfg(test)]
mod tests;

pub use document::DocumentView;
pub use errors::ExtractError;
pub use model::{CardRecord, ListRecord, Outcome};

use crate::config::Config;

/// A parsed page plus the tuning used by every operation on it.
#[derive(Debug)]
pub struct Extractor {
    doc: DocumentView,
    config: Config,
}

impl Extractor {
    pub fn new(doc: DocumentView, config: Config) -> Self {
        Self { doc, config }
    }

    /// Parse `html` against `base_url` with default tuning.
    pub fn parse(html: &str, base_url: &str) -> Result<Self, ExtractError> {
        Ok(Self::new(DocumentView::parse(html, base_url)?, Config::default()))
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn document(&self) -> &DocumentView {
        &self.doc
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn find_text(&self, keyword: &str, case_sensitive: bool) -> Outcome<String> {
        text::find_text(&self.doc, keyword, case_sensitive)
    }

    pub fn list_images(&self) -> Vec<String> {
        media::list_images(&self.doc)
    }

    pub fn find_images_by_keyword(&self, keyword: &str) -> Vec<String> {
        media::find_images_by_keyword(&self.doc, keyword)
    }

    pub fn find_links_by_keyword(&self, keyword: &str) -> Outcome<String> {
        links::find_links_by_keyword(&self.doc, keyword)
    }

    pub fn extract_section(&self, heading_keyword: &str) -> Outcome<String> {
        section::extract_section_with(&self.doc, heading_keyword, self.config.min_fragment_chars())
    }

    pub fn extract_list_records(
        &self,
        section_name: Option<&str>,
        list_pattern: Option<&str>,
    ) -> Result<Outcome<ListRecord>, ExtractError> {
        lists::extract_list_records_with(
            &self.doc,
            section_name,
            list_pattern,
            &self.config.list_scoring(),
        )
    }

    pub fn extract_card_records(&self, card_pattern: Option<&str>) -> Result<Outcome<CardRecord>, ExtractError> {
        cards::extract_card_records_with(&self.doc, card_pattern, self.config.card_description_words())
    }

    pub fn texts_by_pattern(&self, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
        selector::texts_by_pattern(&self.doc, pattern)
    }

    pub fn images_by_pattern(&self, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
        selector::images_by_pattern(&self.doc, pattern)
    }

    pub fn links_by_pattern(&self, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
        selector::links_by_pattern(&self.doc, pattern)
    }
}
