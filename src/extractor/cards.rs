//! Card-shaped record detection (tiles, search hits, product boxes).

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, instrument};
use url::Url;

use crate::extractor::document::{
    DocumentView, attr_of, first_descendant, first_link, is_tag, text_of,
};
use crate::extractor::errors::ExtractError;
use crate::extractor::media::resolve_image;
use crate::extractor::model::{CardRecord, Outcome};
use crate::extractor::urls::{is_script_href, normalize_url};

pub const NO_CARDS_MESSAGE: &str =
    "No cards found. Try specifying a custom CSS selector for the card elements.";
pub const EMPTY_CARDS_MESSAGE: &str = "Found card elements but could not extract data from them.";

pub const DEFAULT_DESCRIPTION_WORDS: usize = 50;
/// A fallback title must be shorter than this.
const MAX_FALLBACK_TITLE_CHARS: usize = 100;

const CARD_PATTERNS: [&str; 16] = [
    ".card",
    ".result-card",
    ".item-card",
    ".card-item",
    "[class*=\"card\"]",
    ".result-item",
    ".item",
    "[class*=\"result\"]",
    ".product-card",
    ".product-item",
    "[data-testid*=\"card\"]",
    "[class*=\"grid-item\"]",
    ".search-result",
    "[class*=\"search-result\"]",
    "article",
    "[role=\"article\"]",
];

const TITLE_PATTERNS: [&str; 9] = [
    "h1",
    "h2",
    "h3",
    "h4",
    ".title",
    "[class*=\"title\"]",
    "[class*=\"name\"]",
    ".card-title",
    ".result-title",
];

const DESCRIPTION_PATTERNS: [&str; 8] = [
    ".description",
    ".desc",
    "[class*=\"desc\"]",
    "p",
    ".text",
    "[class*=\"text\"]",
    ".summary",
    "[class*=\"summary\"]",
];

fn compile(patterns: &[&'static str]) -> Vec<(&'static str, Selector)> {
    patterns
        .iter()
        .map(|pattern| (*pattern, Selector::parse(pattern).unwrap()))
        .collect()
}

static CARD_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> =
    LazyLock::new(|| compile(&CARD_PATTERNS));
static TITLE_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> =
    LazyLock::new(|| compile(&TITLE_PATTERNS));
static DESCRIPTION_SELECTORS: LazyLock<Vec<(&'static str, Selector)>> =
    LazyLock::new(|| compile(&DESCRIPTION_PATTERNS));

/// Build one card record. The returned record is unnumbered.
pub fn extract_card(card: ElementRef<'_>, base_url: &Url, description_words: usize) -> CardRecord {
    let mut record = CardRecord::default();

    if let Some(title) = TITLE_SELECTORS
        .iter()
        .find_map(|(_, selector)| card.select(selector).next())
    {
        record.title = text_of(title);
    }

    let link = first_link(card).or_else(|| {
        (is_tag(card, &["a"]) && attr_of(card, "href").is_some_and(|h| !h.is_empty())).then_some(card)
    });
    if let Some(href) = link
        .and_then(|link| attr_of(link, "href"))
        .filter(|href| !is_script_href(href))
    {
        record.link = normalize_url(href, base_url);
    }

    if let Some(img) = first_descendant(card, &["img"]) {
        record.image = resolve_image(img, base_url).unwrap_or_default();
    }

    let description = DESCRIPTION_SELECTORS.iter().find_map(|(_, selector)| {
        card.select(selector)
            .next()
            .map(text_of)
            .filter(|text| !text.is_empty())
    });
    match description {
        Some(description) => {
            record.text = description.clone();
            record.description = description;
        }
        None => {
            let mut all_text = text_of(card);
            if !record.title.is_empty() {
                all_text = all_text.replacen(&record.title, "", 1);
            }
            let words: Vec<&str> = all_text.split_whitespace().collect();
            record.description = words
                .iter()
                .take(description_words)
                .copied()
                .collect::<Vec<_>>()
                .join(" ");
            record.text = words.join(" ");
        }
    }

    if record.title.is_empty() {
        record.title = match link {
            Some(link) => text_of(link),
            None => {
                let text = text_of(card);
                if text.chars().count() < MAX_FALLBACK_TITLE_CHARS {
                    text
                } else {
                    String::new()
                }
            }
        };
    }

    record
}

fn find_cards<'a>(doc: &'a DocumentView, card_pattern: Option<&str>) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    if let Some(pattern) = card_pattern.filter(|p| !p.trim().is_empty()) {
        return doc.select(pattern);
    }

    for (pattern, selector) in CARD_SELECTORS.iter() {
        let cards = doc.select_with(selector);
        if !cards.is_empty() {
            info!(pattern, cards = cards.len(), "card pattern matched");
            return Ok(cards);
        }
        debug!(pattern, "card pattern matched nothing");
    }

    Ok(Vec::new())
}

pub fn extract_card_records(
    doc: &DocumentView,
    card_pattern: Option<&str>,
) -> Result<Outcome<CardRecord>, ExtractError> {
    extract_card_records_with(doc, card_pattern, DEFAULT_DESCRIPTION_WORDS)
}

#[instrument(skip_all, fields(card_pattern = ?card_pattern))]
pub fn extract_card_records_with(
    doc: &DocumentView,
    card_pattern: Option<&str>,
    description_words: usize,
) -> Result<Outcome<CardRecord>, ExtractError> {
    let cards = find_cards(doc, card_pattern)?;
    if cards.is_empty() {
        return Ok(Outcome::Info(NO_CARDS_MESSAGE.to_string()));
    }

    let records: Vec<CardRecord> = cards
        .into_iter()
        .map(|card| extract_card(card, doc.base_url(), description_words))
        .filter(|record| {
            !record.title.is_empty() || !record.description.is_empty() || !record.link.is_empty()
        })
        .enumerate()
        .map(|(idx, mut record)| {
            record.index = idx + 1;
            record
        })
        .collect();

    debug!(records = records.len(), "extracted card records");
    Ok(Outcome::records(records, || EMPTY_CARDS_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(html: &str) -> DocumentView {
        DocumentView::parse(html, "https://shop.example.com/search").unwrap()
    }

    #[test]
    fn test_full_card() {
        let doc = doc(
            r#"<div class="card">
                 <img data-src="//cdn.example.com/p1.jpg">
                 <h3>Blue Kettle</h3>
                 <p class="desc">Boils water fast.</p>
                 <a href="/p/1">View</a>
               </div>"#,
        );
        let outcome = extract_card_records(&doc, None).unwrap();
        assert_eq!(
            outcome,
            Outcome::Many(vec![CardRecord {
                index: 1,
                title: "Blue Kettle".to_string(),
                description: "Boils water fast.".to_string(),
                text: "Boils water fast.".to_string(),
                image: "https://cdn.example.com/p1.jpg".to_string(),
                link: "https://shop.example.com/p/1".to_string(),
            }])
        );
    }

    #[test]
    fn test_description_from_full_text_is_truncated() {
        let body = (1..=60).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let html = format!(r#"<article><h2>Long read</h2><span>{body}</span></article>"#);
        let doc = doc(&html);
        let outcome = extract_card_records(&doc, None).unwrap();
        let card = &outcome.items()[0];
        assert_eq!(card.title, "Long read");
        assert_eq!(card.description.split(' ').count(), 50);
        assert!(card.description.ends_with("w50"));
        assert_eq!(card.text.split(' ').count(), 60);
        assert!(!card.text.contains("Long read"));
    }

    #[test]
    fn test_title_falls_back_to_link_then_first_text() {
        let doc = doc(
            r#"<div class="item"><a href="/x">Linked title</a></div>
               <div class="item"><span>First line</span><span>second</span></div>"#,
        );
        let outcome = extract_card_records(&doc, None).unwrap();
        let titles: Vec<_> = outcome.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Linked title", "First line second"]);
    }

    #[test]
    fn test_script_link_is_not_a_link() {
        let doc = doc(
            r#"<div class="card"><a href="javascript:void(0)">Open</a></div>
               <div class="card"><a href=" JavaScript:share()"></a></div>"#,
        );
        let outcome = extract_card_records(&doc, None).unwrap();
        assert_eq!(
            outcome,
            Outcome::Many(vec![CardRecord {
                index: 1,
                title: "Open".to_string(),
                description: "Open".to_string(),
                text: "Open".to_string(),
                ..Default::default()
            }])
        );
    }

    #[test]
    fn test_empty_cards_dropped_and_indices_dense() {
        let doc = doc(
            r#"<div class="result-item"><h4>One</h4></div>
               <div class="result-item"><img src="/only-image.png"></div>
               <div class="result-item"><h4>Three</h4></div>"#,
        );
        let outcome = extract_card_records(&doc, None).unwrap();
        let indices: Vec<_> = outcome.items().iter().map(|c| (c.index, c.title.as_str())).collect();
        assert_eq!(indices, vec![(1, "One"), (2, "Three")]);
    }

    #[test]
    fn test_anchor_card_links_itself() {
        let doc = doc(r#"<a class="tile" href="/deal">Deal of the day</a>"#);
        let outcome = extract_card_records(&doc, Some("a.tile")).unwrap();
        let card = &outcome.items()[0];
        assert_eq!(card.link, "https://shop.example.com/deal");
        assert_eq!(card.title, "Deal of the day");
    }

    #[test]
    fn test_custom_pattern_without_matches() {
        let doc = doc(r#"<div class="card"><h3>Ignored</h3></div>"#);
        assert_eq!(
            extract_card_records(&doc, Some(".tile")).unwrap(),
            Outcome::Info(NO_CARDS_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_no_cards_and_empty_cards() {
        let doc_without = doc("<p>plain</p>");
        assert_eq!(
            extract_card_records(&doc_without, None).unwrap(),
            Outcome::Info(NO_CARDS_MESSAGE.to_string())
        );

        let doc_empty = doc(r#"<div class="card"><img src="/a.png"></div>"#);
        assert_eq!(
            extract_card_records(&doc_empty, None).unwrap(),
            Outcome::Info(EMPTY_CARDS_MESSAGE.to_string())
        );
    }
}
