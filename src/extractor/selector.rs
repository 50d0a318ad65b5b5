//! Pattern-driven scraping of text, images and links.
//!
//! With a caller pattern, every matching element is read. Without one, a
//! fixed list of common patterns is tried and the first that yields anything
//! wins.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::extractor::document::{DocumentView, attr_of, text_of};
use crate::extractor::errors::ExtractError;
use crate::extractor::media::image_source;
use crate::extractor::model::Outcome;
use crate::extractor::urls::{is_script_href, normalize_url};

const NO_MATCH_MESSAGE: &str = "Not found - No elements matched the selector";

const TEXT_PATTERNS: [&str; 6] = [
    "h1",
    "h1.title",
    ".product-title",
    ".title",
    "[class*=\"title\"]",
    "h2",
];

const IMAGE_PATTERNS: [&str; 7] = [
    "img[class*=\"main\"]",
    "img[class*=\"product\"]",
    "img[class*=\"primary\"]",
    "img[class*=\"featured\"]",
    ".product-image img",
    ".main-image img",
    "img",
];

const LINK_PATTERNS: [&str; 8] = [
    "a[href*=\"cart\"]",
    "a[href*=\"buy\"]",
    "a[href*=\"add\"]",
    "a[class*=\"button\"]",
    "a[class*=\"btn\"]",
    ".button a",
    ".btn a",
    "a[href]",
];

static TEXT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&TEXT_PATTERNS));
static IMAGE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&IMAGE_PATTERNS));
static LINK_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(&LINK_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .map(|pattern| Selector::parse(pattern).unwrap())
        .collect()
}

/// Run `read` over a caller pattern's matches, or over the first fallback
/// pattern whose matches yield something.
fn scrape<F>(
    doc: &DocumentView,
    pattern: Option<&str>,
    fallbacks: &[Selector],
    read: F,
    empty_selection: &str,
    nothing_found: &str,
) -> Result<Outcome<String>, ExtractError>
where
    F: Fn(ElementRef<'_>, bool) -> Option<String>,
{
    if let Some(pattern) = pattern.filter(|p| !p.trim().is_empty()) {
        let elements = doc.select(pattern)?;
        if elements.is_empty() {
            return Ok(Outcome::NotFound(NO_MATCH_MESSAGE.to_string()));
        }
        let values: Vec<String> = elements.into_iter().filter_map(|el| read(el, false)).collect();
        return Ok(Outcome::from_matches(values, || empty_selection.to_string()));
    }

    for (idx, selector) in fallbacks.iter().enumerate() {
        let values: Vec<String> = doc
            .select_with(selector)
            .into_iter()
            .filter_map(|el| read(el, true))
            .collect();
        if !values.is_empty() {
            debug!(fallback = idx, values = values.len(), "fallback pattern matched");
            return Ok(Outcome::from_matches(values, String::new));
        }
    }

    Ok(Outcome::NotFound(nothing_found.to_string()))
}

/// Text of elements matching `pattern`, or of the first common title pattern.
#[instrument(skip_all, fields(pattern = ?pattern))]
pub fn texts_by_pattern(doc: &DocumentView, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
    scrape(
        doc,
        pattern,
        &TEXT_SELECTORS,
        |el, fallback| {
            let text = text_of(el);
            // Explicit patterns report every match, even empty ones.
            (!fallback || !text.is_empty()).then_some(text)
        },
        NO_MATCH_MESSAGE,
        "Not found - Could not find any text elements",
    )
}

/// Image URLs of elements matching `pattern`, or of the first common image
/// pattern. Fallback mode skips SVG icons.
#[instrument(skip_all, fields(pattern = ?pattern))]
pub fn images_by_pattern(doc: &DocumentView, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
    let base_url = doc.base_url();
    scrape(
        doc,
        pattern,
        &IMAGE_SELECTORS,
        |el, fallback| {
            let source = image_source(el)?;
            if fallback && source.ends_with(".svg") {
                return None;
            }
            let url = normalize_url(source, base_url);
            (!url.is_empty()).then_some(url)
        },
        "Not found - No image URLs found in selected elements",
        "Not found - Could not find any image elements",
    )
}

/// Link URLs of elements matching `pattern`, or of the first common
/// call-to-action pattern.
#[instrument(skip_all, fields(pattern = ?pattern))]
pub fn links_by_pattern(doc: &DocumentView, pattern: Option<&str>) -> Result<Outcome<String>, ExtractError> {
    let base_url = doc.base_url();
    scrape(
        doc,
        pattern,
        &LINK_SELECTORS,
        |el, _| {
            let href = attr_of(el, "href").filter(|href| !href.is_empty() && !is_script_href(href))?;
            let url = normalize_url(href, base_url);
            (!url.is_empty()).then_some(url)
        },
        "Not found - No links found in selected elements",
        "Not found - Could not find any link elements",
    )
}
