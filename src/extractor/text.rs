use tracing::{debug, instrument};

use crate::extractor::document::{DocumentView, attr_of, text_of};
use crate::extractor::model::{Outcome, normalize_whitespace};

/// Tags whose rendered text is searched.
const TEXT_TAGS: [&str; 14] = [
    "p", "div", "span", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "article",
    "section",
];

const ALT_TEXT_TAG: &str = "[Image Alt Text]";

/// Find every text block (and image alt text) containing `keyword`.
#[instrument(skip_all, fields(keyword = %keyword, case_sensitive = case_sensitive))]
pub fn find_text(doc: &DocumentView, keyword: &str, case_sensitive: bool) -> Outcome<String> {
    let fold = |text: &str| {
        if case_sensitive {
            text.to_string()
        } else {
            text.to_lowercase()
        }
    };
    let needle = fold(keyword);
    let mut found: Vec<String> = Vec::new();

    for element in doc.find_by_tags(&TEXT_TAGS) {
        let text = text_of(element);
        if text.is_empty() || !fold(&text).contains(&needle) {
            continue;
        }
        if !found.contains(&text) {
            found.push(text);
        }
    }

    for img in doc.find_by_tags(&["img"]) {
        let alt = normalize_whitespace(attr_of(img, "alt").unwrap_or_default());
        if alt.is_empty() || !fold(&alt).contains(&needle) {
            continue;
        }
        let entry = format!("{ALT_TEXT_TAG} {alt}");
        if !found.contains(&entry) {
            found.push(entry);
        }
    }

    debug!(matches = found.len(), "text search finished");
    Outcome::from_matches(found, || {
        format!("Not found - No text containing '{keyword}' was found")
    })
}
