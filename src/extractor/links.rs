use tracing::{debug, instrument};

use crate::extractor::document::{DocumentView, attr_of, classes_of, text_of};
use crate::extractor::model::Outcome;
use crate::extractor::urls::{is_script_href, normalize_url};

/// Anchors whose text, href, title or class mention `keyword`.
#[instrument(skip_all, fields(keyword = %keyword))]
pub fn find_links_by_keyword(doc: &DocumentView, keyword: &str) -> Outcome<String> {
    let needle = keyword.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for anchor in doc.find_by_tags(&["a"]) {
        let Some(href) = attr_of(anchor, "href").filter(|href| !href.trim().is_empty()) else {
            continue;
        };

        let matched = text_of(anchor).to_lowercase().contains(&needle)
            || href.to_lowercase().contains(&needle)
            || attr_of(anchor, "title")
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
            || classes_of(anchor).to_lowercase().contains(&needle);
        if !matched || is_script_href(href) {
            continue;
        }

        let url = normalize_url(href, doc.base_url());
        if !url.is_empty() && !found.contains(&url) {
            found.push(url);
        }
    }

    debug!(matches = found.len(), "link search finished");
    Outcome::from_matches(found, || {
        format!("Not found - No links containing '{keyword}' were found")
    })
}
