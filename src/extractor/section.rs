//! Heading-bounded section extraction.
//!
//! The target heading is the first `h2`/`h3` whose text contains the keyword.
//! Content is then collected by a fixed chain of strategies, each tried once:
//! a flat document-order scan, a walk over the heading container's following
//! siblings, and a flat scan scoped to the nearest content container. The
//! first strategy that collects any fragment wins; only its fragments are
//! condensed.

use scraper::ElementRef;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::extractor::document::{
    DocumentView, contains_tag, descendants_of, is_tag, nearest_ancestor, parent_of,
    siblings_after, text_of,
};
use crate::extractor::model::{Outcome, normalize_whitespace};

/// Fragments of this many characters or fewer are noise.
pub const DEFAULT_MIN_FRAGMENT_CHARS: usize = 10;

const SECTION_HEADINGS: [&str; 2] = ["h2", "h3"];
const BLOCK_TAGS: [&str; 6] = ["p", "ul", "ol", "div", "article", "section"];
const SCAN_TAGS: [&str; 8] = ["h2", "h3", "p", "ul", "ol", "div", "article", "section"];
const CONTAINER_TAGS: [&str; 4] = ["article", "main", "section", "body"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    FlatScan,
    SiblingWalk,
    ContainerScan,
}

const COLLECTION_ORDER: [Collection; 3] = [
    Collection::FlatScan,
    Collection::SiblingWalk,
    Collection::ContainerScan,
];

pub fn extract_section(doc: &DocumentView, heading_keyword: &str) -> Outcome<String> {
    extract_section_with(doc, heading_keyword, DEFAULT_MIN_FRAGMENT_CHARS)
}

#[instrument(skip_all, fields(heading_keyword = %heading_keyword))]
pub fn extract_section_with(
    doc: &DocumentView,
    heading_keyword: &str,
    min_fragment_chars: usize,
) -> Outcome<String> {
    let Some(heading) = find_heading(doc, heading_keyword) else {
        return Outcome::NotFound(format!(
            "Not found - No heading containing '{heading_keyword}' was found"
        ));
    };

    let collected = COLLECTION_ORDER.into_iter().find_map(|method| {
        let fragments = collect(doc, heading, method);
        if fragments.is_empty() {
            debug!(?method, "collection method yielded nothing");
            return None;
        }
        debug!(?method, fragments = fragments.len(), "section collected");
        Some(fragments)
    });

    match collected.and_then(|fragments| condense(fragments, min_fragment_chars)) {
        Some(content) => Outcome::Single(content),
        None => Outcome::Info(format!(
            "Found heading '{}' but no content found below it",
            text_of(heading)
        )),
    }
}

fn find_heading<'a>(doc: &'a DocumentView, keyword: &str) -> Option<ElementRef<'a>> {
    let needle = keyword.to_lowercase();
    doc.find_by_tags(&SECTION_HEADINGS)
        .into_iter()
        .find(|heading| text_of(*heading).to_lowercase().contains(&needle))
}

fn collect<'a>(doc: &'a DocumentView, heading: ElementRef<'a>, method: Collection) -> Vec<String> {
    match method {
        Collection::FlatScan => scan_after(doc.elements(), heading),
        Collection::SiblingWalk => walk_siblings(heading),
        Collection::ContainerScan => {
            let container = nearest_ancestor(heading, &CONTAINER_TAGS).unwrap_or_else(|| doc.body());
            scan_after(descendants_of(container), heading)
        }
    }
}

/// Block texts after `heading` in document order, up to the next `h2`/`h3`.
fn scan_after<'a>(elements: impl Iterator<Item = ElementRef<'a>>, heading: ElementRef<'a>) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut collecting = false;

    for element in elements.filter(|el| is_tag(*el, &SCAN_TAGS)) {
        if element.id() == heading.id() {
            collecting = true;
            continue;
        }
        if !collecting {
            continue;
        }
        if is_tag(element, &SECTION_HEADINGS) {
            break;
        }
        let text = text_of(element);
        if !text.is_empty() {
            fragments.push(text);
        }
    }

    fragments
}

/// Block siblings following the heading's container, stopping at the first
/// sibling that is or holds a heading.
fn walk_siblings(heading: ElementRef<'_>) -> Vec<String> {
    let Some(parent) = parent_of(heading) else {
        return Vec::new();
    };

    let mut fragments = Vec::new();
    for sibling in siblings_after(parent) {
        if is_tag(sibling, &SECTION_HEADINGS) || contains_tag(sibling, &SECTION_HEADINGS) {
            break;
        }
        if is_tag(sibling, &BLOCK_TAGS) {
            let text = text_of(sibling);
            if !text.is_empty() {
                fragments.push(text);
            }
        }
    }
    fragments
}

/// Normalize, drop short and repeated fragments, join the rest.
fn condense(fragments: Vec<String>, min_fragment_chars: usize) -> Option<String> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for fragment in fragments {
        let normalized = normalize_whitespace(&fragment);
        if normalized.chars().count() <= min_fragment_chars || !seen.insert(normalized.clone()) {
            continue;
        }
        kept.push(normalized);
    }

    (!kept.is_empty()).then(|| kept.join(" "))
}
