//! Detection of list-style result records.
//!
//! Strategies run in a fixed order and the first one producing a record
//! wins: an explicit list pattern, a named section (heading proximity, then
//! class/id match), unsupervised scoring of every `ul`/`ol`, and finally a
//! scan around result-looking headings.

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;
use tracing::{debug, info, instrument};
use url::Url;

use crate::extractor::document::{
    DocumentView, HEADING_TAGS, attr_of, children_of, descendants_of, first_descendant,
    first_link, is_tag, parent_of, text_of,
};
use crate::extractor::errors::ExtractError;
use crate::extractor::model::{ListRecord, Outcome, normalize_whitespace};
use crate::extractor::urls::{is_script_href, normalize_url};

pub const NO_LISTS_MESSAGE: &str = "No result lists found. Try:\n\
    1. Specify a section name (e.g., 'Results', 'Admit Cards')\n\
    2. Specify a CSS selector for list items (e.g., 'ul li', '.result-list li')";

const LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// Elements that may label a named section.
const SECTION_LABEL_TAGS: [&str; 11] =
    ["h1", "h2", "h3", "h4", "h5", "h6", "div", "span", "strong", "b", "p"];
/// Labels this long or longer are content, not headings.
pub const MAX_SECTION_LABEL_CHARS: usize = 50;
pub const MIN_SECTION_LIST_ITEMS: usize = 2;
pub const MAX_ANCESTOR_LEVELS: usize = 5;
pub const MAX_FOLLOWING_LISTS: usize = 3;

pub const RESULT_KEYWORDS: [&str; 9] = [
    "result",
    "admit",
    "card",
    "exam",
    "job",
    "notification",
    "form",
    "out",
    "start",
];

pub const MIN_CANDIDATE_ITEMS: usize = 3;
pub const STRONG_LINK_RATIO: f64 = 0.7;
pub const STRONG_LINK_POINTS: u32 = 3;
pub const WEAK_LINK_RATIO: f64 = 0.5;
pub const WEAK_LINK_POINTS: u32 = 2;
pub const KEYWORD_SAMPLE_ITEMS: usize = 5;
pub const STRONG_KEYWORD_HITS: usize = 3;
pub const STRONG_KEYWORD_POINTS: u32 = 2;
pub const WEAK_KEYWORD_HITS: usize = 2;
pub const WEAK_KEYWORD_POINTS: u32 = 1;
pub const LONG_LIST_ITEMS: usize = 10;
pub const LONG_LIST_POINTS: u32 = 1;
pub const MIN_LIST_SCORE: u32 = 3;

const FALLBACK_HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "div", "span"];
const FALLBACK_SECTION_KEYWORDS: [&str; 6] =
    ["result", "admit", "job", "notification", "exam", "recruitment"];
const FALLBACK_ANCESTOR_LEVELS: usize = 4;
const MIN_FALLBACK_ITEMS: usize = 3;

static STATUS_DASH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*-\s*(Out|Final Result|Start|Last Date|Date Extend|Reminder|Booking)")
        .unwrap()
});

static STATUS_PAREN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.*?)\)$").unwrap());

static HEADING_CLASS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)title|heading|header").unwrap());

/// Thresholds for unsupervised list scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListScoring {
    pub min_items: usize,
    pub strong_link_ratio: f64,
    pub strong_link_points: u32,
    pub weak_link_ratio: f64,
    pub weak_link_points: u32,
    pub keyword_sample: usize,
    pub strong_keyword_hits: usize,
    pub strong_keyword_points: u32,
    pub weak_keyword_hits: usize,
    pub weak_keyword_points: u32,
    pub long_list_items: usize,
    pub long_list_points: u32,
    pub min_score: u32,
}

impl Default for ListScoring {
    fn default() -> Self {
        Self {
            min_items: MIN_CANDIDATE_ITEMS,
            strong_link_ratio: STRONG_LINK_RATIO,
            strong_link_points: STRONG_LINK_POINTS,
            weak_link_ratio: WEAK_LINK_RATIO,
            weak_link_points: WEAK_LINK_POINTS,
            keyword_sample: KEYWORD_SAMPLE_ITEMS,
            strong_keyword_hits: STRONG_KEYWORD_HITS,
            strong_keyword_points: STRONG_KEYWORD_POINTS,
            weak_keyword_hits: WEAK_KEYWORD_HITS,
            weak_keyword_points: WEAK_KEYWORD_POINTS,
            long_list_items: LONG_LIST_ITEMS,
            long_list_points: LONG_LIST_POINTS,
            min_score: MIN_LIST_SCORE,
        }
    }
}

impl ListScoring {
    /// Score a list from its direct items: link density, result vocabulary in
    /// the first few items, and overall length.
    pub fn score(&self, items: &[ElementRef<'_>]) -> u32 {
        if items.is_empty() {
            return 0;
        }

        let linked = items.iter().filter(|item| first_link(**item).is_some()).count();
        let link_ratio = linked as f64 / items.len() as f64;

        let keyword_hits = items
            .iter()
            .take(self.keyword_sample)
            .filter(|item| {
                let text = text_of(**item).to_lowercase();
                RESULT_KEYWORDS.iter().any(|keyword| text.contains(keyword))
            })
            .count();

        let mut score = 0;
        if link_ratio >= self.strong_link_ratio {
            score += self.strong_link_points;
        } else if link_ratio >= self.weak_link_ratio {
            score += self.weak_link_points;
        }
        if keyword_hits >= self.strong_keyword_hits {
            score += self.strong_keyword_points;
        } else if keyword_hits >= self.weak_keyword_hits {
            score += self.weak_keyword_points;
        }
        if items.len() >= self.long_list_items {
            score += self.long_list_points;
        }
        score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    ExplicitPattern,
    NamedSection,
    Scoring,
    ResultHeading,
}

/// Status suffix of a record's text: a dash followed by a known status word,
/// else a trailing parenthetical.
pub fn detect_status(text: &str) -> String {
    for regex in [&*STATUS_DASH_REGEX, &*STATUS_PAREN_REGEX] {
        if let Some(status) = regex.captures(text).and_then(|caps| caps.get(1)) {
            return normalize_whitespace(status.as_str());
        }
    }
    String::new()
}

/// Build one record from a list item. The returned record is unnumbered.
pub fn extract_record(item: ElementRef<'_>, base_url: &Url) -> ListRecord {
    let anchor = first_link(item).or_else(|| {
        let is_link = is_tag(item, &["a"]) && attr_of(item, "href").is_some_and(|h| !h.is_empty());
        is_link.then_some(item)
    });

    let (text, link) = match anchor {
        Some(anchor) => {
            let href = attr_of(anchor, "href").unwrap_or_default();
            let link = if is_script_href(href) {
                String::new()
            } else {
                normalize_url(href, base_url)
            };
            (text_of(anchor), link)
        }
        None => (text_of(item), String::new()),
    };

    ListRecord {
        index: 0,
        status: detect_status(&text),
        title: text.clone(),
        text,
        link,
    }
}

/// Records for `items`, empty ones dropped, numbered from 1.
fn number_records<'a>(items: impl IntoIterator<Item = ElementRef<'a>>, base_url: &Url) -> Vec<ListRecord> {
    items
        .into_iter()
        .map(|item| extract_record(item, base_url))
        .filter(|record| !record.title.is_empty() || !record.text.is_empty())
        .enumerate()
        .map(|(idx, mut record)| {
            record.index = idx + 1;
            record
        })
        .collect()
}

fn direct_items(list: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    children_of(list).filter(|child| is_tag(*child, &["li"])).collect()
}

/// The first list under `el`, if it holds enough direct items.
fn embedded_list(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    first_descendant(el, &LIST_TAGS).filter(|list| direct_items(*list).len() >= MIN_SECTION_LIST_ITEMS)
}

pub fn extract_list_records(
    doc: &DocumentView,
    section_name: Option<&str>,
    list_pattern: Option<&str>,
) -> Result<Outcome<ListRecord>, ExtractError> {
    extract_list_records_with(doc, section_name, list_pattern, &ListScoring::default())
}

#[instrument(skip_all, fields(section_name = ?section_name, list_pattern = ?list_pattern))]
pub fn extract_list_records_with(
    doc: &DocumentView,
    section_name: Option<&str>,
    list_pattern: Option<&str>,
    scoring: &ListScoring,
) -> Result<Outcome<ListRecord>, ExtractError> {
    let base_url = doc.base_url();

    if let Some(pattern) = list_pattern.filter(|p| !p.trim().is_empty()) {
        let items = doc.select(pattern)?;
        debug!(pattern, items = items.len(), "explicit list pattern matched");
        let records = number_records(items, base_url);
        if !records.is_empty() {
            return Ok(found(Strategy::ExplicitPattern, records));
        }
    }

    if let Some(section_name) = section_name.filter(|s| !s.trim().is_empty())
        && let Some(list) = find_section_list(doc, section_name)
    {
        let mut items = direct_items(list);
        if items.is_empty() {
            items = li_descendants(list);
        }
        let records = number_records(items, base_url);
        if !records.is_empty() {
            return Ok(found(Strategy::NamedSection, records));
        }
    }

    if let Some((list, score)) = best_scored_list(doc, scoring) {
        info!(score, "auto-detected result list");
        let records = number_records(direct_items(list), base_url);
        if !records.is_empty() {
            return Ok(found(Strategy::Scoring, records));
        }
    }

    let records = records_near_result_heading(doc);
    if !records.is_empty() {
        return Ok(found(Strategy::ResultHeading, records));
    }

    debug!("no strategy produced records");
    Ok(Outcome::Info(NO_LISTS_MESSAGE.to_string()))
}

fn found(strategy: Strategy, records: Vec<ListRecord>) -> Outcome<ListRecord> {
    info!(?strategy, records = records.len(), "extracted list records");
    Outcome::Many(records)
}

fn li_descendants(list: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    descendants_of(list)
        .filter(|el| is_tag(*el, &["li"]))
        .collect()
}

/// Locate the list belonging to a named section.
fn find_section_list<'a>(doc: &'a DocumentView, section_name: &str) -> Option<ElementRef<'a>> {
    let needle = section_name.to_lowercase();

    for label in doc.find_by_tags(&SECTION_LABEL_TAGS) {
        let label_text = text_of(label).to_lowercase();
        if !label_text.contains(&needle) || label_text.chars().count() >= MAX_SECTION_LABEL_CHARS {
            continue;
        }
        if let Some(list) = list_near_label(doc, label) {
            return Some(list);
        }
    }

    for attr in ["class", "id"] {
        for holder in doc.find_by_attr_pattern(attr, &needle) {
            if let Some(list) = embedded_list(holder) {
                debug!(attr, "section list found by attribute");
                return Some(list);
            }
        }
    }

    None
}

/// Bounded climb from a section label: at each level try the parent's first
/// list, up to three lists following the parent whose nearest heading is the
/// label, then a list embedded in the current element.
fn list_near_label<'a>(doc: &'a DocumentView, label: ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut current = label;

    for level in 0..MAX_ANCESTOR_LEVELS {
        let parent = parent_of(current);

        if let Some(parent) = parent {
            if let Some(list) = embedded_list(parent) {
                debug!(level, "section list found in parent");
                return Some(list);
            }

            let following_lists = doc
                .following(parent)
                .filter(|el| is_tag(*el, &LIST_TAGS))
                .take(MAX_FOLLOWING_LISTS);
            for list in following_lists {
                if direct_items(list).len() < MIN_SECTION_LIST_ITEMS {
                    continue;
                }
                let heading = doc.preceding(list, &HEADING_TAGS);
                if heading.is_some_and(|heading| heading.id() == label.id()) {
                    debug!(level, "section list found after label");
                    return Some(list);
                }
            }
        }

        if let Some(list) = embedded_list(current) {
            debug!(level, "section list embedded in label ancestor");
            return Some(list);
        }

        match parent {
            Some(parent) => current = parent,
            None => break,
        }
    }

    None
}

/// Highest-scoring qualifying list; the earliest wins a tie.
fn best_scored_list<'a>(doc: &'a DocumentView, scoring: &ListScoring) -> Option<(ElementRef<'a>, u32)> {
    let mut best: Option<(ElementRef<'a>, u32)> = None;

    for list in doc.find_by_tags(&LIST_TAGS) {
        let items = direct_items(list);
        if items.len() < scoring.min_items {
            continue;
        }
        let score = scoring.score(&items);
        debug!(items = items.len(), score, "scored candidate list");
        if score < scoring.min_score {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((list, score));
        }
    }

    best
}

/// Last resort: items near a heading-classed element that names a result
/// section.
fn records_near_result_heading(doc: &DocumentView) -> Vec<ListRecord> {
    for heading in doc.find_by_tags(&FALLBACK_HEADING_TAGS) {
        let classed = attr_of(heading, "class").is_some_and(|class| HEADING_CLASS_REGEX.is_match(class));
        if !classed {
            continue;
        }
        let text = text_of(heading).to_lowercase();
        if !FALLBACK_SECTION_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
            continue;
        }

        let mut level = parent_of(heading);
        for _ in 0..FALLBACK_ANCESTOR_LEVELS {
            let Some(container) = level else {
                break;
            };

            let mut items: Vec<_> = children_of(container)
                .filter(|child| is_tag(*child, &["li", "a"]))
                .collect();
            if items.is_empty()
                && let Some(list) = first_descendant(container, &LIST_TAGS)
            {
                items = direct_items(list);
            }

            if items.len() >= MIN_FALLBACK_ITEMS {
                debug!(heading = %text, "result section found near heading");
                let records = number_records(items, doc.base_url());
                if !records.is_empty() {
                    return records;
                }
            }
            level = parent_of(container);
        }
    }

    Vec::new()
}
