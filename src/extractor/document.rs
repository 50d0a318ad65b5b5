//! Read-only structural view over one parsed page.
//!
//! Every locator works through the primitives in this module: tag-set and
//! attribute-pattern lookups over the whole page, and bounded navigation
//! (parent, children, following siblings, ancestors) around one element.
//! Nothing here mutates the tree; script and style content is skipped while
//! reading text instead of being removed.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::extractor::errors::ExtractError;
use crate::extractor::model::normalize_whitespace;

pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Subtrees whose text never counts as rendered text.
const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

#[derive(Debug, Clone)]
pub struct DocumentView {
    html: Html,
    base_url: Url,
}

impl DocumentView {
    pub fn new(html: Html, base_url: Url) -> Self {
        Self { html, base_url }
    }

    /// Parse an HTML document fetched from `base_url`.
    pub fn parse(html: &str, base_url: &str) -> Result<Self, ExtractError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::new(Html::parse_document(html), base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// The `body` element, falling back to the document root.
    pub fn body(&self) -> ElementRef<'_> {
        self.elements()
            .find(|el| is_tag(*el, &["body"]))
            .unwrap_or_else(|| self.root())
    }

    /// Every element in document order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    pub fn find_by_tags(&self, tags: &[&str]) -> Vec<ElementRef<'_>> {
        self.elements().filter(|el| is_tag(*el, tags)).collect()
    }

    /// Elements whose `attr` value contains `needle`, ignoring case.
    pub fn find_by_attr_pattern(&self, attr: &str, needle: &str) -> Vec<ElementRef<'_>> {
        let needle = needle.to_lowercase();
        self.elements()
            .filter(|el| {
                el.value()
                    .attr(attr)
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Elements matching a caller-supplied CSS pattern.
    pub fn select(&self, pattern: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let selector = parse_pattern(pattern)?;
        Ok(self.html.select(&selector).collect())
    }

    pub fn select_with(&self, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.html.select(selector).collect()
    }

    /// Elements that start after `el` in document order, its own descendants
    /// included.
    pub fn following<'a>(&'a self, el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let id = el.id();
        self.elements().skip_while(move |candidate| candidate.id() != id).skip(1)
    }

    /// The closest element with one of `tags` that starts before `el`.
    pub fn preceding<'a>(&'a self, el: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
        let mut last = None;
        for candidate in self.elements() {
            if candidate.id() == el.id() {
                return last;
            }
            if is_tag(candidate, tags) {
                last = Some(candidate);
            }
        }
        None
    }
}

pub fn parse_pattern(pattern: &str) -> Result<Selector, ExtractError> {
    Selector::parse(pattern).map_err(|e| ExtractError::invalid_pattern(pattern, format!("{e:?}")))
}

pub fn tag_of<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

pub fn is_tag(el: ElementRef<'_>, tags: &[&str]) -> bool {
    tags.contains(&tag_of(el))
}

pub fn attr_of<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Class list joined by single spaces.
pub fn classes_of(el: ElementRef<'_>) -> String {
    el.value().classes().collect::<Vec<_>>().join(" ")
}

/// Rendered text: trimmed text nodes joined by a space, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    let mut stack = vec![*el];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let piece = text.trim();
                if !piece.is_empty() {
                    parts.push(piece);
                }
                continue;
            }
            Node::Element(element)
                if node.id() != el.id() && SKIPPED_TAGS.contains(&element.name()) =>
            {
                continue;
            }
            _ => {}
        }
        stack.extend(node.children().rev());
    }
    normalize_whitespace(&parts.join(" "))
}

pub fn parent_of(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Element ancestors, nearest first.
pub fn ancestors_of<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.ancestors().filter_map(ElementRef::wrap)
}

pub fn nearest_ancestor<'a>(el: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
    ancestors_of(el).find(|ancestor| is_tag(*ancestor, tags))
}

/// Direct element children.
pub fn children_of<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// Element descendants in document order, `el` itself excluded.
pub fn descendants_of<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Element siblings after `el`, nearest first.
pub fn siblings_after<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.next_siblings().filter_map(ElementRef::wrap)
}

pub fn first_descendant<'a>(el: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
    descendants_of(el).find(|d| is_tag(*d, tags))
}

pub fn contains_tag(el: ElementRef<'_>, tags: &[&str]) -> bool {
    first_descendant(el, tags).is_some()
}

/// First descendant anchor carrying an `href` attribute.
pub fn first_link(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    descendants_of(el).find(|d| is_tag(*d, &["a"]) && d.value().attr("href").is_some())
}
