use scraper::ElementRef;
use tracing::{debug, instrument};
use url::Url;

use crate::extractor::document::{DocumentView, attr_of, classes_of, nearest_ancestor, text_of};
use crate::extractor::urls::{IMAGE_SOURCE_ATTRS, normalize_url};

/// Containers whose text describes the images inside them.
const CONTEXT_TAGS: [&str; 4] = ["div", "section", "article", "figure"];

/// First non-empty source attribute, in load-strategy priority order.
pub fn image_source<'a>(img: ElementRef<'a>) -> Option<&'a str> {
    IMAGE_SOURCE_ATTRS
        .iter()
        .filter_map(|attr| attr_of(img, attr))
        .find(|value| !value.trim().is_empty())
}

/// Absolute URL of an image, if it has any usable source.
pub fn resolve_image(img: ElementRef<'_>, base_url: &Url) -> Option<String> {
    let url = normalize_url(image_source(img)?, base_url);
    (!url.is_empty()).then_some(url)
}

fn push_unique(found: &mut Vec<String>, url: Option<String>) {
    if let Some(url) = url
        && !found.contains(&url)
    {
        found.push(url);
    }
}

/// Every image URL on the page, in document order.
#[instrument(skip_all, fields(base_url = %doc.base_url()))]
pub fn list_images(doc: &DocumentView) -> Vec<String> {
    let mut images = Vec::new();
    for img in doc.find_by_tags(&["img"]) {
        push_unique(&mut images, resolve_image(img, doc.base_url()));
    }
    debug!(count = images.len(), "listed images");
    images
}

/// Images whose alt/title/class, or surrounding container text, mention
/// `keyword`.
#[instrument(skip_all, fields(keyword = %keyword))]
pub fn find_images_by_keyword(doc: &DocumentView, keyword: &str) -> Vec<String> {
    let needle = keyword.to_lowercase();
    let mut found = Vec::new();

    for img in doc.find_by_tags(&["img"]) {
        let alt = attr_of(img, "alt").unwrap_or_default().to_lowercase();
        let title = attr_of(img, "title").unwrap_or_default().to_lowercase();
        let class = classes_of(img).to_lowercase();

        if alt.contains(&needle) || title.contains(&needle) || class.contains(&needle) {
            push_unique(&mut found, resolve_image(img, doc.base_url()));
        }

        if let Some(container) = nearest_ancestor(img, &CONTEXT_TAGS)
            && text_of(container).to_lowercase().contains(&needle)
        {
            push_unique(&mut found, resolve_image(img, doc.base_url()));
        }
    }

    debug!(count = found.len(), "image keyword search finished");
    found
}
