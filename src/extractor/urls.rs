use url::Url;

/// Attribute priority for an image's source; lazy loaders park the real URL
/// in one of the `data-*` variants.
pub const IMAGE_SOURCE_ATTRS: [&str; 5] =
    ["src", "data-src", "data-lazy-src", "data-original", "data-url"];

/// Resolve a raw `href`/`src` value against the page URL.
///
/// Returns an empty string when the value is empty or cannot be resolved, so
/// callers only ever see absolute URLs or nothing.
pub fn normalize_url(raw: &str, base_url: &Url) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("//") {
        return format!("https:{raw}");
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    // Fragments are appended to the page URL as-is.
    if raw.starts_with('#') {
        return format!("{base_url}{raw}");
    }

    match base_url.join(raw) {
        Ok(absolute_url) => absolute_url.to_string(),
        Err(_) => String::new(),
    }
}

/// Whether an href runs script instead of navigating.
pub fn is_script_href(href: &str) -> bool {
    href.trim_start().to_lowercase().starts_with("javascript:")
}
