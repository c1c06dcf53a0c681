use serde_json::Value;

use crate::notion::Page;

/// Display string used when the title could not be read.
pub const UNTITLED_SENTINEL: &str = "[Untitled]";

/// Why a page title could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFallback {
    /// No property has type `title`.
    MissingProperty,
    /// The title property exists but its shape is not the expected span list.
    Malformed,
}

/// Outcome of reading a page title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTitle {
    Resolved(String),
    Sentinel(TitleFallback),
}

impl ResolvedTitle {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedTitle::Resolved(title) => title,
            ResolvedTitle::Sentinel(_) => UNTITLED_SENTINEL,
        }
    }
}

/// Read the first span of the page's title property.
///
/// An empty span list resolves to `""`. Anything that does not look like a
/// list of text spans resolves to the sentinel; this never fails.
pub fn resolve_title(page: &Page) -> ResolvedTitle {
    let Some(properties) = page.properties.as_object() else {
        return ResolvedTitle::Sentinel(TitleFallback::Malformed);
    };

    let Some(prop) = properties
        .values()
        .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
    else {
        return ResolvedTitle::Sentinel(TitleFallback::MissingProperty);
    };

    let Some(spans) = prop.get("title").and_then(Value::as_array) else {
        return ResolvedTitle::Sentinel(TitleFallback::Malformed);
    };

    let Some(first) = spans.first() else {
        return ResolvedTitle::Resolved(String::new());
    };

    match first.pointer("/text/content").and_then(Value::as_str) {
        Some(content) => ResolvedTitle::Resolved(content.to_string()),
        None => ResolvedTitle::Sentinel(TitleFallback::Malformed),
    }
}

/// Blank, "untitled" and "[untitled]" titles count as untitled, in any case.
pub fn is_untitled_title(title: &str) -> bool {
    matches!(title.to_lowercase().as_str(), "" | "untitled" | "[untitled]")
}

pub fn is_untitled(page: &Page) -> bool {
    is_untitled_title(resolve_title(page).as_str())
}
