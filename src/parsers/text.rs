use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Configuration options for turning element contents into text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Whether to collapse internal whitespace runs into a single space
    pub collapse_whitespace: bool,
}

/// Returns the text content of an element with tags stripped
///
/// All descendant text nodes are concatenated in document order and the
/// result is trimmed of leading and trailing whitespace.
pub fn element_text(element: ElementRef<'_>, options: &TextOptions) -> String {
    let raw = element.text().collect::<String>();
    normalize(&raw, options)
}

/// Trims text and, if requested, collapses whitespace runs
pub fn normalize(text: &str, options: &TextOptions) -> String {
    let trimmed = text.trim();
    if options.collapse_whitespace {
        WHITESPACE_RUN.replace_all(trimmed, " ").into_owned()
    } else {
        trimmed.to_string()
    }
}
