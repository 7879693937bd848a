use std::sync::LazyLock;

use regex::Regex;

static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").expect("tag pattern is valid"));

/// Reduces an HTML fragment to its text content: tags are dropped, entities
/// decoded and surrounding whitespace trimmed.
pub fn strip_markup(html: &str) -> String {
    let without_comments = COMMENT_PATTERN.replace_all(html, "");
    let without_tags = TAG_PATTERN.replace_all(&without_comments, "");
    html_escape::decode_html_entities(&without_tags)
        .trim()
        .to_string()
}

/// Plain-text summary for display, `None` when nothing readable remains.
pub fn plain_summary(summary: Option<&str>) -> Option<String> {
    summary
        .map(strip_markup)
        .filter(|text| !text.is_empty())
}
