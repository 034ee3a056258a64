//! Markdown preview projection for the note list.
//!
//! # Invariants
//! - Derivation is pure; it never touches the repository or the store.
//! - `preview_text` holds at most `PREVIEW_TEXT_MAX_CHARS` characters.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum characters kept in a list preview.
pub const PREVIEW_TEXT_MAX_CHARS: usize = 100;

/// Heading shown above the rendered preview when the draft title is blank.
pub const PREVIEW_PLACEHOLDER_HEADING: &str = "Preview";

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(```|~~~)[^\n]*$").expect("valid fence regex"));
static TABLE_RULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\|?[\s:\-|]+\|[\s:\-|]*$").expect("valid table rule regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!|]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Markdown-derived summary for list rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPreview {
    /// Plain-text summary with markdown syntax removed.
    pub preview_text: Option<String>,
    /// First markdown image path.
    pub preview_image: Option<String>,
}

/// Derives list preview fields from markdown content.
///
/// Rules:
/// - `preview_image`: first markdown image path.
/// - `preview_text`: code fences, table rules and markdown symbols removed,
///   whitespace collapsed, first 100 chars retained.
pub fn derive_markdown_preview(content: &str) -> MarkdownPreview {
    let preview_image = MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_fences = FENCE_RE.replace_all(&without_links, " ");
    let without_rules = TABLE_RULE_RE.replace_all(&without_fences, " ");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_rules, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    let preview_text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_TEXT_MAX_CHARS).collect())
    };

    MarkdownPreview {
        preview_text,
        preview_image,
    }
}

/// Returns the heading displayed above the rendered markdown.
pub fn preview_heading(title: &str) -> &str {
    if title.is_empty() {
        PREVIEW_PLACEHOLDER_HEADING
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_markdown_preview, preview_heading};

    #[test]
    fn preview_extracts_first_image_path() {
        let preview = derive_markdown_preview("x ![a](one.png) y ![b](two.png)");
        assert_eq!(preview.preview_image.as_deref(), Some("one.png"));
    }

    #[test]
    fn preview_strips_markdown_symbols_and_limits_length() {
        let source = format!(
            "# title\n\n- [link](https://example.com)\n**bold** `code`\n{}",
            "word ".repeat(40)
        );
        let preview = derive_markdown_preview(&source);
        let text = preview.preview_text.expect("preview_text should exist");
        assert!(text.starts_with("title link bold code"));
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
        assert_eq!(text.chars().count(), 100);
    }

    #[test]
    fn preview_drops_fences_and_table_rules() {
        let source = "| a | b |\n|---|:-:|\n| 1 | 2 |\n\n```rust\nfn main() {}\n```";
        let text = derive_markdown_preview(source)
            .preview_text
            .expect("preview_text should exist");
        assert!(!text.contains("```"));
        assert!(!text.contains("rust"));
        assert!(!text.contains('|'));
        assert!(text.contains("fn main"));
    }

    #[test]
    fn empty_content_has_no_preview() {
        let preview = derive_markdown_preview("  \n# \n");
        assert_eq!(preview.preview_text, None);
        assert_eq!(preview.preview_image, None);
    }

    #[test]
    fn heading_falls_back_to_placeholder() {
        assert_eq!(preview_heading(""), "Preview");
        assert_eq!(preview_heading("Plans"), "Plans");
    }
}
