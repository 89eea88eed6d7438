//! Inline `<style>` block scanner.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Non-greedy body so one match never spans two unrelated blocks.
static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"<style[^>]*>(.*?)</style>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

/// A matched inline style block.
#[derive(Debug)]
pub struct StyleBlock<'a> {
    /// The full `<style ...>...</style>` text, including any attributes
    /// on the open tag. This is the replacement target.
    pub raw: &'a str,
    /// Inner CSS, captured verbatim.
    pub css: &'a str,
}

/// Scan `text` for inline style blocks in document order.
pub fn scan(text: &str) -> impl Iterator<Item = StyleBlock<'_>> {
    STYLE_BLOCK.captures_iter(text).map(|caps| StyleBlock {
        raw: caps.get(0).map_or("", |m| m.as_str()),
        css: caps.get(1).map_or("", |m| m.as_str()),
    })
}
