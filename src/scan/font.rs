//! `@font-face` rule scanner.
//!
//! Captures the declared family, weight and style of each rule together
//! with the nested base64 data URI for the font payload. A rule without a
//! data URI carries nothing to extract and is skipped.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Rule body bounded by one brace pair; `[^}]` keeps a match from
/// swallowing the following rule.
static FONT_FACE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"@font-face\s*\{([^}]+)\}")
        .case_insensitive(true)
        .build()
        .unwrap()
});

static FAMILY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"font-family:\s*["']?([^;"']+)["']?"#).unwrap());

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"font-weight:\s*([^;]+)").unwrap());

static STYLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"font-style:\s*([^;]+)").unwrap());

/// Quotes around the data URI are optional so the same pattern covers
/// `url(data:...)` and the quoted form used by custom properties.
static DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*["']?data:font/([^;]+);base64,([A-Za-z0-9+/=]+)["']?\s*\)"#).unwrap()
});

/// A matched `@font-face` rule with an embedded payload.
#[derive(Debug)]
pub struct FontFace<'a> {
    /// The full `url(...)` text inside the rule, the replacement target.
    pub raw_url: &'a str,
    /// Declared `font-family`, if present.
    pub family: Option<&'a str>,
    /// Declared `font-weight`, defaulting to `400`.
    pub weight: &'a str,
    /// Declared `font-style`, defaulting to `normal`.
    pub style: &'a str,
    /// Format token from the data URI scheme (woff2, ttf, ...).
    pub format: &'a str,
    /// Base64 payload.
    pub payload: &'a str,
}

/// Scan `text` for `@font-face` rules with embedded payloads, in
/// document order.
pub fn scan(text: &str) -> impl Iterator<Item = FontFace<'_>> {
    FONT_FACE.captures_iter(text).filter_map(|caps| {
        let body = caps.get(1).map_or("", |m| m.as_str());
        let url = DATA_URL.captures(body)?;
        Some(FontFace {
            raw_url: url.get(0).map_or("", |m| m.as_str()),
            family: FAMILY
                .captures(body)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim()),
            weight: WEIGHT
                .captures(body)
                .and_then(|c| c.get(1))
                .map_or("400", |m| m.as_str().trim()),
            style: STYLE
                .captures(body)
                .and_then(|c| c.get(1))
                .map_or("normal", |m| m.as_str().trim()),
            format: url.get(1).map_or("", |m| m.as_str()),
            payload: url.get(2).map_or("", |m| m.as_str()),
        })
    })
}

/// Full `@font-face { ... }` block texts, in document order.
///
/// Used to collect the rules into a standalone stylesheet after the
/// document has been rewritten.
pub fn font_face_blocks(text: &str) -> impl Iterator<Item = &str> {
    FONT_FACE
        .find_iter(text)
        .map(|m| m.as_str())
}
