//! Base64 image data URI scanner.

use regex::Regex;
use std::sync::LazyLock;

/// The payload is restricted to the base64 alphabet so a match ends at
/// the first delimiter (quote, parenthesis, whitespace).
static IMAGE_DATA_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:image/([^;]+);base64,([A-Za-z0-9+/=]+)").unwrap());

/// A matched base64 image data URI.
#[derive(Debug)]
pub struct ImageData<'a> {
    /// The full data URI, the replacement target.
    pub raw: &'a str,
    /// Image subtype from the scheme prefix (png, gif, x-icon, ...).
    pub subtype: &'a str,
    /// Base64 payload.
    pub payload: &'a str,
}

impl ImageData<'_> {
    /// File extension for the subtype. `x-icon` is special-cased to
    /// `ico`; all other subtypes map directly.
    pub fn extension(&self) -> &str {
        if self.subtype == "x-icon" { "ico" } else { self.subtype }
    }
}

/// Scan `text` for base64 image data URIs in document order.
pub fn scan(text: &str) -> impl Iterator<Item = ImageData<'_>> {
    IMAGE_DATA_URI.captures_iter(text).map(|caps| ImageData {
        raw: caps.get(0).map_or("", |m| m.as_str()),
        subtype: caps.get(1).map_or("", |m| m.as_str()),
        payload: caps.get(2).map_or("", |m| m.as_str()),
    })
}
