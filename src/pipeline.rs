//! Per-kind extraction passes.
//!
//! Each pass is Scanner -> Extractor -> Rewriter over the whole document:
//! matches are computed up front, assets are written, then every matched
//! occurrence is replaced by a reference to its extracted file. The
//! extract command runs the passes in order styles, then images, then
//! fonts, each operating on the previous pass's output.

use anyhow::{Context, Result};
use std::fs;

use crate::extract::{self, AssetCounter, AssetLayout};
use crate::log;
use crate::rewrite::{self, Replacement};
use crate::scan;

/// Summary of one extraction pass.
#[derive(Debug, Default)]
pub struct PassSummary {
    /// Assets written.
    pub extracted: usize,
    /// Resources skipped over a per-resource failure.
    pub skipped: usize,
}

// ============================================================================
// Styles
// ============================================================================

/// Extract inline style blocks and rewrite each to a stylesheet link.
pub fn run_styles(text: &str, layout: &AssetLayout) -> (String, PassSummary) {
    let mut counter = AssetCounter::new();
    let mut rules = Vec::new();
    let mut summary = PassSummary::default();

    for block in scan::style::scan(text) {
        match extract::write_style(block.css, layout, &mut counter) {
            Ok(href) => {
                log!("styles"; "{href}");
                rules.push(Replacement::new(
                    block.raw,
                    format!(r#"<link rel="stylesheet" href="{href}">"#),
                ));
                summary.extracted += 1;
            }
            Err(e) => {
                log!("warning"; "style block skipped: {e:#}");
                summary.skipped += 1;
            }
        }
    }

    (rewrite::apply(text, &rules), summary)
}

// ============================================================================
// Images
// ============================================================================

/// Extract base64 image data URIs and rewrite each to its asset path.
pub fn run_images(text: &str, layout: &AssetLayout) -> (String, PassSummary) {
    let mut counter = AssetCounter::new();
    let mut rules = Vec::new();
    let mut summary = PassSummary::default();

    for image in scan::image::scan(text) {
        match extract::write_image(&image, layout, &mut counter) {
            Ok(href) => {
                log!("images"; "{} ({})", href, image.subtype);
                rules.push(Replacement::new(image.raw, href));
                summary.extracted += 1;
            }
            Err(e) => {
                log!("warning"; "image skipped: {e:#}");
                summary.skipped += 1;
            }
        }
    }

    (rewrite::apply(text, &rules), summary)
}

// ============================================================================
// Fonts
// ============================================================================

/// Extract `@font-face` payloads and rewrite each `url(...)` to its
/// asset path.
///
/// Besides the matched `url(...)` itself, quote-variant forms of the
/// same data URI are rewritten too; CSS custom properties reference the
/// embedded payload quoted.
pub fn run_fonts(text: &str, layout: &AssetLayout) -> (String, PassSummary) {
    let mut counter = AssetCounter::new();
    let mut rules = Vec::new();
    let mut summary = PassSummary::default();

    for face in scan::font::scan(text) {
        match extract::write_font(&face, layout, &mut counter) {
            Ok(href) => {
                log!(
                    "fonts";
                    "{} ({} {} {})",
                    href,
                    face.family.unwrap_or("unnamed"),
                    face.weight,
                    face.style
                );
                let target = format!("url({href})");
                let bare = format!("data:font/{};base64,{}", face.format, face.payload);
                for variant in [
                    format!("url({bare})"),
                    format!(r#"url("{bare}")"#),
                    format!("url('{bare}')"),
                ] {
                    rules.push(Replacement::new(variant, target.clone()));
                }
                if !rules.iter().any(|r| r.from == face.raw_url) {
                    rules.push(Replacement::new(face.raw_url, target));
                }
                summary.extracted += 1;
            }
            Err(e) => {
                log!("warning"; "font skipped: {e:#}");
                summary.skipped += 1;
            }
        }
    }

    (rewrite::apply(text, &rules), summary)
}

/// Collect every `@font-face` rule left in the rewritten document into a
/// standalone stylesheet under the css assets directory.
///
/// Returns the number of collected rules; zero rules writes nothing.
pub fn write_fonts_css(text: &str, layout: &AssetLayout, file_name: &str) -> Result<usize> {
    let blocks: Vec<&str> = scan::font::font_face_blocks(text).collect();
    if blocks.is_empty() {
        return Ok(0);
    }

    let dir = layout.css_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create asset directory `{}`", dir.display()))?;

    let mut out = String::from("/* Font Face Declarations */\n\n");
    for block in &blocks {
        out.push_str(block);
        out.push_str("\n\n");
    }

    let path = dir.join(file_name);
    fs::write(&path, out).with_context(|| format!("cannot write `{}`", path.display()))?;
    Ok(blocks.len())
}
