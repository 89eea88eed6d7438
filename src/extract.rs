//! Resource extraction: decode payloads and persist them as asset files.
//!
//! Filenames come from a per-kind [`AssetCounter`] threaded explicitly
//! through each extraction call. The counter advances only when an asset
//! is actually written, so a resource skipped over a malformed payload
//! does not consume a number.

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::scan::font::FontFace;
use crate::scan::image::ImageData;
use crate::utils::text::sanitize_component;

// ============================================================================
// Asset Layout
// ============================================================================

/// Resolved asset directory layout for one run.
///
/// `root` is the directory the rewritten document lands in; the hrefs
/// written into the document are relative to it.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
    assets: String,
    css: String,
    images: String,
    fonts: String,
}

impl AssetLayout {
    pub fn new(root: &Path, config: &Config, assets_dir: Option<&str>) -> Self {
        Self {
            root: root.to_path_buf(),
            assets: assets_dir.unwrap_or(&config.assets.dir).to_string(),
            css: config.assets.css.clone(),
            images: config.assets.images.clone(),
            fonts: config.assets.fonts.clone(),
        }
    }

    /// Layout rooted at the directory the output document lands in.
    pub fn for_document(target: &Path, config: &Config, assets_dir: Option<&str>) -> Self {
        let root = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::new(root, config, assets_dir)
    }

    /// Document-relative href for a generated stylesheet.
    pub fn css_href(&self, file: &str) -> String {
        format!("{}/{}/{}", self.assets, self.css, file)
    }

    /// Document-relative href for an extracted image.
    pub fn image_href(&self, file: &str) -> String {
        format!("{}/{}/{}", self.assets, self.images, file)
    }

    /// Document-relative href for an extracted font.
    pub fn font_href(&self, file: &str) -> String {
        format!("{}/{}/{}", self.assets, self.fonts, file)
    }

    pub fn css_dir(&self) -> PathBuf {
        self.root.join(&self.assets).join(&self.css)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(&self.assets).join(&self.images)
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join(&self.assets).join(&self.fonts)
    }
}

// ============================================================================
// Asset Counter
// ============================================================================

/// Per-kind sequence counter for generated filenames.
///
/// 1-based; [`AssetCounter::label`] is the two-digit zero-padded view
/// used in filenames.
#[derive(Debug)]
pub struct AssetCounter(u32);

impl AssetCounter {
    pub fn new() -> Self {
        Self(1)
    }

    /// Current (next unissued) number.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Two-digit zero-padded view of the current number.
    pub fn label(&self) -> String {
        format!("{:02}", self.0)
    }

    /// Consume the current number after a successful write.
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// How many numbers have been issued so far.
    pub fn issued(&self) -> usize {
        (self.0 - 1) as usize
    }
}

// ============================================================================
// Extraction
// ============================================================================

fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    STANDARD.decode(payload).context("malformed base64 payload")
}

fn write_bytes(dir: &Path, file: &str, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create asset directory `{}`", dir.display()))?;
    let path = dir.join(file);
    fs::write(&path, bytes).with_context(|| format!("cannot write asset `{}`", path.display()))
}

/// Persist one style block as `style_<NN>.css`, trimmed of surrounding
/// whitespace. Returns the document-relative href.
pub fn write_style(css: &str, layout: &AssetLayout, counter: &mut AssetCounter) -> Result<String> {
    let file = format!("style_{}.css", counter.label());
    write_bytes(&layout.css_dir(), &file, css.trim().as_bytes())?;
    counter.advance();
    Ok(layout.css_href(&file))
}

/// Decode and persist one image as `image_<NN>.<ext>`. Returns the
/// document-relative href.
pub fn write_image(
    image: &ImageData<'_>,
    layout: &AssetLayout,
    counter: &mut AssetCounter,
) -> Result<String> {
    let bytes = decode_payload(image.payload)?;
    let file = format!("image_{}.{}", counter.label(), image.extension());
    write_bytes(&layout.images_dir(), &file, &bytes)?;
    counter.advance();
    Ok(layout.image_href(&file))
}

/// Decode and persist one font under its declared name. Returns the
/// document-relative href.
pub fn write_font(
    face: &FontFace<'_>,
    layout: &AssetLayout,
    counter: &mut AssetCounter,
) -> Result<String> {
    let bytes = decode_payload(face.payload)?;
    let file = font_file_name(face, counter);
    write_bytes(&layout.fonts_dir(), &file, &bytes)?;
    counter.advance();
    Ok(layout.font_href(&file))
}

/// Build `<family>_<weight>[_<style>].<format>` from a matched rule.
///
/// Components are sanitized to word characters, hyphens and underscores;
/// the style suffix is omitted for `normal`. A rule without a declared
/// family falls back to `font_<N>` from the counter.
pub fn font_file_name(face: &FontFace<'_>, counter: &AssetCounter) -> String {
    let family = match face.family {
        Some(family) => sanitize_component(family),
        None => format!("font_{}", counter.value()),
    };
    let weight = sanitize_component(face.weight);
    let style = sanitize_component(face.style);

    if style == "normal" {
        format!("{}_{}.{}", family, weight, face.format)
    } else {
        format!("{}_{}_{}.{}", family, weight, style, face.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan;
    use tempfile::TempDir;

    fn layout(root: &Path) -> AssetLayout {
        AssetLayout::new(root, &Config::default(), None)
    }

    #[test]
    fn test_write_style_numbering_and_trim() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(tmp.path());
        let mut counter = AssetCounter::new();

        let href = write_style("\n  body { margin: 0; }\n", &layout, &mut counter).unwrap();
        assert_eq!(href, "assets/css/style_01.css");
        let href = write_style("p { }", &layout, &mut counter).unwrap();
        assert_eq!(href, "assets/css/style_02.css");

        let first = fs::read_to_string(tmp.path().join("assets/css/style_01.css")).unwrap();
        assert_eq!(first, "body { margin: 0; }");
        assert_eq!(counter.issued(), 2);
    }

    #[test]
    fn test_write_image_round_trip() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(tmp.path());
        let mut counter = AssetCounter::new();

        let bytes: &[u8] = &[0x47, 0x49, 0x46, 0x38, 0x39, 0x61];
        let payload = STANDARD.encode(bytes);
        let html = format!("data:image/gif;base64,{payload}");
        let image = scan::image::scan(&html).next().unwrap();

        let href = write_image(&image, &layout, &mut counter).unwrap();
        assert_eq!(href, "assets/images/image_01.gif");

        let written = fs::read(tmp.path().join("assets/images/image_01.gif")).unwrap();
        assert_eq!(written, bytes);
        // Round-trip fidelity: re-encoding yields the original payload.
        assert_eq!(STANDARD.encode(&written), payload);
    }

    #[test]
    fn test_write_image_malformed_payload_keeps_counter() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(tmp.path());
        let mut counter = AssetCounter::new();

        let html = "data:image/png;base64,a"; // invalid length
        let image = scan::image::scan(html).next().unwrap();
        assert!(write_image(&image, &layout, &mut counter).is_err());
        assert_eq!(counter.issued(), 0);

        // The next successful write still gets number 01.
        let payload = STANDARD.encode(b"ok");
        let html = format!("data:image/png;base64,{payload}");
        let image = scan::image::scan(&html).next().unwrap();
        let href = write_image(&image, &layout, &mut counter).unwrap();
        assert_eq!(href, "assets/images/image_01.png");
    }

    #[test]
    fn test_font_file_name_full() {
        let css = "@font-face { font-family: \"Helvetica Neue\"; font-weight: 700; \
                   font-style: italic; src: url(data:font/woff2;base64,AAEC); }";
        let face = scan::font::scan(css).next().unwrap();
        let name = font_file_name(&face, &AssetCounter::new());
        assert_eq!(name, "HelveticaNeue_700_italic.woff2");
    }

    #[test]
    fn test_font_file_name_normal_style_omitted() {
        let css = "@font-face { font-family: Inter; src: url(data:font/woff;base64,AAEC); }";
        let face = scan::font::scan(css).next().unwrap();
        let name = font_file_name(&face, &AssetCounter::new());
        assert_eq!(name, "Inter_400.woff");
    }

    #[test]
    fn test_font_file_name_fallback_family() {
        let css = "@font-face { src: url(data:font/ttf;base64,AAEC); }";
        let face = scan::font::scan(css).next().unwrap();
        let mut counter = AssetCounter::new();
        counter.advance();
        counter.advance();
        assert_eq!(font_file_name(&face, &counter), "font_3_400.ttf");
    }

    #[test]
    fn test_write_font_persists_decoded_bytes() {
        let tmp = TempDir::new().unwrap();
        let layout = layout(tmp.path());
        let mut counter = AssetCounter::new();

        let payload = STANDARD.encode(b"font-bytes");
        let css = format!(
            "@font-face {{ font-family: Mono; src: url(data:font/woff2;base64,{payload}); }}"
        );
        let face = scan::font::scan(&css).next().unwrap();
        let href = write_font(&face, &layout, &mut counter).unwrap();
        assert_eq!(href, "assets/fonts/Mono_400.woff2");

        let written = fs::read(tmp.path().join("assets/fonts/Mono_400.woff2")).unwrap();
        assert_eq!(written, b"font-bytes");
    }
}
