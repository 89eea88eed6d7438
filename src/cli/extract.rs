//! Extraction command drivers.

use anyhow::Result;
use std::path::PathBuf;

use super::ExtractArgs;
use crate::config::Config;
use crate::document::{self, Document};
use crate::extract::AssetLayout;
use crate::log;
use crate::pipeline;
use crate::scan::ResourceKind;
use crate::utils::plural_count;

/// Run all three passes in order (styles, then images, then fonts),
/// collect the fonts stylesheet, and write the rewritten document.
pub fn extract_all(args: &ExtractArgs, config: &Config) -> Result<()> {
    let doc = Document::load(&args.input)?;
    let target = target_path(args);
    let layout = AssetLayout::for_document(&target, config, args.assets_dir.as_deref());

    if args.backup {
        let backup = doc.write_backup(&config.output.backup)?;
        log!("backup"; "{}", backup.display());
    }

    let (text, styles) = pipeline::run_styles(doc.text(), &layout);
    let (text, images) = pipeline::run_images(&text, &layout);
    let (text, fonts) = pipeline::run_fonts(&text, &layout);

    collect_fonts_css(&text, &layout, config)?;
    document::persist(&text, &target)?;

    log!(
        "extract";
        "{}: {}, {}, {}",
        target.display(),
        plural_count(styles.extracted, "style block"),
        plural_count(images.extracted, "image"),
        plural_count(fonts.extracted, "font")
    );
    report_skipped(styles.skipped + images.skipped + fonts.skipped);
    Ok(())
}

/// Run a single kind's pass against the input document.
pub fn extract_kind(args: &ExtractArgs, config: &Config, kind: ResourceKind) -> Result<()> {
    let doc = Document::load(&args.input)?;
    let target = target_path(args);
    let layout = AssetLayout::for_document(&target, config, args.assets_dir.as_deref());

    if args.backup {
        let backup = doc.write_backup(&config.output.backup)?;
        log!("backup"; "{}", backup.display());
    }

    let (text, summary) = match kind {
        ResourceKind::Style => pipeline::run_styles(doc.text(), &layout),
        ResourceKind::Image => pipeline::run_images(doc.text(), &layout),
        ResourceKind::Font => pipeline::run_fonts(doc.text(), &layout),
    };

    if kind == ResourceKind::Font {
        collect_fonts_css(&text, &layout, config)?;
    }
    document::persist(&text, &target)?;

    log!(
        kind.as_str();
        "{}: {}",
        target.display(),
        plural_count(summary.extracted, "resource")
    );
    report_skipped(summary.skipped);
    Ok(())
}

/// Collect the rewritten `@font-face` rules into the fonts stylesheet.
fn collect_fonts_css(text: &str, layout: &AssetLayout, config: &Config) -> Result<()> {
    let faces = pipeline::write_fonts_css(text, layout, &config.output.fonts_css)?;
    if faces > 0 {
        log!(
            "fonts";
            "collected {} into {}",
            plural_count(faces, "font-face rule"),
            layout.css_href(&config.output.fonts_css)
        );
    }
    Ok(())
}

fn target_path(args: &ExtractArgs) -> PathBuf {
    args.output.clone().unwrap_or_else(|| args.input.clone())
}

fn report_skipped(skipped: usize) {
    if skipped > 0 {
        log!("warning"; "skipped {}", plural_count(skipped, "resource"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: PathBuf, backup: bool) -> ExtractArgs {
        ExtractArgs {
            input,
            output: None,
            backup,
            assets_dir: None,
        }
    }

    #[test]
    fn test_extract_all_rewrites_in_place() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("page.html");
        fs::write(
            &input,
            "<html><head><style>body { margin: 0; }</style></head>\
             <body><img src=\"data:image/gif;base64,R0lGODdh\"></body></html>",
        )
        .unwrap();

        extract_all(&args(input.clone(), false), &Config::default()).unwrap();

        let out = fs::read_to_string(&input).unwrap();
        assert!(!out.contains("<style"));
        assert!(!out.contains("base64,"));
        assert!(out.contains(r#"<link rel="stylesheet" href="assets/css/style_01.css">"#));
        assert!(out.contains("assets/images/image_01.gif"));
        assert!(tmp.path().join("assets/css/style_01.css").exists());
        assert!(tmp.path().join("assets/images/image_01.gif").exists());
    }

    #[test]
    fn test_extract_all_with_backup() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("page.html");
        let original = "<html><head><style>p {}</style></head></html>";
        fs::write(&input, original).unwrap();

        extract_all(&args(input.clone(), true), &Config::default()).unwrap();

        let backup = tmp.path().join("original-backup.html");
        assert_eq!(fs::read_to_string(backup).unwrap(), original);
        assert_ne!(fs::read_to_string(&input).unwrap(), original);
    }

    #[test]
    fn test_extract_kind_touches_only_that_kind() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("page.html");
        fs::write(
            &input,
            "<style>a {}</style><img src=\"data:image/png;base64,aGk=\">",
        )
        .unwrap();

        extract_kind(&args(input.clone(), false), &Config::default(), ResourceKind::Style)
            .unwrap();

        let out = fs::read_to_string(&input).unwrap();
        assert!(!out.contains("<style"));
        assert!(out.contains("base64,aGk="));
        assert!(!tmp.path().join("assets/images").exists());
    }

    #[test]
    fn test_missing_input_aborts_without_writes() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("absent.html");
        assert!(extract_all(&args(input, false), &Config::default()).is_err());
        assert!(!tmp.path().join("assets").exists());
    }

    #[test]
    fn test_output_flag_redirects_assets_root() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("site");
        fs::create_dir(&out_dir).unwrap();
        let input = tmp.path().join("page.html");
        fs::write(&input, "<style>a {}</style>").unwrap();

        let args = ExtractArgs {
            input: input.clone(),
            output: Some(out_dir.join("index.html")),
            backup: false,
            assets_dir: None,
        };
        extract_all(&args, &Config::default()).unwrap();

        // Input untouched; assets live next to the output document.
        assert_eq!(fs::read_to_string(&input).unwrap(), "<style>a {}</style>");
        assert!(out_dir.join("index.html").exists());
        assert!(out_dir.join("assets/css/style_01.css").exists());
    }
}
