//! Stylesheet consolidation command.
//!
//! Collapses the numbered per-block stylesheet links produced by the
//! extraction pass into a single link placed immediately before the
//! closing head tag. Producing the consolidated stylesheet itself (by
//! concatenating the numbered files) is an external step; this command
//! only rewrites the document.

use anyhow::Result;
use regex::Regex;

use super::ConsolidateArgs;
use crate::config::Config;
use crate::document::{self, Document};
use crate::extract::AssetLayout;
use crate::log;
use crate::utils::plural_count;

pub fn run(args: &ConsolidateArgs, config: &Config) -> Result<()> {
    let doc = Document::load(&args.input)?;
    let target = args.output.clone().unwrap_or_else(|| args.input.clone());
    let layout = AssetLayout::for_document(&target, config, args.assets_dir.as_deref());

    let href = layout.css_href(&config.output.consolidated);
    let (text, removed, inserted) = consolidate_text(doc.text(), &layout.css_href(""), &href);

    if !inserted {
        log!("warning"; "no </head> marker found; consolidated link not inserted");
    }

    let sheet = layout.css_dir().join(&config.output.consolidated);
    if !sheet.exists() {
        log!(
            "warning";
            "{} does not exist yet; concatenate the numbered stylesheets to produce it",
            sheet.display()
        );
    }

    document::persist(&text, &target)?;
    log!(
        "consolidate";
        "removed {}, linked {}",
        plural_count(removed, "stylesheet link"),
        href
    );
    Ok(())
}

/// Remove numbered stylesheet links and insert one consolidated link
/// before `</head>`.
///
/// Returns the rewritten text, the number of links removed, and whether
/// the consolidated link was inserted (false when no `</head>` exists;
/// removal proceeds regardless).
fn consolidate_text(text: &str, css_prefix: &str, href: &str) -> (String, usize, bool) {
    let pattern = Regex::new(&format!(
        r#"<link rel="stylesheet" href="{}style_[0-9]+\.css">"#,
        regex::escape(css_prefix)
    ))
    .unwrap();

    let removed = pattern.find_iter(text).count();
    let mut out = pattern.replace_all(text, "").into_owned();

    match out.find("</head>") {
        Some(pos) => {
            out.insert_str(
                pos,
                &format!("    <link rel=\"stylesheet\" href=\"{href}\">\n"),
            );
            (out, removed, true)
        }
        None => (out, removed, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consolidate_replaces_numbered_links() {
        let html = "<html><head>\n\
                    <link rel=\"stylesheet\" href=\"assets/css/style_01.css\">\n\
                    <link rel=\"stylesheet\" href=\"assets/css/style_02.css\">\n\
                    <link rel=\"stylesheet\" href=\"assets/css/style_03.css\">\n\
                    </head><body></body></html>";

        let (out, removed, inserted) =
            consolidate_text(html, "assets/css/", "assets/css/styles.css");

        assert_eq!(removed, 3);
        assert!(inserted);
        assert!(!out.contains("style_01.css"));
        assert!(!out.contains("style_02.css"));
        assert!(!out.contains("style_03.css"));
        assert_eq!(
            out.matches(r#"<link rel="stylesheet" href="assets/css/styles.css">"#)
                .count(),
            1
        );
        // Inserted immediately before the head-close marker.
        let link_pos = out.find("assets/css/styles.css").unwrap();
        let head_pos = out.find("</head>").unwrap();
        assert!(link_pos < head_pos);
    }

    #[test]
    fn test_consolidate_leaves_other_links_alone() {
        let html = "<head>\
                    <link rel=\"stylesheet\" href=\"assets/css/fonts.css\">\
                    <link rel=\"stylesheet\" href=\"assets/css/style_04.css\">\
                    </head>";

        let (out, removed, _) = consolidate_text(html, "assets/css/", "assets/css/styles.css");

        assert_eq!(removed, 1);
        assert!(out.contains("fonts.css"));
        assert!(!out.contains("style_04.css"));
    }

    #[test]
    fn test_consolidate_without_head_marker() {
        let html = "<link rel=\"stylesheet\" href=\"assets/css/style_01.css\"><p>body</p>";

        let (out, removed, inserted) =
            consolidate_text(html, "assets/css/", "assets/css/styles.css");

        assert_eq!(removed, 1);
        assert!(!inserted);
        assert!(!out.contains("style_01.css"));
        assert!(!out.contains("styles.css"));
    }

    #[test]
    fn test_consolidate_respects_custom_prefix() {
        let html = "<head><link rel=\"stylesheet\" href=\"static/sheets/style_01.css\"></head>";

        let (out, removed, inserted) =
            consolidate_text(html, "static/sheets/", "static/sheets/styles.css");

        assert_eq!(removed, 1);
        assert!(inserted);
        assert!(out.contains(r#"href="static/sheets/styles.css""#));
    }
}
