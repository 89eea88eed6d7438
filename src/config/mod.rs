//! Tool configuration from `unembed.toml`.
//!
//! The file is optional and every field has a default, so the tool runs
//! without any configuration at all:
//!
//! ```toml
//! [assets]
//! dir = "assets"        # assets root, relative to the output document
//! css = "css"           # subdirectory names
//! images = "images"
//! fonts = "fonts"
//!
//! [output]
//! backup = "original-backup.html"
//! consolidated = "styles.css"
//! fonts_css = "fonts.css"
//! ```

mod error;

pub use error::ConfigError;

use crate::log;
use serde::Deserialize;
use std::fs;
use std::path::Path;

// ============================================================================
// Sections
// ============================================================================

/// `[assets]` - extracted asset directory layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Assets root directory, relative to the output document.
    pub dir: String,
    /// Stylesheet subdirectory name.
    pub css: String,
    /// Image subdirectory name.
    pub images: String,
    /// Font subdirectory name.
    pub fonts: String,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            dir: "assets".into(),
            css: "css".into(),
            images: "images".into(),
            fonts: "fonts".into(),
        }
    }
}

/// `[output]` - generated file names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Fixed backup filename, written next to the output document.
    pub backup: String,
    /// Consolidated stylesheet filename (under the css subdirectory).
    pub consolidated: String,
    /// Collected `@font-face` stylesheet filename (under the css
    /// subdirectory).
    pub fonts_css: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            backup: "original-backup.html".into(),
            consolidated: "styles.css".into(),
            fonts_css: "fonts.css".into(),
        }
    }
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub assets: AssetsSection,
    pub output: OutputSection,
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. Unknown keys are warned about
    /// and ignored.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            crate::debug!("config"; "no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let deserializer = toml::Deserializer::new(&content);
        let mut ignored = Vec::new();
        let config: Self = serde_ignored::deserialize(deserializer, |field: serde_ignored::Path| {
            ignored.push(field.to_string());
        })?;

        for field in &ignored {
            log!("warning"; "unknown config key `{}` in {}", field, path.display());
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject layouts that would escape the output document's directory.
    fn validate(&self) -> Result<(), ConfigError> {
        let dirs = [
            ("assets.dir", &self.assets.dir),
            ("assets.css", &self.assets.css),
            ("assets.images", &self.assets.images),
            ("assets.fonts", &self.assets.fonts),
        ];
        for (field, value) in dirs {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
            if value.contains(['/', '\\']) || *value == ".." || Path::new(value).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a single relative path component, got `{value}`"
                )));
            }
        }

        let files = [
            ("output.backup", &self.output.backup),
            ("output.consolidated", &self.output.consolidated),
            ("output.fonts_css", &self.output.fonts_css),
        ];
        for (field, value) in files {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "{field} must be a bare filename, got `{value}`"
                )));
            }
        }

        Ok(())
    }
}
