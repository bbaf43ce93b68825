//! Tool configuration.
//!
//! All settings are optional. Stock defaults are overridden by an
//! `award-deck.toml` in the working directory (or the file named with
//! `--config`), which is in turn overridden by command-line arguments.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! categories_dir = "Categories"
//! presentation_dir = "Presentation"
//!
//! [copy]
//! skip = 0                  # Leading photos to leave out of each category
//! min_entries = 3           # Fewer photos than this is reported
//! special_award_from = 900  # Categories from this number on are exempt
//! # slides_dir = "Slides"   # Per-category slides (unset = no slides)
//!
//! [archive]
//! # command = "zip"         # Archive tool (unset = zip, then tar)
//! # file = "Awards"         # Archive name without suffix
//! ```
//!
//! Config files are sparse: a file holding only `[copy] skip = 1` keeps
//! every other default. Unknown keys are rejected to catch typos early.

use crate::category::SPECIAL_AWARD_FROM;
use crate::copy::MIN_ENTRIES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "award-deck.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// One subdirectory per category, filled by the operator.
    pub categories_dir: PathBuf,
    /// Where the ordered slideshow files are written.
    pub presentation_dir: PathBuf,
    pub copy: CopyConfig,
    pub archive: ArchiveConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            categories_dir: PathBuf::from("Categories"),
            presentation_dir: PathBuf::from("Presentation"),
            copy: CopyConfig::default(),
            archive: ArchiveConfig::default(),
        }
    }
}

impl DeckConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.copy.min_entries == 0 {
            return Err(ConfigError::Validation(
                "copy.min_entries must be at least 1".into(),
            ));
        }
        if self.categories_dir == self.presentation_dir {
            return Err(ConfigError::Validation(
                "categories_dir and presentation_dir must differ".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    pub skip: usize,
    pub min_entries: usize,
    pub special_award_from: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides_dir: Option<PathBuf>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            skip: 0,
            min_entries: MIN_ENTRIES,
            special_award_from: SPECIAL_AWARD_FROM,
            slides_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Tool name (searched on `PATH`) or path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<PathBuf>,
    /// Archive name without suffix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock defaults as a TOML table, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(DeckConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `path` over the stock defaults. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<DeckConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = if path.exists() {
        let content = fs::read_to_string(path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: DeckConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# award-deck configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line arguments override
# anything set here. Unknown keys will cause an error.

# One subdirectory per category (created by `award-deck init`).
categories_dir = "Categories"

# Where `award-deck copy` writes the ordered slideshow files.
presentation_dir = "Presentation"

# ---------------------------------------------------------------------------
# Copying
# ---------------------------------------------------------------------------
[copy]
# Leading photos (in filename order) to leave out of every category.
skip = 0

# Regular categories with fewer photos than this are reported.
min_entries = 3

# Categories numbered from here on are special awards and are never
# reported for having too few photos.
special_award_from = 900

# Directory holding per-category slides named 0012a-0.jpg or 0012a.jpg.
# slides_dir = "Slides"

# ---------------------------------------------------------------------------
# Archiving
# ---------------------------------------------------------------------------
[archive]
# Archive tool, by name or path. Unset: zip if available, otherwise tar.
# command = "zip"

# Archive name without suffix. Unset: the presentation directory's name.
# file = "Awards"
"##
}
