//! Carousel configuration module.
//!
//! Handles loading, validating, and merging `carousel.toml`. User values are
//! layered over stock defaults, so a config file only needs the keys it
//! wants to change.
//!
//! ## Config File Location
//!
//! Place `carousel.toml` in the site content root:
//!
//! ```text
//! site/
//! ├── carousel.toml       # Optional (overrides stock defaults)
//! ├── hero/
//! └── gallery/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [slideshow]
//! interval_ms = 5000        # Autoplay cadence of the hero slideshow
//! autoplay = true           # Start autoplay on load
//! pause_on_hover = true     # Pointer over the hero suppresses advances
//!
//! [lightbox]
//! preload_neighbors = true  # Warm the previous/next image after each show
//! # autoplay_ms = 4000      # Optional lightbox autoplay while open
//!
//! [swipe]
//! threshold = 50.0          # Minimum horizontal travel for a swipe
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the content root.
pub const CONFIG_FILE: &str = "carousel.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Carousel configuration loaded from `carousel.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Hero slideshow autoplay settings.
    pub slideshow: SlideshowConfig,
    /// Lightbox behaviour.
    pub lightbox: LightboxConfig,
    /// Swipe gesture recognition.
    pub swipe: SwipeConfig,
}

impl CarouselConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slideshow.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slideshow.interval_ms must be greater than 0".into(),
            ));
        }
        if self.lightbox.autoplay_ms == Some(0) {
            return Err(ConfigError::Validation(
                "lightbox.autoplay_ms must be greater than 0".into(),
            ));
        }
        if !self.swipe.threshold.is_finite() || self.swipe.threshold < 0.0 {
            return Err(ConfigError::Validation(
                "swipe.threshold must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Hero slideshow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlideshowConfig {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
    /// Whether autoplay starts when the slideshow is created.
    pub autoplay: bool,
    /// Whether pointer hover pauses autoplay.
    pub pause_on_hover: bool,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: 5_000,
            autoplay: true,
            pause_on_hover: true,
        }
    }
}

/// Lightbox settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Offer the previous and next image for preloading after each show.
    pub preload_neighbors: bool,
    /// Optional autoplay cadence while the lightbox is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay_ms: Option<u64>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            preload_neighbors: true,
            autoplay_ms: None,
        }
    }
}

/// Swipe recognition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwipeConfig {
    /// Horizontal travel a gesture must exceed to count as a swipe.
    pub threshold: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(CarouselConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
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

/// Load `carousel.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<CarouselConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: CarouselConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `carousel.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<CarouselConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `carousel.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Hotel Carousel Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as carousel.toml in the site content root.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Hero slideshow
# ---------------------------------------------------------------------------
[slideshow]
# Milliseconds between automatic advances.
interval_ms = 5000

# Start advancing as soon as the page loads.
autoplay = true

# Hovering the hero section suppresses advances; the timer keeps running.
pause_on_hover = true

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# Offer the previous and next image for preloading after each navigation.
preload_neighbors = true

# Advance automatically while the lightbox is open.
# Omit or comment out to keep navigation manual.
# autoplay_ms = 4000

# ---------------------------------------------------------------------------
# Swipe gestures
# ---------------------------------------------------------------------------
[swipe]
# Horizontal travel (CSS pixels) a gesture must exceed to navigate.
# Gestures that move further vertically than horizontally never navigate.
threshold = 50.0
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CarouselConfig::default();
        assert_eq!(config.slideshow.interval_ms, 5_000);
        assert!(config.slideshow.autoplay);
        assert!(config.slideshow.pause_on_hover);
        assert!(config.lightbox.preload_neighbors);
        assert_eq!(config.lightbox.autoplay_ms, None);
        assert_eq!(config.swipe.threshold, 50.0);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[slideshow]
interval_ms = 8000
"#;
        let config: CarouselConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.slideshow.interval_ms, 8_000);
        // Defaults preserved
        assert!(config.slideshow.autoplay);
        assert_eq!(config.swipe.threshold, 50.0);
    }

    #[test]
    fn parse_lightbox_autoplay() {
        let toml = r#"
[lightbox]
autoplay_ms = 3000
preload_neighbors = false
"#;
        let config: CarouselConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.lightbox.autoplay_ms, Some(3_000));
        assert!(!config.lightbox.preload_neighbors);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[swipe]
threshold = 80.0

[slideshow]
pause_on_hover = false
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.swipe.threshold, 80.0);
        assert!(!config.slideshow.pause_on_hover);
        assert_eq!(config.slideshow.interval_ms, 5_000);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[slideshow]
interval_ms = 5000
autoplay = true
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[slideshow]
autoplay = false
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let slideshow = merged.get("slideshow").unwrap();
        assert_eq!(slideshow.get("autoplay").unwrap().as_bool(), Some(false));
        assert_eq!(
            slideshow.get("interval_ms").unwrap().as_integer(),
            Some(5000)
        );
    }

    #[test]
    fn merge_toml_scalar_replaces_table() {
        let base: toml::Value = toml::from_str("[swipe]\nthreshold = 50.0").unwrap();
        let overlay: toml::Value = toml::from_str("swipe = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("swipe").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("a = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[slideshow]
intervl_ms = 100
"#;
        let result: Result<CarouselConfig, _> = toml::from_str(toml_str);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<CarouselConfig, _> = toml::from_str("[slider]\nautoplay = true");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[swipe]\nthreshhold = 10.0").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(CarouselConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_interval() {
        let mut config = CarouselConfig::default();
        config.slideshow.interval_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn validate_zero_lightbox_autoplay() {
        let mut config = CarouselConfig::default();
        config.lightbox.autoplay_ms = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_negative_threshold() {
        let mut config = CarouselConfig::default();
        config.swipe.threshold = -1.0;
        assert!(config.validate().is_err());
        config.swipe.threshold = f64::NAN;
        assert!(config.validate().is_err());
        config.swipe.threshold = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[slideshow]\ninterval_ms = 0").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[slideshow]\ninterval_ms = 1200").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.slideshow.interval_ms, 1_200);
        assert!(config.lightbox.preload_neighbors);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[swipe]\nthreshold = -5.0").unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CarouselConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[slideshow]"));
        assert!(content.contains("[lightbox]"));
        assert!(content.contains("[swipe]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value().unwrap();
        assert!(val.is_table());
        assert!(val.get("slideshow").is_some());
        assert!(val.get("lightbox").is_some());
        assert!(val.get("swipe").is_some());
    }
}
