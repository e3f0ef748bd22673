//! Site configuration.
//!
//! A single optional `config.toml` in the content root tunes the engine's
//! timings and thresholds and the rendered page's colours. User files are
//! sparse: they are merged on top of the stock defaults, so only overridden
//! keys need to be present. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! [site]
//! title = "Portfolio"
//!
//! [slider]
//! interval_ms = 5000          # Auto-advance period of the hero slider
//!
//! [lightbox]
//! swipe_threshold_px = 50.0   # Minimum horizontal drag for a swipe
//!
//! [form]
//! submit_delay_ms = 1500      # Simulated submission latency
//! banner_ms = 5000            # How long a success/failure banner stays up
//!
//! [scroll]
//! navbar_threshold = 100.0
//! back_to_top_threshold = 300.0
//! reveal_offset = 150.0
//! throttle_ms = 16
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub slider: SliderConfig,
    pub lightbox: LightboxConfig,
    pub form: FormConfig,
    pub scroll: ScrollConfig,
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slider.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slider.interval_ms must be greater than zero".into(),
            ));
        }
        let threshold = self.lightbox.swipe_threshold_px;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigError::Validation(
                "lightbox.swipe_threshold_px must be a non-negative number".into(),
            ));
        }
        if self.form.banner_ms == 0 {
            return Err(ConfigError::Validation(
                "form.banner_ms must be greater than zero".into(),
            ));
        }
        if self.form.success_message.trim().is_empty()
            || self.form.failure_message.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "form banner messages must not be empty".into(),
            ));
        }
        if self.scroll.back_to_top_threshold < 0.0 || self.scroll.navbar_threshold < 0.0 {
            return Err(ConfigError::Validation(
                "scroll thresholds must not be negative".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Page title and navbar brand.
    pub title: String,
    /// Heading of the gallery section.
    pub gallery_heading: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            gallery_heading: "Gallery".to_string(),
        }
    }
}

/// Hero slider timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    /// Milliseconds between automatic advances.
    pub interval_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// A drag must move strictly further than this, horizontally, to count
    /// as a swipe.
    pub swipe_threshold_px: f64,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: 50.0,
        }
    }
}

/// Contact form submission flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Delay before the (simulated) submission settles.
    pub submit_delay_ms: u64,
    /// Lifetime of a success or failure banner.
    pub banner_ms: u64,
    /// Submit control label while a submission is in flight.
    pub sending_label: String,
    pub success_message: String,
    pub failure_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            banner_ms: 5000,
            sending_label: "Sending...".to_string(),
            success_message:
                "Thank you for your inquiry! I will get back to you within 24-48 hours."
                    .to_string(),
            failure_message: "There was an error sending your message. Please try again or contact me directly."
                .to_string(),
        }
    }
}

/// Scroll-driven page chrome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Scroll offset past which the navbar switches to its compact style.
    pub navbar_threshold: f64,
    /// Scroll offset past which the back-to-top button shows.
    pub back_to_top_threshold: f64,
    /// A reveal target animates in once its top is this far above the
    /// viewport bottom.
    pub reveal_offset: f64,
    /// Minimum spacing between handled scroll events.
    pub throttle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            back_to_top_threshold: 300.0,
            reveal_offset: 150.0,
            throttle_ms: 16,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, form hints, inactive filter buttons.
    pub text_muted: String,
    /// Active filter button, active slider dot, submit button.
    pub accent: String,
    /// Inline field errors and the failure banner.
    pub error: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fdfbf8".to_string(),
            text: "#2b2b2b".to_string(),
            text_muted: "#7a7a7a".to_string(),
            accent: "#b08d57".to_string(),
            error: "#b3261e".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#9a9a9a".to_string(),
            accent: "#d4b483".to_string(),
            error: "#f2b8b5".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock defaults as a TOML table: the base layer user files merge onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
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

/// Read `config.toml` from a directory as a raw TOML value.
///
/// `Ok(None)` when the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config for a content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// A fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# lightdeck configuration
# =======================
# All settings are optional. Values shown are the defaults.
# Place this file at the root of the content directory.
# Unknown keys will cause an error.

[site]
# Page title and navbar brand.
title = "Portfolio"
# Heading shown above the filterable gallery.
gallery_heading = "Gallery"

# ---------------------------------------------------------------------------
# Hero slider
# ---------------------------------------------------------------------------
[slider]
# Milliseconds between automatic advances. Manual navigation does not reset
# the cycle.
interval_ms = 5000

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
# A horizontal drag must exceed this many pixels to count as a swipe.
# Vertical-dominant drags are always ignored.
swipe_threshold_px = 50.0

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
# Simulated submission latency.
submit_delay_ms = 1500
# Lifetime of the success / failure banner.
banner_ms = 5000
sending_label = "Sending..."
success_message = "Thank you for your inquiry! I will get back to you within 24-48 hours."
failure_message = "There was an error sending your message. Please try again or contact me directly."

# ---------------------------------------------------------------------------
# Scroll chrome
# ---------------------------------------------------------------------------
[scroll]
# Navbar turns compact past this scroll offset (px).
navbar_threshold = 100.0
# Back-to-top button shows past this scroll offset (px).
back_to_top_threshold = 300.0
# Reveal targets animate in once their top is this far above the viewport
# bottom (px).
reveal_offset = 150.0
# Scroll events closer together than this are dropped.
throttle_ms = 16

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#fdfbf8"
text = "#2b2b2b"
text_muted = "#7a7a7a"
accent = "#b08d57"
error = "#b3261e"

[colors.dark]
background = "#121212"
text = "#eeeeee"
text_muted = "#9a9a9a"
accent = "#d4b483"
error = "#f2b8b5"
"##
}

/// CSS custom properties for both colour schemes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_muted};
    --color-accent: {light_accent};
    --color-error: {light_error};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_muted};
        --color-accent: {dark_accent};
        --color-error: {dark_error};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_muted = colors.light.text_muted,
        light_accent = colors.light.accent,
        light_error = colors.light.error,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_muted = colors.dark.text_muted,
        dark_accent = colors.dark.accent,
        dark_error = colors.dark.error,
    )
}
