//! Tool configuration: default styling for generated codes.
//!
//! `qrsmith.toml` supplies defaults so repeated invocations don't need a
//! wall of flags. All keys are optional — a sparse file overrides just
//! the values it names, CLI flags override the file, and built-in
//! defaults fill the rest:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! format = "png"            # png | svg | pdf | jpeg
//!
//! [style]
//! size = 300                # Output size in pixels
//! foreground = "#000000"    # Dark module color
//! background = "#ffffff"    # Background color
//! error_correction = "M"    # L | M | Q | H
//! margin = 4                # Quiet zone width in modules
//! dot_style = "square"      # square | dots | rounded
//! # logo = "logo.png"       # Overlay image, centered at 20%
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::render::{
    DotStyle, EcLevel, MAX_MARGIN, MAX_SIZE, MIN_SIZE, OutputFormat, RenderOptions,
    parse_hex_color,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
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

/// Parsed `qrsmith.toml`. Every field optional; see module docs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub style: StyleConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    pub size: Option<u32>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub error_correction: Option<EcLevel>,
    pub margin: Option<u32>,
    pub dot_style: Option<DotStyle>,
    /// Path to a logo image, resolved relative to the config file.
    pub logo: Option<PathBuf>,
}

impl ToolConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(size) = self.style.size
            && !(MIN_SIZE..=MAX_SIZE).contains(&size)
        {
            return Err(ConfigError::Validation(format!(
                "style.size must be between {MIN_SIZE} and {MAX_SIZE}, got {size}"
            )));
        }
        if let Some(margin) = self.style.margin
            && margin > MAX_MARGIN
        {
            return Err(ConfigError::Validation(format!(
                "style.margin must be at most {MAX_MARGIN}, got {margin}"
            )));
        }
        for (key, value) in [
            ("style.foreground", &self.style.foreground),
            ("style.background", &self.style.background),
        ] {
            if let Some(color) = value
                && parse_hex_color(color).is_none()
            {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a #rrggbb color, got '{color}'"
                )));
            }
        }
        Ok(())
    }

    /// Merge file values over the built-in defaults, reading the logo
    /// file if one is configured. `base_dir` anchors relative logo paths.
    pub fn render_options(&self, base_dir: &Path) -> Result<RenderOptions, ConfigError> {
        let defaults = RenderOptions::default();
        let logo = match &self.style.logo {
            Some(path) => {
                let resolved = if path.is_absolute() {
                    path.clone()
                } else {
                    base_dir.join(path)
                };
                Some(fs::read(resolved)?)
            }
            None => None,
        };
        Ok(RenderOptions {
            size: self.style.size.unwrap_or(defaults.size),
            foreground: self
                .style
                .foreground
                .clone()
                .unwrap_or(defaults.foreground),
            background: self
                .style
                .background
                .clone()
                .unwrap_or(defaults.background),
            ec_level: self.style.error_correction.unwrap_or(defaults.ec_level),
            margin: self.style.margin.unwrap_or(defaults.margin),
            dot_style: self.style.dot_style.unwrap_or(defaults.dot_style),
            logo,
        })
    }
}

/// The stock config with every option documented, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# qrsmith configuration
# All options are optional - defaults shown below.

# Output format: png | svg | pdf | jpeg
format = "png"

[style]
size = 300                # Output size in pixels (32-4096)
foreground = "#000000"    # Dark module color
background = "#ffffff"    # Background color
error_correction = "M"    # L | M | Q | H (higher survives more damage)
margin = 4                # Quiet zone width in modules
dot_style = "square"      # square | dots | rounded (raster formats only)
# logo = "logo.png"       # Overlay image, centered at 20% of the code.
                          # Use error_correction = "H" with a logo.
"##
}
