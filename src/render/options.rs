//! Render option types shared by every item in a batch.
//!
//! One [`RenderOptions`] value styles an entire batch — only the per-item
//! text varies. Options are read-only during a run; nothing in the
//! pipeline mutates them.

use serde::{Deserialize, Serialize};

/// Supported output size range, in pixels.
pub const MIN_SIZE: u32 = 32;
pub const MAX_SIZE: u32 = 4096;
/// Largest accepted quiet zone, in modules.
pub const MAX_MARGIN: u32 = 32;

/// Output format for rendered codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
    Pdf,
    Jpeg,
}

impl OutputFormat {
    /// Lowercase file extension, used for archive entries and output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpeg => "jpeg",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(format!(
                "unknown format '{other}' (expected png, svg, pdf, or jpeg)"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// QR error-correction level. Higher levels survive more damage (and
/// logo overlay occlusion) at the cost of denser codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl std::str::FromStr for EcLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(format!(
                "unknown error-correction level '{other}' (expected L, M, Q, or H)"
            )),
        }
    }
}

/// How dark modules are painted in raster output.
///
/// SVG output always uses square modules; the dot style applies to the
/// PNG/JPEG/PDF raster path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotStyle {
    Square,
    Dots,
    Rounded,
}

impl std::str::FromStr for DotStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(DotStyle::Square),
            "dots" => Ok(DotStyle::Dots),
            "rounded" => Ok(DotStyle::Rounded),
            other => Err(format!(
                "unknown dot style '{other}' (expected square, dots, or rounded)"
            )),
        }
    }
}

/// Styling applied identically to every item in a batch.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Requested output size in pixels (longer edge). The raster path
    /// rounds down to a whole number of pixels per module, so the actual
    /// image may be slightly smaller.
    pub size: u32,
    /// Dark module color, `#rrggbb`.
    pub foreground: String,
    /// Background color, `#rrggbb`.
    pub background: String,
    pub ec_level: EcLevel,
    /// Quiet zone width in modules.
    pub margin: u32,
    pub dot_style: DotStyle,
    /// Optional logo (PNG/JPEG bytes) overlaid at the center, 20% of the
    /// image size, on a background-colored patch.
    pub logo: Option<Vec<u8>>,
}

impl RenderOptions {
    /// Check merged option values against the supported ranges. Called at
    /// the CLI seam so flag values get the same bounds as config files.
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(format!(
                "size must be between {MIN_SIZE} and {MAX_SIZE}, got {}",
                self.size
            ));
        }
        if self.margin > MAX_MARGIN {
            return Err(format!(
                "margin must be at most {MAX_MARGIN}, got {}",
                self.margin
            ));
        }
        for (name, value) in [
            ("foreground", &self.foreground),
            ("background", &self.background),
        ] {
            if parse_hex_color(value).is_none() {
                return Err(format!("{name} must be a #rrggbb color, got '{value}'"));
            }
        }
        Ok(())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            ec_level: EcLevel::M,
            margin: 4,
            dot_style: DotStyle::Square,
            logo: None,
        }
    }
}

/// Parse a `#rrggbb` hex color. Returns `None` for anything else —
/// callers decide whether that is a validation error or a render error.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_lowercase() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn ec_level_parses() {
        assert_eq!("h".parse::<EcLevel>().unwrap(), EcLevel::H);
        assert!("X".parse::<EcLevel>().is_err());
    }

    #[test]
    fn hex_color_valid() {
        assert_eq!(parse_hex_color("#000000"), Some([0, 0, 0]));
        assert_eq!(parse_hex_color("#ff8800"), Some([255, 136, 0]));
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
    }

    #[test]
    fn hex_color_invalid() {
        assert_eq!(parse_hex_color("000000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn validate_accepts_defaults_and_rejects_out_of_range_values() {
        assert!(RenderOptions::default().validate().is_ok());

        let huge_margin = RenderOptions {
            margin: u32::MAX,
            ..RenderOptions::default()
        };
        assert!(huge_margin.validate().unwrap_err().contains("margin"));

        let tiny = RenderOptions {
            size: 10,
            ..RenderOptions::default()
        };
        assert!(tiny.validate().unwrap_err().contains("size"));

        let bad_color = RenderOptions {
            background: "white".to_string(),
            ..RenderOptions::default()
        };
        assert!(bad_color.validate().unwrap_err().contains("#rrggbb"));
    }

    #[test]
    fn default_options_match_documented_defaults() {
        let opts = RenderOptions::default();
        assert_eq!(opts.size, 300);
        assert_eq!(opts.foreground, "#000000");
        assert_eq!(opts.background, "#ffffff");
        assert_eq!(opts.ec_level, EcLevel::M);
        assert_eq!(opts.margin, 4);
        assert_eq!(opts.dot_style, DotStyle::Square);
        assert!(opts.logo.is_none());
    }
}
