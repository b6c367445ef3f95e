//! Colours for the statistics scenes
//!
//! The demos use a small fixed vocabulary of colours: one per sigma
//! severity band, plus role colours for inliers, outliers, missing values,
//! box-plot parts and the regression exercise. [`Palette`] bundles them so a
//! front end can restyle every scene from config.

use serde::{Deserialize, Serialize};
use statsplay_stats::{EntryClass, Severity};

/// A color in RGBA format (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGB (alpha = 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Create a color from hex string (e.g., "#FF5733" or "FF5733")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::rgb8(r, g, b))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Fully transparent, for bodies that collide but are not drawn
    pub fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
}

/// Hex literal to colour; only used with the constants below
fn hex(code: u32) -> Color {
    Color::rgb8((code >> 16) as u8, (code >> 8) as u8, code as u8)
}

/// Role colours shared by all scenes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// |σ| <= 1
    pub near: Color,
    /// |σ| <= 2
    pub moderate: Color,
    /// |σ| <= 3
    pub far: Color,
    /// beyond 3σ
    pub extreme: Color,

    pub inlier: Color,
    pub outlier: Color,
    pub missing_fill: Color,
    pub missing_stroke: Color,
    pub mean: Color,
    pub median: Color,

    pub whisker: Color,
    pub quartile_box: Color,
    pub mean_marker: Color,
    pub box_outlier: Color,

    pub plane: Color,
    pub wall: Color,
    pub peg: Color,
    pub galton_ball: Color,

    pub data_point: Color,
    pub fit_match: Color,
    pub fit_miss: Color,
    pub fit_line: Color,
    pub axis: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            near: hex(0x4CAF50),
            moderate: hex(0xFFEB3B),
            far: hex(0xFF9800),
            extreme: hex(0xF44336),

            inlier: hex(0x9ACBD0),
            outlier: hex(0xCF0F47),
            missing_fill: Color::white(),
            missing_stroke: Color::black(),
            mean: hex(0xFFB433),
            median: hex(0x3A59D1),

            whisker: Color::black(),
            quartile_box: hex(0xFFA500),
            mean_marker: hex(0x800080),
            box_outlier: hex(0xFF0000),

            plane: hex(0xFFB433),
            wall: hex(0x808080),
            peg: hex(0x999999),
            galton_ball: hex(0x90EE90),

            data_point: hex(0xE53888),
            fit_match: hex(0x059212),
            fit_miss: hex(0xFF0B55),
            fit_line: Color::black(),
            axis: Color::black(),
        }
    }
}

impl Palette {
    /// Colour of a sigma severity band
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Near => self.near,
            Severity::Moderate => self.moderate,
            Severity::Far => self.far,
            Severity::Extreme => self.extreme,
        }
    }

    /// Fill colour of a classified sample entry
    pub fn entry(&self, class: EntryClass) -> Color {
        match class {
            EntryClass::Inlier => self.inlier,
            EntryClass::Outlier => self.outlier,
            EntryClass::Missing => self.missing_fill,
        }
    }

    /// Colour of the data points in the regression exercise
    pub fn fit_feedback(&self, matches: bool) -> Color {
        if matches {
            self.fit_match
        } else {
            self.fit_miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::from_hex("#4CAF50").unwrap();
        assert_eq!(color.to_hex(), "#4CAF50");
        assert_eq!(Color::from_hex("ffeb3b").unwrap().to_hex(), "#FFEB3B");
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn test_severity_colors() {
        let palette = Palette::default();
        assert_eq!(palette.severity(Severity::Near).to_hex(), "#4CAF50");
        assert_eq!(palette.severity(Severity::Moderate).to_hex(), "#FFEB3B");
        assert_eq!(palette.severity(Severity::Far).to_hex(), "#FF9800");
        assert_eq!(palette.severity(Severity::Extreme).to_hex(), "#F44336");
    }

    #[test]
    fn test_entry_colors() {
        let palette = Palette::default();
        assert_eq!(palette.entry(EntryClass::Outlier).to_hex(), "#CF0F47");
        assert_eq!(palette.entry(EntryClass::Missing), Color::white());
        assert_ne!(palette.fit_feedback(true), palette.fit_feedback(false));
    }
}
