//! Configuration for statsplay-scene
//!
//! Canvas size, per-scene geometry and the colour palette. Every layout
//! function takes a `&SceneConfig`; nothing is read from process state.

use serde::{Deserialize, Serialize};

use crate::colormap::Palette;
use crate::error::{ConfigError, ConfigResult};

/// Scene-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    pub bell: BellConfig,
    pub box_plot: BoxPlotConfig,
    pub funnel: FunnelConfig,
    pub scatter: ScatterConfig,
    pub galton: GaltonConfig,
    pub generator: GeneratorConfig,
    pub palette: Palette,
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Thickness of the boundary walls
    pub wall_thickness: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 600.0,
            wall_thickness: 50.0,
        }
    }
}

/// Bell-curve bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BellConfig {
    pub num_bins: usize,
    /// Balls for a bin with probability 1
    pub total_balls: usize,
    pub ball_radius: f64,
    pub max_box_width: f64,
    pub max_box_height: f64,
    /// Screen x of the mean
    pub center_x: f64,
    /// Pixels between the mean and ±5σ
    pub half_width: f64,
    /// Screen y of the bin floors
    pub ground_y: f64,
    /// Thickness of the bin side walls
    pub side_wall: f64,
    /// Thickness of bin floors and roofs
    pub floor_height: f64,
}

impl Default for BellConfig {
    fn default() -> Self {
        Self {
            num_bins: 11,
            total_balls: 300,
            ball_radius: 8.0,
            max_box_width: 100.0,
            max_box_height: 300.0,
            center_x: 600.0,
            half_width: 500.0,
            ground_y: 580.0,
            side_wall: 10.0,
            floor_height: 20.0,
        }
    }
}

/// Box plot built from links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotConfig {
    pub x_start: f64,
    pub x_end: f64,
    /// Screen y of the plot axis
    pub y: f64,
    pub box_height: f64,
    pub whisker_thickness: f64,
    pub median_width: f64,
    /// How much taller the mean marker is than the box
    pub mean_marker_extra: f64,
    /// Link length between consecutive parts
    pub link_gap: f64,
    pub outlier_radius: f64,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            x_start: 150.0,
            x_end: 750.0,
            y: 150.0,
            box_height: 80.0,
            whisker_thickness: 8.0,
            median_width: 4.0,
            mean_marker_extra: 40.0,
            link_gap: 5.0,
            outlier_radius: 6.0,
        }
    }
}

/// Outlier funnel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    /// Pixels of radius per data unit
    pub scale: f64,
    /// Plane tilt in radians
    pub plane_angle: f64,
    /// Plane height as a fraction of the canvas height
    pub plane_y_fraction: f64,
    pub plane_thickness: f64,
    /// Missing balls are this much larger than the cutoff ball
    pub missing_radius_factor: f64,
    pub missing_stroke_width: f64,
    /// Floor on the radius of zero or negative values
    pub min_radius: f64,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            scale: 1.5,
            plane_angle: std::f64::consts::PI / 8.0,
            plane_y_fraction: 0.6,
            plane_thickness: 10.0,
            missing_radius_factor: 1.2,
            missing_stroke_width: 3.0,
            min_radius: 2.0,
        }
    }
}

/// Regression exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Margin between the canvas edge and the plot area
    pub margin: f64,
    pub point_radius: f64,
    pub line_thickness: f64,
    /// Tolerance on slope and intercept for a "good fit"
    pub match_epsilon: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            margin: 50.0,
            point_radius: 8.0,
            line_thickness: 6.0,
            match_epsilon: 0.1,
        }
    }
}

/// Galton board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaltonConfig {
    pub rows: usize,
    pub cols: usize,
    pub spacing: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub peg_radius: f64,
    /// Total width shared by the slots
    pub slot_span: f64,
    pub slot_wall_width: f64,
    pub slot_wall_height: f64,
    /// Screen y of the slot floor
    pub base_y: f64,
    pub ball_radius: f64,
    /// Screen x around which balls are dropped
    pub drop_x: f64,
    /// Balls are dropped uniformly within ±`drop_spread / 2` of `drop_x`
    pub drop_spread: f64,
    pub drop_y: f64,
    pub balls: usize,
    /// Width between the board side walls
    pub board_width: f64,
    pub side_wall_width: f64,
    pub floor_height: f64,
}

impl Default for GaltonConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 15,
            spacing: 50.0,
            offset_x: 150.0,
            offset_y: 100.0,
            peg_radius: 5.0,
            slot_span: 600.0,
            slot_wall_width: 5.0,
            slot_wall_height: 150.0,
            base_y: 590.0,
            ball_radius: 5.0,
            drop_x: 450.0,
            drop_spread: 100.0,
            drop_y: 50.0,
            balls: 300,
            board_width: 900.0,
            side_wall_width: 20.0,
            floor_height: 10.0,
        }
    }
}

/// Seeded sample generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub total: usize,
    pub outlier_pct: f64,
    pub missing_pct: f64,
    pub pairs: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            total: 100,
            outlier_pct: 0.05,
            missing_pct: 0.05,
            pairs: 20,
        }
    }
}

fn positive(name: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn fraction(name: &str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )))
    }
}

impl SceneConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("canvas.wall_thickness", self.canvas.wall_thickness)?;

        let bell = &self.bell;
        if bell.num_bins == 0 {
            return Err(ConfigError::OutOfRange(
                "bell.num_bins must be positive".to_string(),
            ));
        }
        positive("bell.ball_radius", bell.ball_radius)?;
        positive("bell.max_box_width", bell.max_box_width)?;
        positive("bell.max_box_height", bell.max_box_height)?;
        positive("bell.half_width", bell.half_width)?;

        let bp = &self.box_plot;
        if !(bp.x_end > bp.x_start) {
            return Err(ConfigError::OutOfRange(
                "box_plot.x_end must be greater than box_plot.x_start".to_string(),
            ));
        }
        positive("box_plot.box_height", bp.box_height)?;
        positive("box_plot.outlier_radius", bp.outlier_radius)?;

        let funnel = &self.funnel;
        positive("funnel.scale", funnel.scale)?;
        positive("funnel.min_radius", funnel.min_radius)?;
        fraction("funnel.plane_y_fraction", funnel.plane_y_fraction)?;
        if !(funnel.plane_angle.abs() < std::f64::consts::FRAC_PI_2) {
            return Err(ConfigError::OutOfRange(
                "funnel.plane_angle must be strictly between -π/2 and π/2".to_string(),
            ));
        }

        let scatter = &self.scatter;
        let short_side = self.canvas.width.min(self.canvas.height);
        if !(scatter.margin >= 0.0) || 2.0 * scatter.margin >= short_side {
            return Err(ConfigError::OutOfRange(
                "scatter.margin must leave a non-empty plot area".to_string(),
            ));
        }
        if !(scatter.match_epsilon >= 0.0) {
            return Err(ConfigError::OutOfRange(
                "scatter.match_epsilon must be non-negative".to_string(),
            ));
        }

        let galton = &self.galton;
        if galton.rows == 0 || galton.cols == 0 {
            return Err(ConfigError::OutOfRange(
                "galton.rows and galton.cols must be positive".to_string(),
            ));
        }
        positive("galton.spacing", galton.spacing)?;
        positive("galton.slot_span", galton.slot_span)?;

        let generator = &self.generator;
        fraction("generator.outlier_pct", generator.outlier_pct)?;
        fraction("generator.missing_pct", generator.missing_pct)?;
        if generator.outlier_pct + generator.missing_pct > 1.0 {
            return Err(ConfigError::OutOfRange(
                "generator.outlier_pct + generator.missing_pct must not exceed 1.0".to_string(),
            ));
        }

        Ok(())
    }
}
