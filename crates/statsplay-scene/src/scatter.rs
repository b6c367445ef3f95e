//! Regression exercise: scatter points and a movable line
//!
//! The user drags and rotates a line body over a scatter plot. The line
//! pose converts to a `(slope, intercept)` in data units, which is scored
//! against the least squares fit.

use serde::{Deserialize, Serialize};
use statsplay_stats::{fit, line_metrics, matches_fit, mean, FitResult, StatsError};

use crate::body::{Body, BodyKind, Point, Scene, Style};
use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};

/// Number of tick intervals per axis
pub const TICK_INTERVALS: usize = 5;

/// Mapping between data units and screen pixels
///
/// Screen y grows downwards, so data y is flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotFrame {
    pub margin: f64,
    pub width: f64,
    pub height: f64,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Pixels per data unit along x
    pub scale_x: f64,
    /// Pixels per data unit along y
    pub scale_y: f64,
}

impl PlotFrame {
    /// Fit the data bounds into the canvas minus a margin on every side
    pub fn new(x: &[f64], y: &[f64], margin: f64, width: f64, height: f64) -> SceneResult<Self> {
        if x.len() != y.len() {
            return Err(StatsError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            }
            .into());
        }
        let (min_x, max_x) = bounds(x)?;
        let (min_y, max_y) = bounds(y)?;
        if !(max_x > min_x) || !(max_y > min_y) {
            return Err(SceneError::Layout(
                "scatter data needs a non-zero range on both axes".to_string(),
            ));
        }
        Ok(Self {
            margin,
            width,
            height,
            min_x,
            max_x,
            min_y,
            max_y,
            scale_x: (width - 2.0 * margin) / (max_x - min_x),
            scale_y: (height - 2.0 * margin) / (max_y - min_y),
        })
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Point {
        Point::new(
            self.margin + (x - self.min_x) * self.scale_x,
            self.height - self.margin - (y - self.min_y) * self.scale_y,
        )
    }

    pub fn to_data(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.margin) / self.scale_x + self.min_x,
            (self.height - self.margin - p.y) / self.scale_y + self.min_y,
        )
    }

    /// Evenly spaced ticks along x, from `min_x` to `max_x`
    pub fn x_ticks(&self) -> Vec<Tick> {
        let span = self.width - 2.0 * self.margin;
        (0..=TICK_INTERVALS)
            .map(|i| {
                let f = i as f64 / TICK_INTERVALS as f64;
                Tick::new(
                    self.margin + f * span,
                    self.min_x + f * (self.max_x - self.min_x),
                )
            })
            .collect()
    }

    /// Evenly spaced ticks along y, from `min_y` (bottom) to `max_y`
    pub fn y_ticks(&self) -> Vec<Tick> {
        let span = self.height - 2.0 * self.margin;
        (0..=TICK_INTERVALS)
            .map(|i| {
                let f = i as f64 / TICK_INTERVALS as f64;
                Tick::new(
                    self.height - self.margin - f * span,
                    self.min_y + f * (self.max_y - self.min_y),
                )
            })
            .collect()
    }
}

fn bounds(values: &[f64]) -> SceneResult<(f64, f64)> {
    if values.is_empty() {
        return Err(StatsError::EmptySample.into());
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((min, max))
}

/// Axis tick: screen coordinate along its axis and the data value there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub screen: f64,
    pub value: f64,
    pub label: String,
}

impl Tick {
    fn new(screen: f64, value: f64) -> Self {
        Self {
            screen,
            value,
            label: format!("{:.2}", value),
        }
    }
}

/// Position and rotation of the line body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePose {
    pub center: Point,
    /// Rotation in radians, positive clockwise on screen
    pub angle: f64,
}

impl LinePose {
    /// Slope and intercept in data units
    pub fn to_line(&self, frame: &PlotFrame) -> (f64, f64) {
        let (x0, y0) = frame.to_data(self.center);
        let slope = -(frame.scale_x / frame.scale_y) * self.angle.tan();
        (slope, y0 - slope * x0)
    }

    /// Pose of a line through the data point at `anchor_x`
    pub fn from_line(slope: f64, intercept: f64, anchor_x: f64, frame: &PlotFrame) -> Self {
        Self {
            center: frame.to_screen(anchor_x, slope * anchor_x + intercept),
            angle: -(slope * frame.scale_y / frame.scale_x).atan(),
        }
    }
}

/// Pose of the least squares line, centred on the mean of x
pub fn best_fit_pose(
    x: &[f64],
    y: &[f64],
    frame: &PlotFrame,
) -> SceneResult<(LinePose, FitResult)> {
    let result = fit(x, y)?;
    let pose = LinePose::from_line(result.slope, result.intercept, mean(x)?, frame);
    Ok((pose, result))
}

/// How a user-placed line compares with the least squares line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitFeedback {
    pub slope: f64,
    pub intercept: f64,
    /// Goodness of fit of the user's line
    pub metrics: FitResult,
    /// Slope and intercept both within the tolerance of the optimum
    pub matches: bool,
}

/// Score a line pose against the data
pub fn fit_feedback(
    pose: &LinePose,
    x: &[f64],
    y: &[f64],
    frame: &PlotFrame,
    epsilon: f64,
) -> SceneResult<FitFeedback> {
    let (slope, intercept) = pose.to_line(frame);
    let metrics = line_metrics(slope, intercept, x, y)?;
    let matches = matches_fit(slope, intercept, x, y, epsilon)?;
    Ok(FitFeedback {
        slope,
        intercept,
        metrics,
        matches,
    })
}

/// Scatter scene with axes, points and a horizontal line at the mean of y
pub fn scatter(config: &SceneConfig, x: &[f64], y: &[f64]) -> SceneResult<(Scene, PlotFrame)> {
    let cfg = &config.scatter;
    let palette = &config.palette;
    let (w, h, m) = (config.canvas.width, config.canvas.height, cfg.margin);
    let frame = PlotFrame::new(x, y, m, w, h)?;

    let mut scene = Scene::new(w, h);
    let axis = Style::fill(palette.axis);
    scene.extend([
        Body::rectangle(BodyKind::Axis, Point::new(w / 2.0, h - m), w - 2.0 * m, 2.0, axis).fixed(),
        Body::rectangle(BodyKind::Axis, Point::new(m, h / 2.0), 2.0, h - 2.0 * m, axis).fixed(),
    ]);

    for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
        scene.push(
            Body::circle(
                BodyKind::DataPoint,
                frame.to_screen(xi, yi),
                cfg.point_radius,
                Style::fill(palette.data_point),
            )
            .fixed()
            .with_label(format!("({:.2}, {:.2})", xi, yi))
            .with_data_index(i),
        );
    }

    let mean_y = mean(y)?;
    scene.push(
        Body::rectangle(
            BodyKind::FitLine,
            Point::new(w / 2.0, frame.to_screen(frame.min_x, mean_y).y),
            w - 2.0 * m,
            cfg.line_thickness,
            Style::fill(palette.fit_line),
        )
        .with_value(mean_y),
    );

    tracing::debug!("Built scatter: {} points", x.len());
    Ok((scene, frame))
}

/// Recolour the data points by whether the line matches the fit
pub fn apply_fit_colors(scene: &mut Scene, config: &SceneConfig, matches: bool) {
    let color = config.palette.fit_feedback(matches);
    for body in scene.bodies.iter_mut().filter(|b| b.kind == BodyKind::DataPoint) {
        body.style.fill = color;
    }
}
