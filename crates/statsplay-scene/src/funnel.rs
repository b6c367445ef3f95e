//! Outlier funnel
//!
//! Every sample entry becomes a ball whose radius is proportional to its
//! value. Two tilted planes leave a gap exactly as wide as the ball of the
//! upper fence, so ordinary values fall through and outliers get stuck.
//! Missing entries are drawn slightly larger than the gap.

use serde::{Deserialize, Serialize};
use statsplay_stats::{classify_entries, EntryClass, SampleEntry, SummaryStats};

use crate::body::{Body, BodyKind, Point, Scene, Style};
use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};

/// Clearance between a ball and the plane it rests on
const PLANE_CLEARANCE: f64 = 2.0;

/// Funnel dimensions derived from a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelGeometry {
    /// Upper fence of the numeric entries
    pub cutoff: f64,
    /// Width of the opening between the planes
    pub gap: f64,
    /// Horizontal extent of each plane
    pub half_span: f64,
    /// Length of each plane along its slope
    pub plane_length: f64,
    /// Screen y of the planes at the canvas centre
    pub plane_y: f64,
    pub angle: f64,
}

impl FunnelGeometry {
    pub fn new(cutoff: f64, config: &SceneConfig) -> SceneResult<Self> {
        let cfg = &config.funnel;
        let width = config.canvas.width;
        let gap = 2.0 * cutoff * cfg.scale;
        if !(gap > 0.0) || gap >= width {
            return Err(SceneError::Layout(format!(
                "funnel gap {:.1} does not fit a canvas {} wide",
                gap, width
            )));
        }

        let half_span = (width - gap) / 2.0;
        Ok(Self {
            cutoff,
            gap,
            half_span,
            plane_length: half_span / cfg.plane_angle.cos(),
            plane_y: config.canvas.height * cfg.plane_y_fraction,
            angle: cfg.plane_angle,
        })
    }

    /// Screen x where the right plane starts
    pub fn right_start(&self) -> f64 {
        self.half_span + self.gap
    }

    /// Surface height at `x` on the left (`true`) or right plane
    pub fn surface_y(&self, x: f64, left: bool, canvas_width: f64) -> f64 {
        let angle = if left { self.angle } else { -self.angle };
        self.plane_y + (x - canvas_width / 2.0) * angle.tan()
    }
}

/// Build the funnel scene for a sample with missing markers
///
/// Entries are laid out in input order: the first half (rounded up) along
/// the left plane, the rest along the right plane.
pub fn funnel(config: &SceneConfig, entries: &[SampleEntry]) -> SceneResult<Scene> {
    let cfg = &config.funnel;
    let palette = &config.palette;
    let (w, h) = (config.canvas.width, config.canvas.height);

    let report = classify_entries(entries)?;
    let summary = SummaryStats::from_entries(entries)?;
    let geometry = FunnelGeometry::new(report.numeric.upper_bound(), config)?;

    let mut scene = Scene::new(w, h);
    let plane_style = Style::fill(palette.plane);
    let left_x = geometry.half_span / 2.0;
    let right_x = geometry.right_start() + geometry.half_span / 2.0;
    scene.extend([
        Body::rectangle(
            BodyKind::Plane,
            Point::new(left_x, geometry.surface_y(left_x, true, w)),
            geometry.plane_length,
            cfg.plane_thickness,
            plane_style,
        )
        .fixed()
        .rotated(geometry.angle),
        Body::rectangle(
            BodyKind::Plane,
            Point::new(right_x, geometry.surface_y(right_x, false, w)),
            geometry.plane_length,
            cfg.plane_thickness,
            plane_style,
        )
        .fixed()
        .rotated(-geometry.angle),
    ]);
    scene.add_boundary_walls(config.canvas.wall_thickness, palette.wall);

    let mean_radius = (summary.mean * cfg.scale).max(cfg.min_radius);
    let median_radius = (summary.median * cfg.scale).max(cfg.min_radius);
    let (mean_at, median_at) = (Point::new(w * 0.2, h * 0.2), Point::new(w * 0.8, h * 0.2));
    scene.extend([
        Body::circle(BodyKind::Mean, mean_at, mean_radius, Style::fill(palette.mean))
            .with_label(format!("Mean: {:.2}", summary.mean))
            .with_value(summary.mean),
        Body::circle(BodyKind::Median, median_at, median_radius, Style::fill(palette.median))
            .with_label(format!("Median: {:.2}", summary.median))
            .with_value(summary.median),
    ]);

    let n = entries.len();
    let left_count = n.div_ceil(2);
    let missing_radius = geometry.cutoff * cfg.scale * cfg.missing_radius_factor;
    let missing_style = Style::outlined(
        palette.missing_fill,
        palette.missing_stroke,
        cfg.missing_stroke_width,
    );
    for (i, (entry, class)) in entries.iter().zip(&report.classes).enumerate() {
        let left = i < left_count;
        let (slot, count) = if left {
            (i, left_count)
        } else {
            (i - left_count, n - left_count)
        };
        let frac = if count > 1 {
            slot as f64 / (count - 1) as f64
        } else {
            0.5
        };
        let x = if left {
            frac * geometry.half_span
        } else {
            geometry.right_start() + frac * geometry.half_span
        };

        let body = match (entry, class) {
            (SampleEntry::Missing, _) => {
                let y = geometry.surface_y(x, left, w) - missing_radius - PLANE_CLEARANCE;
                Body::circle(
                    BodyKind::Missing,
                    Point::new(x, y),
                    missing_radius,
                    missing_style,
                )
                .with_label("Null")
            }
            (SampleEntry::Value(v), class) => {
                let r = (v * cfg.scale).max(cfg.min_radius);
                let y = geometry.surface_y(x, left, w) - r - PLANE_CLEARANCE;
                let kind = if *class == EntryClass::Outlier {
                    BodyKind::Outlier
                } else {
                    BodyKind::Inlier
                };
                let style = Style::fill(palette.entry(*class));
                let ball = Body::circle(kind, Point::new(x, y), r, style).with_value(*v);
                if kind == BodyKind::Outlier {
                    ball.with_label(format!("Outlier: {:.2}", v))
                } else {
                    ball
                }
            }
        };
        scene.push(body.with_data_index(i));
    }

    tracing::debug!(
        "Built funnel: cutoff={:.2} gap={:.1}, {} inliers, {} outliers, {} missing",
        geometry.cutoff,
        geometry.gap,
        report.count_of(EntryClass::Inlier),
        report.count_of(EntryClass::Outlier),
        report.missing
    );
    Ok(scene)
}
