//! Box plot built from linked bodies
//!
//! The plot is a chain of five parts (lower whisker, lower box, median
//! bar, upper box, upper whisker) joined end to end by short links, plus a
//! mean marker linked to the nearest part. Outliers are loose circles.

use serde::{Deserialize, Serialize};
use statsplay_stats::{classify, mean, FiveNumberSummary};

use crate::body::{Body, BodyKind, Link, Point, Scene, Style};
use crate::config::SceneConfig;
use crate::error::{SceneError, SceneResult};

/// Numbers a box plot is drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStats {
    /// Whisker ends and quartiles
    pub summary: FiveNumberSummary,
    pub mean: f64,
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl BoxPlotStats {
    /// Quartiles, inlier whiskers, mean and outliers of raw observations
    ///
    /// When every value is an outlier the whiskers collapse onto the
    /// quartiles.
    pub fn from_observations(data: &[f64]) -> SceneResult<Self> {
        let report = classify(data)?;
        let (lo, hi) = report.inlier_range().unwrap_or_else(|| {
            tracing::debug!("No inliers, whiskers fall back to the quartiles");
            (report.q1, report.q3)
        });
        // An interpolated quartile can lie outside the extreme inlier
        let summary = FiveNumberSummary::new(
            lo.min(report.q1),
            report.q1,
            report.median,
            report.q3,
            hi.max(report.q3),
        )?;
        Ok(Self {
            summary,
            mean: mean(data)?,
            outliers: report.outliers,
        })
    }

    /// Plot a given five-number summary; the mean is that of the five values
    pub fn from_summary(summary: FiveNumberSummary) -> SceneResult<Self> {
        Ok(Self {
            summary,
            mean: mean(&summary.to_array())?,
            outliers: Vec::new(),
        })
    }
}

/// Linear map from data units onto `[x_start, x_end]`
struct Axis {
    origin: f64,
    min: f64,
    scale: f64,
}

impl Axis {
    fn x(&self, value: f64) -> f64 {
        self.origin + (value - self.min) * self.scale
    }

    fn width(&self, from: f64, to: f64) -> f64 {
        (to - from) * self.scale
    }
}

/// Build the box plot scene
pub fn box_plot(config: &SceneConfig, stats: &BoxPlotStats) -> SceneResult<Scene> {
    let cfg = &config.box_plot;
    let palette = &config.palette;
    let s = &stats.summary;

    if !(s.range() > 0.0) {
        return Err(SceneError::Layout(
            "box plot needs whisker ends that differ".to_string(),
        ));
    }
    let axis = Axis {
        origin: cfg.x_start,
        min: s.min,
        scale: (cfg.x_end - cfg.x_start) / s.range(),
    };

    let mut scene = Scene::new(config.canvas.width, config.canvas.height);
    scene.add_boundary_walls(config.canvas.wall_thickness, palette.wall);

    let outline = |fill| Style::outlined(fill, palette.whisker, 2.0);
    let centred = |from: f64, to: f64| Point::new(axis.x(from) + axis.width(from, to) / 2.0, cfg.y);

    let chain = [
        Body::rectangle(
            BodyKind::Whisker,
            centred(s.min, s.q1),
            axis.width(s.min, s.q1),
            cfg.whisker_thickness,
            outline(palette.whisker),
        )
        .with_label(format!("Min: {}", s.min))
        .with_value(s.min),
        Body::rectangle(
            BodyKind::QuartileBox,
            centred(s.q1, s.median),
            axis.width(s.q1, s.median),
            cfg.box_height,
            outline(palette.quartile_box),
        )
        .with_label(format!("Q1: {}", s.q1))
        .with_value(s.q1),
        Body::rectangle(
            BodyKind::MedianBar,
            Point::new(axis.x(s.median), cfg.y),
            cfg.median_width,
            cfg.box_height,
            outline(palette.whisker),
        )
        .with_label(format!("Median: {}", s.median))
        .with_value(s.median),
        Body::rectangle(
            BodyKind::QuartileBox,
            centred(s.median, s.q3),
            axis.width(s.median, s.q3),
            cfg.box_height,
            outline(palette.quartile_box),
        )
        .with_label(format!("Q3: {}", s.q3))
        .with_value(s.q3),
        Body::rectangle(
            BodyKind::Whisker,
            centred(s.q3, s.max),
            axis.width(s.q3, s.max),
            cfg.whisker_thickness,
            outline(palette.whisker),
        )
        .with_label(format!("Max: {}", s.max))
        .with_value(s.max),
    ];

    let mut indices = Vec::with_capacity(chain.len());
    for part in chain {
        indices.push(scene.push(part));
    }
    for pair in indices.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let half_a = scene.bodies[a].shape.width() / 2.0;
        let half_b = scene.bodies[b].shape.width() / 2.0;
        scene.link(Link {
            body_a: a,
            body_b: b,
            anchor_a: Point::new(half_a, 0.0),
            anchor_b: Point::new(-half_b, 0.0),
            length: cfg.link_gap,
        });
    }

    let mean_x = axis.x(stats.mean);
    let nearest = indices
        .iter()
        .copied()
        .min_by(|&a, &b| {
            let da = (scene.bodies[a].position.x - mean_x).abs();
            let db = (scene.bodies[b].position.x - mean_x).abs();
            da.total_cmp(&db)
        })
        .ok_or_else(|| SceneError::Layout("box plot has no parts".to_string()))?;
    let mean_idx = scene.push(
        Body::rectangle(
            BodyKind::MeanMarker,
            Point::new(mean_x, cfg.y),
            cfg.median_width,
            cfg.box_height + cfg.mean_marker_extra,
            outline(palette.mean_marker),
        )
        .with_label(format!("Mean: {}", stats.mean))
        .with_value(stats.mean),
    );
    scene.link(Link {
        body_a: nearest,
        body_b: mean_idx,
        anchor_a: Point::default(),
        anchor_b: Point::default(),
        length: cfg.link_gap,
    });

    for &value in &stats.outliers {
        scene.push(
            Body::circle(
                BodyKind::Outlier,
                Point::new(axis.x(value), cfg.y),
                cfg.outlier_radius,
                Style::fill(palette.box_outlier),
            )
            .with_value(value),
        );
    }

    tracing::debug!(
        "Built box plot: {} parts, {} outliers",
        indices.len() + 1,
        stats.outliers.len()
    );
    Ok(scene)
}
