//! Bell-curve bins filled with balls
//!
//! Each bin of the distribution becomes an open-topped container whose
//! height and ball count follow the bin probability. Balls are coloured by
//! how many standard deviations the bin sits from the mean.

use rand::Rng;
use serde::{Deserialize, Serialize};
use statsplay_stats::{bins, Bin, DistributionParams, SIGMA_RANGE};

use crate::body::{Body, BodyKind, Point, Scene, Style};
use crate::colormap::Color;
use crate::config::{BellConfig, SceneConfig};
use crate::error::SceneResult;

const MEAN_LINE_HEIGHT: f64 = 500.0;

/// Screen geometry of one bin container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinBox {
    pub bin: Bin,
    /// Screen x of the container centre
    pub x: f64,
    pub width: f64,
    pub height: f64,
    /// Screen y of the container top
    pub top: f64,
    pub balls: usize,
}

impl BinBox {
    /// Place a bin on screen
    ///
    /// Width shrinks linearly towards ±5σ and grows slightly with the
    /// standard deviation; height and ball count are proportional to the
    /// bin probability.
    pub fn layout(bin: Bin, std_dev: f64, cfg: &BellConfig) -> Self {
        let x = cfg.center_x + bin.sigma * cfg.half_width / SIGMA_RANGE;
        let width =
            cfg.max_box_width * (1.0 - bin.sigma.abs() / SIGMA_RANGE) * (0.9 + 0.1 * std_dev);
        let height = cfg.max_box_height * bin.probability;
        let balls = (bin.probability * cfg.total_balls as f64).round() as usize;
        Self {
            bin,
            x,
            width,
            height,
            top: cfg.ground_y - height,
            balls,
        }
    }
}

/// Containers for every bin of a distribution
pub fn bin_boxes(params: &DistributionParams, cfg: &BellConfig) -> SceneResult<Vec<BinBox>> {
    Ok(bins(params, cfg.num_bins)?
        .into_iter()
        .map(|bin| BinBox::layout(bin, params.std_dev, cfg))
        .collect())
}

/// Build the bell-curve scene, scattering balls with `rng`
pub fn bell_curve<R: Rng>(
    config: &SceneConfig,
    params: &DistributionParams,
    rng: &mut R,
) -> SceneResult<Scene> {
    let cfg = &config.bell;
    let palette = &config.palette;
    let boxes = bin_boxes(params, cfg)?;

    let mut scene = Scene::new(config.canvas.width, config.canvas.height);
    let wall = Style::fill(Color::white());
    let ball_stroke = Color::rgb8(0xCC, 0xCC, 0xCC);

    for b in &boxes {
        let mid_y = b.top + b.height / 2.0;
        let side = |x: f64| {
            Body::rectangle(BodyKind::BinWall, Point::new(x, mid_y), cfg.side_wall, b.height, wall)
                .fixed()
        };
        let floor = |y: f64| {
            Body::rectangle(BodyKind::BinWall, Point::new(b.x, y), b.width, cfg.floor_height, wall)
                .fixed()
        };
        scene.extend([
            side(b.x - b.width / 2.0),
            side(b.x + b.width / 2.0),
            floor(cfg.ground_y),
            floor(b.top - cfg.floor_height / 2.0),
        ]);

        let style = Style::outlined(palette.severity(b.bin.severity), ball_stroke, 1.0);
        let x_span = (b.width - 2.0 * cfg.ball_radius).max(0.0);
        let y_pad = cfg.floor_height.min(b.height / 2.0);
        let y_span = b.height - 2.0 * y_pad;
        for _ in 0..b.balls {
            let x = b.x + (rng.gen::<f64>() - 0.5) * x_span;
            let y = b.top + y_pad + rng.gen::<f64>() * y_span;
            let angle = rng.gen::<f64>() * std::f64::consts::PI;
            scene.push(
                Body::circle(BodyKind::BinBall, Point::new(x, y), cfg.ball_radius, style)
                    .rotated(angle)
                    .with_value(b.bin.center),
            );
        }
    }

    scene.push(
        Body::rectangle(
            BodyKind::Mean,
            Point::new(cfg.center_x, cfg.ground_y - 150.0),
            2.0,
            MEAN_LINE_HEIGHT,
            Style::fill(palette.axis),
        )
        .fixed()
        .with_value(params.mean),
    );
    scene.push(
        Body::rectangle(
            BodyKind::Wall,
            Point::new(config.canvas.width / 2.0, cfg.ground_y + 20.0),
            config.canvas.width,
            40.0,
            Style::hidden(),
        )
        .fixed(),
    );

    tracing::debug!(
        "Built bell curve: {} bins, {} balls",
        boxes.len(),
        scene.count_of(BodyKind::BinBall)
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use statsplay_stats::Severity;

    #[test]
    fn test_centre_bin_geometry() {
        let cfg = BellConfig::default();
        let boxes = bin_boxes(&DistributionParams::standard(), &cfg).unwrap();
        assert_eq!(boxes.len(), 11);

        let centre = &boxes[5];
        assert!(centre.bin.sigma.abs() < 1e-12);
        assert!((centre.x - 600.0).abs() < 1e-9);
        assert!((centre.width - 100.0).abs() < 1e-9);
        assert!((centre.height - 300.0).abs() < 1e-6);
        assert_eq!(centre.balls, 300);
        assert_eq!(centre.bin.severity, Severity::Near);
    }

    #[test]
    fn test_edge_bins_are_narrow_and_low() {
        let cfg = BellConfig::default();
        let boxes = bin_boxes(&DistributionParams::standard(), &cfg).unwrap();
        let edge = &boxes[0];
        assert!(edge.x < 150.0);
        assert!(edge.width < 10.0);
        assert_eq!(edge.balls, 0);
        assert_eq!(edge.bin.severity, Severity::Extreme);
    }

    #[test]
    fn test_ball_counts_follow_probability() {
        let config = SceneConfig::default();
        let params = DistributionParams::gaussian(10.0, 2.0);
        let mut rng = StdRng::seed_from_u64(1);
        let scene = bell_curve(&config, &params, &mut rng).unwrap();

        let boxes = bin_boxes(&params, &config.bell).unwrap();
        let expected: usize = boxes.iter().map(|b| b.balls).sum();
        assert_eq!(scene.count_of(BodyKind::BinBall), expected);
        assert_eq!(scene.count_of(BodyKind::BinWall), 4 * 11);
        assert_eq!(scene.count_of(BodyKind::Mean), 1);
    }

    #[test]
    fn test_balls_start_inside_their_bin() {
        let config = SceneConfig::default();
        let params = DistributionParams::standard();
        let mut rng = StdRng::seed_from_u64(2);
        let scene = bell_curve(&config, &params, &mut rng).unwrap();

        let boxes = bin_boxes(&params, &config.bell).unwrap();
        for ball in scene.bodies_of(BodyKind::BinBall) {
            let b = boxes
                .iter()
                .find(|b| Some(b.bin.center) == ball.value)
                .unwrap();
            assert!((ball.position.x - b.x).abs() <= b.width / 2.0);
            assert!(ball.position.y >= b.top && ball.position.y <= config.bell.ground_y);
        }
    }

    #[test]
    fn test_skewed_bins_stay_within_limits() {
        let cfg = BellConfig::default();
        let params = DistributionParams::standard().with_skew(4.0);
        let boxes = bin_boxes(&params, &cfg).unwrap();
        for b in &boxes {
            assert!(b.height <= cfg.max_box_height);
            assert!(b.balls <= cfg.total_balls);
        }
        // the tallest bin sits right of the mean
        let tallest = boxes
            .iter()
            .max_by(|a, b| a.height.total_cmp(&b.height))
            .unwrap();
        assert!(tallest.bin.sigma > 0.0);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = SceneConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let params = DistributionParams::gaussian(0.0, 0.0);
        assert!(bell_curve(&config, &params, &mut rng).is_err());
    }
}
