//! Galton board
//!
//! Pegs in staggered rows above a row of slots. Alongside the scene, the
//! board has an idealised model: each ball bounces left or right with
//! equal chance at every row, so slot `k` of `rows + 1` is reached with
//! probability `C(rows, k) / 2^rows`.

use rand::Rng;
use statrs::function::factorial::ln_binomial;

use crate::body::{Body, BodyKind, Point, Scene, Style};
use crate::config::{GaltonConfig, SceneConfig};
use crate::error::{SceneError, SceneResult};

/// Peg centres, row by row; odd rows are shifted by half a spacing
pub fn peg_positions(cfg: &GaltonConfig) -> Vec<Point> {
    let mut pegs = Vec::with_capacity(cfg.rows * cfg.cols);
    for row in 0..cfg.rows {
        let shift = if row % 2 == 1 { cfg.spacing / 2.0 } else { 0.0 };
        for col in 0..cfg.cols {
            pegs.push(Point::new(
                cfg.offset_x + col as f64 * cfg.spacing + shift,
                cfg.offset_y + row as f64 * cfg.spacing,
            ));
        }
    }
    pegs
}

/// Screen x of every slot divider, left to right
pub fn slot_wall_positions(cfg: &GaltonConfig) -> Vec<f64> {
    let slots = cfg.cols + 1;
    let slot_width = cfg.slot_span / slots as f64;
    let first = cfg.offset_x - cfg.spacing / 2.0;
    (0..=slots).map(|i| first + i as f64 * slot_width).collect()
}

/// Build the Galton board, dropping `cfg.balls` balls around the chute
pub fn galton_board<R: Rng>(config: &SceneConfig, rng: &mut R) -> SceneResult<Scene> {
    let cfg = &config.galton;
    let palette = &config.palette;
    if cfg.rows == 0 || cfg.cols == 0 {
        return Err(SceneError::InvalidParameter {
            name: "galton",
            reason: "rows and cols must be positive".to_string(),
        });
    }

    let (w, h) = (cfg.board_width, config.canvas.height);
    let mut scene = Scene::new(w, h);
    let wall = Style::fill(palette.wall);
    let floor_y = cfg.base_y + cfg.floor_height / 2.0;
    let side = |x: f64| {
        Body::rectangle(BodyKind::Wall, Point::new(x, h / 2.0), cfg.side_wall_width, h, wall)
            .fixed()
    };
    scene.extend([
        Body::rectangle(BodyKind::Wall, Point::new(w / 2.0, floor_y), w, cfg.floor_height, wall)
            .fixed(),
        side(0.0),
        side(w),
    ]);

    let peg_style = Style::fill(palette.peg);
    scene.extend(
        peg_positions(cfg)
            .into_iter()
            .map(|p| Body::circle(BodyKind::Peg, p, cfg.peg_radius, peg_style).fixed()),
    );

    let divider_y = cfg.base_y - cfg.slot_wall_height / 2.0;
    scene.extend(slot_wall_positions(cfg).into_iter().map(|x| {
        Body::rectangle(
            BodyKind::BinWall,
            Point::new(x, divider_y),
            cfg.slot_wall_width,
            cfg.slot_wall_height,
            wall,
        )
        .fixed()
    }));

    let ball_style = Style::fill(palette.galton_ball);
    for _ in 0..cfg.balls {
        let x = cfg.drop_x + (rng.gen::<f64>() - 0.5) * cfg.drop_spread;
        scene.push(Body::circle(
            BodyKind::BinBall,
            Point::new(x, cfg.drop_y),
            cfg.ball_radius,
            ball_style,
        ));
    }

    tracing::debug!(
        "Built Galton board: {} pegs, {} slots, {} balls",
        cfg.rows * cfg.cols,
        cfg.cols + 1,
        cfg.balls
    );
    Ok(scene)
}

/// Probability of each of the `rows + 1` slots in the idealised board
pub fn slot_probabilities(rows: usize) -> Vec<f64> {
    let n = rows as u64;
    let ln_norm = rows as f64 * std::f64::consts::LN_2;
    (0..=n).map(|k| (ln_binomial(n, k) - ln_norm).exp()).collect()
}

/// Drop `balls` balls through `rows` rows of the idealised board
///
/// Returns the number of balls per slot, `rows + 1` slots in all.
pub fn simulate_drop<R: Rng>(rows: usize, balls: usize, rng: &mut R) -> Vec<usize> {
    let mut counts = vec![0usize; rows + 1];
    for _ in 0..balls {
        let slot = (0..rows).filter(|_| rng.gen_bool(0.5)).count();
        counts[slot] += 1;
    }
    counts
}
