//! statsplay-scene - Physics scene descriptions for the statistics demos
//!
//! Turns the numbers from `statsplay-stats` into bodies a 2D physics front
//! end can drop onto a canvas:
//!
//! - **Bell curve**: distribution bins as containers filled with balls
//! - **Box plot**: quartile box and whiskers as a linked chain
//! - **Outlier funnel**: value-sized balls on two tilted planes
//! - **Regression**: scatter points and a movable line, scored against OLS
//! - **Galton board**: pegs, slots and the binomial model behind them
//!
//! # Design Philosophy
//!
//! Scenes are plain data. Layout is a pure function of the config, the
//! input sample and a seed; stepping the physics is left to the caller.

pub mod bell;
pub mod body;
pub mod box_plot;
pub mod colormap;
pub mod config;
pub mod error;
pub mod funnel;
pub mod galton;
pub mod generators;
pub mod scatter;
pub mod scene;

pub use bell::{bell_curve, bin_boxes, BinBox};
pub use body::{Body, BodyKind, Link, Point, Scene, Shape, Style};
pub use box_plot::{box_plot, BoxPlotStats};
pub use colormap::{Color, Palette};
pub use config::{
    BellConfig, BoxPlotConfig, CanvasConfig, FunnelConfig, GaltonConfig, GeneratorConfig,
    SceneConfig, ScatterConfig,
};
pub use error::{ConfigError, ConfigResult, SceneError, SceneResult};
pub use funnel::{funnel, FunnelGeometry};
pub use galton::{
    galton_board, peg_positions, simulate_drop, slot_probabilities, slot_wall_positions,
};
pub use generators::{shift_positive, PairedSample, SampleGenerator};
pub use scatter::{
    apply_fit_colors, best_fit_pose, fit_feedback, scatter, FitFeedback, LinePose, PlotFrame, Tick,
};
pub use scene::{build_scene, SceneRequest};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
