//! One entry point for every demo scene

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statsplay_stats::{parse_entries, DistributionParams, FiveNumberSummary, SampleEntry};

use crate::bell::bell_curve;
use crate::body::Scene;
use crate::box_plot::{box_plot, BoxPlotStats};
use crate::config::SceneConfig;
use crate::error::SceneResult;
use crate::funnel::funnel;
use crate::galton::galton_board;
use crate::scatter::scatter;

/// What to build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scene", rename_all = "snake_case")]
pub enum SceneRequest {
    /// Bell-curve bins for a distribution
    Bell { params: DistributionParams },
    /// Box plot of raw observations
    BoxPlot { observations: Vec<f64> },
    /// Box plot of a given five-number summary
    BoxPlotSummary { summary: FiveNumberSummary },
    /// Outlier funnel of a sample with missing markers
    Funnel { entries: Vec<SampleEntry> },
    /// Regression exercise
    Scatter { x: Vec<f64>, y: Vec<f64> },
    Galton,
}

impl SceneRequest {
    /// Funnel request from comma-separated sample text
    pub fn funnel_from_text(text: &str) -> Self {
        Self::Funnel {
            entries: parse_entries(text),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bell { .. } => "bell",
            Self::BoxPlot { .. } | Self::BoxPlotSummary { .. } => "box_plot",
            Self::Funnel { .. } => "funnel",
            Self::Scatter { .. } => "scatter",
            Self::Galton => "galton",
        }
    }
}

/// Validate the config and build the requested scene
///
/// Randomised layouts draw from a generator seeded with
/// `config.generator.seed`, so equal inputs give equal scenes.
pub fn build_scene(config: &SceneConfig, request: &SceneRequest) -> SceneResult<Scene> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.generator.seed);

    tracing::debug!("Building {} scene", request.name());
    match request {
        SceneRequest::Bell { params } => bell_curve(config, params, &mut rng),
        SceneRequest::BoxPlot { observations } => {
            box_plot(config, &BoxPlotStats::from_observations(observations)?)
        }
        SceneRequest::BoxPlotSummary { summary } => {
            box_plot(config, &BoxPlotStats::from_summary(*summary)?)
        }
        SceneRequest::Funnel { entries } => funnel(config, entries),
        SceneRequest::Scatter { x, y } => scatter(config, x, y).map(|(scene, _)| scene),
        SceneRequest::Galton => galton_board(config, &mut rng),
    }
}
