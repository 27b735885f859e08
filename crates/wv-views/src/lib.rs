//! View system for the world indicators explorer

mod scene_view;
mod viewport;
pub mod plots;

pub use scene_view::{ChartGeometry, Margins, SceneView, ViewAction};
pub use viewport::Viewport;
pub use plots::{DistributionView, ExplorerView, GridMapView};

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use wv_core::{controls::YearSlider, model::Dataset, scene::Scene, ExplorerSession};

/// Record currently under the pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoveredRecord {
    pub scene: Scene,
    pub country: String,
}

/// Context passed to views during initialization and rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// The frozen dataset
    pub dataset: Arc<Dataset>,

    /// Year every slider returns to on initialization
    pub default_year: i32,

    /// Fixed outer height of the charts
    pub chart_height: f32,

    /// Frame time, drives every transition
    pub now: Instant,

    /// Whether the year animation is running
    pub animation_running: bool,

    /// Current label of the play trigger
    pub trigger_label: &'static str,

    /// Currently hovered record
    pub hovered: Arc<RwLock<Option<HoveredRecord>>>,
}

impl ViewerContext {
    pub fn new(
        session: &ExplorerSession,
        hovered: Arc<RwLock<Option<HoveredRecord>>>,
        now: Instant,
    ) -> Self {
        let settings = session.settings();
        Self {
            dataset: session.dataset().clone(),
            default_year: settings.default_year,
            chart_height: settings.chart_height,
            now,
            animation_running: session.animator().is_running(),
            trigger_label: session.animator().trigger_label(),
            hovered,
        }
    }

    /// A fresh slider at the default year
    pub fn default_slider(&self) -> YearSlider {
        YearSlider::new(self.default_year).unwrap_or_else(|err| {
            tracing::warn!("Invalid default year: {}", err);
            YearSlider::default()
        })
    }

    pub fn set_hovered(&self, hovered: Option<HoveredRecord>) {
        *self.hovered.write() = hovered;
    }
}
