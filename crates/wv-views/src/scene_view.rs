//! Scene view abstraction - base trait for the three top-level views

use std::any::Any;
use std::time::Instant;

use egui::{Pos2, Rect, Ui};
use wv_core::model::Record;
use wv_core::scene::Scene;

use crate::ViewerContext;

/// Request raised by a view for the application shell
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// The play trigger was pressed
    PlayRequested,
    /// A map cell was clicked; open the blocking detail prompt
    ShowDetails(Record),
}

/// Space reserved around the plotting area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 50.0,
            bottom: 80.0,
            left: 80.0,
        }
    }
}

/// Chart size captured when a view initializes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub outer_width: f32,
    pub outer_height: f32,
    pub margins: Margins,
}

impl ChartGeometry {
    pub fn new(outer_width: f32, outer_height: f32) -> Self {
        Self {
            outer_width,
            outer_height,
            margins: Margins::default(),
        }
    }

    /// Width of the plotting area
    pub fn width(&self) -> f32 {
        (self.outer_width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height of the plotting area
    pub fn height(&self) -> f32 {
        (self.outer_height - self.margins.top - self.margins.bottom).max(0.0)
    }

    /// Plotting area in screen space for a chart whose outer corner is `origin`
    pub fn plot_rect(&self, origin: Pos2) -> Rect {
        Rect::from_min_size(
            origin + egui::vec2(self.margins.left, self.margins.top),
            egui::vec2(self.width(), self.height()),
        )
    }
}

/// Base trait for scene views
pub trait SceneView: Send + Sync {
    fn scene(&self) -> Scene;

    fn title(&self) -> &str {
        self.scene().title()
    }

    /// Rebuild the view from scratch: controls back to defaults, marks dropped
    fn initialize(&mut self, ctx: &ViewerContext);

    fn is_initialized(&self) -> bool;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction>;

    /// Whether a transition is still running at `now`
    fn is_animating(&self, _now: Instant) -> bool {
        false
    }

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get as any mut for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
