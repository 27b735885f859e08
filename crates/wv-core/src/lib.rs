//! Core functionality for the world indicators explorer
//!
//! This crate provides the domain model, the scene and animation state
//! machines, and the session object that owns them.

pub mod animation;
pub mod controls;
pub mod error;
pub mod events;
pub mod model;
pub mod scene;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use animation::{AnimationStep, YearAnimator};
pub use controls::{
    DistributionControls, ExplorerControls, MapControls, RegionFilter, YearSlider,
};
pub use error::{Result, VizError};
pub use events::EventBus;
pub use model::{Dataset, Indicator, Record, Region};
pub use scene::{Scene, SceneController};
pub use session::ExplorerSession;
pub use settings::AppSettings;
