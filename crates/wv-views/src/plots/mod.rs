//! Scene view implementations

pub mod distribution;
pub mod explorer;
pub mod grid_map;

// Utilities
pub mod utils;

// Re-exports
pub use distribution::{BubbleAttrs, DistributionFrame, DistributionView};
pub use explorer::{ExplorerFrame, ExplorerPoint, ExplorerView};
pub use grid_map::{CellAttrs, GridMapView, MapFrame};
