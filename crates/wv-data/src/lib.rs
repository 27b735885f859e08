//! Synthetic dataset generation and pure queries over it

pub mod generator;
pub mod query;

// Re-exports
pub use generator::{generate, generate_seeded, generate_with, COUNTRIES};
pub use query::{
    distinct_regions, extent, filter_region, filter_year, map_metrics, max_by, mean, MapMetrics,
};
