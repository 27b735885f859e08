//! User interface components for the world indicators explorer
//!
//! This crate provides the egui-based shell around the scene views:
//! theme, navigation bar, status bar and the blocking detail prompt.

pub mod detail_prompt;
pub mod shell;
pub mod theme;

/// Re-export commonly used types
pub use detail_prompt::DetailPrompt;
pub use shell::{central_panel, scene_nav_bar, status_bar, ShellConfig};
pub use theme::{apply_theme, Theme};
