//! Utilities for plot views

pub mod axis;
pub mod colors;
pub mod format;
pub mod join;
pub mod scale;
pub mod tooltip;
pub mod transition;

// Re-export commonly used items
pub use colors::{legend_entries, region_color, region_fill, sequential_blue};
pub use format::{format_currency, format_fixed, format_number, format_si, format_thousands, tick_format};
pub use join::{JoinSummary, JoinTimings, MarkAttrs, MarkSet, MarkTarget};
pub use scale::Scale;
pub use tooltip::{detail_lines, show_record_tooltip, tooltip_lines};
pub use transition::{Transition, Tween};
