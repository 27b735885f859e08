//! Color utilities for plots

use egui::Color32;
use wv_core::model::Region;

/// Bubble fill opacity
pub const MARK_OPACITY: f32 = 0.7;

pub fn region_color(region: Region) -> Color32 {
    let [r, g, b] = region.rgb();
    Color32::from_rgb(r, g, b)
}

/// Region color at the bubble opacity
pub fn region_fill(region: Region) -> Color32 {
    region_color(region).gamma_multiply(MARK_OPACITY)
}

/// One legend row per region in fixed order
pub fn legend_entries() -> Vec<(&'static str, Color32)> {
    Region::ALL
        .into_iter()
        .map(|region| (region.name(), region_color(region)))
        .collect()
}

/// Sequential blues at `t` in `[0, 1]`
pub fn sequential_blue(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let color = colorous::BLUES.eval_continuous(t);
    Color32::from_rgb(color.r, color.g, color.b)
}
