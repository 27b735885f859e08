use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::collections::BTreeMap;

use wv_core::AppSettings;

/// Theme configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Explorer Light".to_string(),
            dark_mode: false,
        }
    }
}

impl Theme {
    pub fn from_settings(settings: &AppSettings) -> Self {
        if settings.dark_mode {
            Self {
                name: "Explorer Dark".to_string(),
                dark_mode: true,
            }
        } else {
            Self::default()
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let visuals = if theme.dark_mode {
        dark_visuals()
    } else {
        light_visuals()
    };

    // Apply spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);
    style.spacing.slider_width = 260.0;

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    // Apply the style and visuals
    ctx.set_style(style);
    ctx.set_visuals(visuals);
    tracing::debug!("Applied theme {}", theme.name);
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();
    let accent = accent_color();

    visuals.panel_fill = Color32::from_rgb(248, 249, 250);
    visuals.window_fill = Color32::WHITE;
    visuals.extreme_bg_color = Color32::WHITE;

    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);

    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;
    visuals
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    let accent = accent_color();
    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let text_color = Color32::from_rgb(220, 220, 220);

    // Window and panel styling
    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = Color32::from_rgb(23, 23, 23);
    visuals.faint_bg_color = widget_bg;

    // Widget styling
    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 50, 50);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 60, 60);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;
    visuals
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(52, 152, 219)
}

/// Get the warning color for the theme
pub fn warning_color() -> Color32 {
    Color32::from_rgb(230, 180, 80)
}
