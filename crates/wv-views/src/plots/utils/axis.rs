//! Axes painted directly with an egui painter

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use super::scale::Scale;

const TICK_LENGTH: f32 = 6.0;

/// A tick with its screen offset along the axis and its label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub offset: f32,
    pub label: String,
}

/// Ticks of `scale` whose range is in plot-local pixels
pub fn ticks(scale: &Scale, count: usize, format: impl Fn(f64) -> String) -> Vec<Tick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| Tick {
            offset: scale.apply(value) as f32,
            label: format(value),
        })
        .collect()
}

pub fn paint_bottom_axis(painter: &Painter, plot: Rect, ticks: &[Tick], color: Color32) {
    let stroke = Stroke::new(1.0, color);
    painter.line_segment([plot.left_bottom(), plot.right_bottom()], stroke);

    for tick in ticks {
        let x = plot.left() + tick.offset;
        let base = Pos2::new(x, plot.bottom());
        painter.line_segment([base, base + egui::vec2(0.0, TICK_LENGTH)], stroke);
        painter.text(
            base + egui::vec2(0.0, TICK_LENGTH + 2.0),
            Align2::CENTER_TOP,
            &tick.label,
            FontId::proportional(11.0),
            color,
        );
    }
}

pub fn paint_left_axis(painter: &Painter, plot: Rect, ticks: &[Tick], color: Color32) {
    let stroke = Stroke::new(1.0, color);
    painter.line_segment([plot.left_top(), plot.left_bottom()], stroke);

    for tick in ticks {
        let y = plot.top() + tick.offset;
        let base = Pos2::new(plot.left(), y);
        painter.line_segment([base, base - egui::vec2(TICK_LENGTH, 0.0)], stroke);
        painter.text(
            base - egui::vec2(TICK_LENGTH + 3.0, 0.0),
            Align2::RIGHT_CENTER,
            &tick.label,
            FontId::proportional(11.0),
            color,
        );
    }
}

/// Titles centered below the x axis and above the y axis
pub fn paint_axis_titles(painter: &Painter, plot: Rect, x_title: &str, y_title: &str, color: Color32) {
    painter.text(
        Pos2::new(plot.center().x, plot.bottom() + 40.0),
        Align2::CENTER_TOP,
        x_title,
        FontId::proportional(14.0),
        color,
    );
    painter.text(
        Pos2::new(plot.left() - 60.0, plot.top() - 4.0),
        Align2::LEFT_BOTTOM,
        y_title,
        FontId::proportional(14.0),
        color,
    );
}
