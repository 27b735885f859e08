//! Blocking detail prompt for a clicked country
//!
//! While open, a full-window layer swallows all input behind the prompt, so
//! nothing else can be used until it is dismissed.

use egui::{Align2, Color32, Context, Id, Order, RichText, Sense};
use wv_core::model::Record;
use wv_views::plots::utils::detail_lines;

#[derive(Debug, Default)]
pub struct DetailPrompt {
    record: Option<Record>,
}

impl DetailPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, record: Record) {
        tracing::info!("Showing details for {}", record.country);
        self.record = Some(record);
    }

    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    pub fn close(&mut self) {
        self.record = None;
    }

    /// Lines of the open prompt, empty when closed
    pub fn lines(&self) -> Vec<String> {
        self.record.as_ref().map(detail_lines).unwrap_or_default()
    }

    pub fn show(&mut self, ctx: &Context) {
        let Some(record) = &self.record else {
            return;
        };

        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("detail_prompt_blocker"))
            .order(Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(96));
                ui.allocate_rect(screen, Sense::click_and_drag());
            });

        let mut dismissed = false;
        egui::Area::new(Id::new("detail_prompt"))
            .order(Order::Tooltip)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::window(ui.style()).show(ui, |ui| {
                    ui.set_min_width(260.0);
                    ui.label(RichText::new(&record.country).strong().heading());
                    ui.separator();
                    for line in detail_lines(record) {
                        ui.label(line);
                    }
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });

        if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wv_core::model::Region;

    #[test]
    fn test_open_and_close() {
        let mut prompt = DetailPrompt::new();
        assert!(!prompt.is_open());
        assert!(prompt.lines().is_empty());

        prompt.open(Record {
            country: "Egypt".to_string(),
            region: Region::Africa,
            code: "EGY".to_string(),
            year: 2000,
            gdp_per_capita: 7_500.0,
            population: 70_000_000,
            life_expectancy: 68.2,
            literacy_rate: 70.0,
            infant_mortality: 40.0,
        });
        assert!(prompt.is_open());
        assert_eq!(prompt.lines()[0], "Country: Egypt");
        assert_eq!(prompt.lines()[3], "Population: 70,000,000");

        prompt.close();
        assert!(!prompt.is_open());
    }
}
