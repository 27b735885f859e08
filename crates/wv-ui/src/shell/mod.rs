use egui::{CentralPanel, Context, RichText, TopBottomPanel};
use wv_core::{ExplorerSession, Scene};
use wv_views::Viewport;

use crate::theme::{accent_color, warning_color};

/// Shell configuration
pub struct ShellConfig {
    pub title: String,
    pub show_status_bar: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "World Development Indicators".to_string(),
            show_status_bar: true,
        }
    }
}

/// Render the title and the scene navigation bar; returns the clicked scene
pub fn scene_nav_bar(ctx: &Context, config: &ShellConfig, session: &ExplorerSession) -> Option<Scene> {
    let mut clicked = None;

    TopBottomPanel::top("scene_nav").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new(&config.title).heading().color(accent_color()));
            ui.separator();

            for scene in Scene::ALL {
                let label = format!("{}. {}", scene.index() + 1, scene.title());
                if ui.selectable_label(session.is_active(scene), label).clicked() {
                    clicked = Some(scene);
                }
            }
        });
        ui.add_space(6.0);
    });

    clicked
}

/// Render the status bar at the bottom
pub fn status_bar(ctx: &Context, session: &ExplorerSession, viewport: &Viewport) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("{} records", session.dataset().len()));
            ui.separator();
            ui.label(session.current_scene().title());

            if let Some(view) = viewport.distribution() {
                ui.separator();
                ui.label(format!("Bubble year: {}", view.year()));
            }

            if session.animator().is_running() {
                ui.separator();
                ui.label(RichText::new(session.animator().trigger_label()).color(warning_color()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(hovered) = viewport.hovered() {
                    ui.label(RichText::new(hovered.country).weak());
                }
            });
        });
    });
}

/// Central panel hosting the active scene
pub fn central_panel<R>(ctx: &Context, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    CentralPanel::default()
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, add_contents)
                .inner
        })
        .inner
}
