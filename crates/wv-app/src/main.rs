//! Main application entry point

use std::time::Instant;

use anyhow::{Context as _, Result};
use eframe::egui::{self, Context};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wv_core::events::{events, handler_from_fn, Event};
use wv_core::{AppSettings, ExplorerSession};
use wv_ui::{DetailPrompt, ShellConfig, Theme};
use wv_views::{ViewAction, Viewport};

/// Main application state
struct WorldVizApp {
    /// Dataset, scene and animation state
    session: ExplorerSession,

    /// The three scene views
    viewport: Viewport,

    /// Modal prompt opened from the map
    detail_prompt: DetailPrompt,

    shell: ShellConfig,
}

impl WorldVizApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        wv_ui::apply_theme(&cc.egui_ctx, &Theme::from_settings(&settings));

        let dataset = match settings.seed {
            Some(seed) => wv_data::generate_seeded(seed),
            None => wv_data::generate(),
        };

        let session = ExplorerSession::new(dataset, settings, Instant::now());
        subscribe_logging(&session);

        Self {
            session,
            viewport: Viewport::new(),
            detail_prompt: DetailPrompt::new(),
            shell: ShellConfig::default(),
        }
    }

    fn schedule_repaint(&self, ctx: &Context, now: Instant) {
        if self.viewport.is_animating(now) {
            ctx.request_repaint();
        } else if let Some(deadline) = self.session.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

/// Mirror session events into the log
fn subscribe_logging(session: &ExplorerSession) {
    let bus = session.events();
    bus.subscribe::<events::SceneActivated>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<events::SceneActivated>() {
            info!("Scene activated: {}", e.scene);
        }
    }));
    bus.subscribe::<events::SceneInitialized>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<events::SceneInitialized>() {
            info!("Scene initialized: {}", e.scene);
        }
    }));
    bus.subscribe::<events::AnimationStarted>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<events::AnimationStarted>() {
            info!("Animation {} -> {}", e.from, e.to);
        }
    }));
    bus.subscribe::<events::YearAdvanced>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<events::YearAdvanced>() {
            tracing::debug!("Animation year {}", e.year);
        }
    }));
    bus.subscribe::<events::AnimationFinished>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<events::AnimationFinished>() {
            info!("Animation finished at {}", e.year);
        }
    }));
}

impl eframe::App for WorldVizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.viewport.update(&mut self.session, now);

        if let Some(scene) = wv_ui::scene_nav_bar(ctx, &self.shell, &self.session) {
            self.viewport.show_scene(&mut self.session, scene, now);
        }

        if self.shell.show_status_bar {
            wv_ui::status_bar(ctx, &self.session, &self.viewport);
        }

        let actions = wv_ui::central_panel(ctx, |ui| {
            self.viewport.ui(ui, &self.session, now)
        });

        for action in actions {
            match action {
                ViewAction::ShowDetails(record) => self.detail_prompt.open(record),
                ViewAction::PlayRequested => {
                    if !self.viewport.play(&mut self.session, now) {
                        warn!("Play requested while an animation is running");
                    }
                }
            }
        }

        self.detail_prompt.show(ctx);
        self.schedule_repaint(ctx, now);
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = AppSettings::load().context("Failed to load settings")?;
    info!("Starting World Development Indicators explorer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size)
            .with_min_inner_size([900.0, 700.0]),
        default_theme: if settings.dark_mode {
            eframe::Theme::Dark
        } else {
            eframe::Theme::Light
        },
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "World Development Indicators",
        options,
        Box::new(move |cc| Box::new(WorldVizApp::new(cc, settings))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
