//! Viewport - owns the scene views and routes session updates to them

use std::sync::Arc;
use std::time::Instant;

use egui::Ui;
use parking_lot::RwLock;
use wv_core::scene::Scene;
use wv_core::ExplorerSession;

use crate::plots::{DistributionView, ExplorerView, GridMapView};
use crate::{HoveredRecord, SceneView, ViewAction, ViewerContext};

/// The three scene views, only the active one is drawn
pub struct Viewport {
    /// Indexed by `Scene::index`
    views: Vec<Box<dyn SceneView>>,
    hovered: Arc<RwLock<Option<HoveredRecord>>>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        let views: Vec<Box<dyn SceneView>> = vec![
            Box::new(DistributionView::new()),
            Box::new(GridMapView::new()),
            Box::new(ExplorerView::new()),
        ];
        Self {
            views,
            hovered: Arc::new(RwLock::new(None)),
        }
    }

    pub fn view(&self, scene: Scene) -> &dyn SceneView {
        self.views[scene.index()].as_ref()
    }

    pub fn distribution(&self) -> Option<&DistributionView> {
        self.view(Scene::Distribution).as_any().downcast_ref()
    }

    pub fn map(&self) -> Option<&GridMapView> {
        self.view(Scene::Map).as_any().downcast_ref()
    }

    pub fn explorer(&self) -> Option<&ExplorerView> {
        self.view(Scene::Explorer).as_any().downcast_ref()
    }

    fn distribution_mut(&mut self) -> Option<&mut DistributionView> {
        self.views[Scene::Distribution.index()]
            .as_any_mut()
            .downcast_mut()
    }

    pub fn hovered(&self) -> Option<HoveredRecord> {
        self.hovered.read().clone()
    }

    pub fn context(&self, session: &ExplorerSession, now: Instant) -> ViewerContext {
        ViewerContext::new(session, self.hovered.clone(), now)
    }

    /// Activate `scene`; its view is rebuilt once the init delay has passed
    pub fn show_scene(&mut self, session: &mut ExplorerSession, scene: Scene, now: Instant) {
        session.show_scene(scene, now);
        *self.hovered.write() = None;
    }

    /// Run due initializations, then apply at most one animation step
    pub fn update(&mut self, session: &mut ExplorerSession, now: Instant) {
        let ready = session.poll_initializations(now);
        if !ready.is_empty() {
            let ctx = self.context(session, now);
            for scene in ready {
                self.views[scene.index()].initialize(&ctx);
            }
        }

        // The distribution view follows the animation even while hidden
        if let Some(step) = session.tick_animation(now) {
            let dataset = session.dataset().clone();
            if let Some(view) = self.distribution_mut() {
                view.apply_animation_step(step, &dataset, now);
            }
        }
    }

    /// Start the year animation over the distribution view's slider
    pub fn play(&mut self, session: &mut ExplorerSession, now: Instant) -> bool {
        match self.distribution().map(|view| *view.slider()) {
            Some(slider) => session.play(&slider, now),
            None => false,
        }
    }

    /// Draw the active scene and collect the actions it raised
    pub fn ui(&mut self, ui: &mut Ui, session: &ExplorerSession, now: Instant) -> Vec<ViewAction> {
        let ctx = self.context(session, now);
        let view = &mut self.views[session.current_scene().index()];

        ui.heading(view.title());
        ui.add_space(4.0);

        if !view.is_initialized() {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return Vec::new();
        }

        view.ui(&ctx, ui)
    }

    /// Whether any view still has a transition running
    pub fn is_animating(&self, now: Instant) -> bool {
        self.views.iter().any(|view| view.is_animating(now))
    }
}
