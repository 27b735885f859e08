//! The explorer session: the one owner of dataset, scene and animation state

use std::sync::Arc;
use std::time::Instant;

use crate::animation::{AnimationStep, YearAnimator};
use crate::controls::YearSlider;
use crate::events::{events, EventBus};
use crate::model::Dataset;
use crate::scene::{Scene, SceneController};
use crate::settings::AppSettings;

/// State shared by every scene for the lifetime of the window
pub struct ExplorerSession {
    dataset: Arc<Dataset>,
    settings: AppSettings,
    scenes: SceneController,
    animator: YearAnimator,
    events: EventBus,
}

impl ExplorerSession {
    /// Create a session; the distribution scene is scheduled for initialization
    pub fn new(dataset: Dataset, settings: AppSettings, now: Instant) -> Self {
        let scenes = SceneController::new(settings.scene_init_delay(), now);
        let animator = YearAnimator::new(settings.animation_interval());

        Self {
            dataset: Arc::new(dataset),
            settings,
            scenes,
            animator,
            events: EventBus::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn current_scene(&self) -> Scene {
        self.scenes.current()
    }

    pub fn is_active(&self, scene: Scene) -> bool {
        self.scenes.is_active(scene)
    }

    pub fn animator(&self) -> &YearAnimator {
        &self.animator
    }

    pub fn show_scene(&mut self, scene: Scene, now: Instant) {
        self.scenes.show_scene(scene, now);
        self.events.publish(events::SceneActivated { scene });
    }

    /// Scenes whose deferred initialization is due now
    pub fn poll_initializations(&mut self, now: Instant) -> Vec<Scene> {
        let ready = self.scenes.poll(now);
        for scene in &ready {
            self.events.publish(events::SceneInitialized { scene: *scene });
        }
        ready
    }

    /// Start the year animation; false when a run is already active
    pub fn play(&mut self, slider: &YearSlider, now: Instant) -> bool {
        let started = self.animator.play(slider, now);
        if started {
            self.events.publish(events::AnimationStarted {
                from: slider.min,
                to: slider.max,
            });
        }
        started
    }

    pub fn tick_animation(&mut self, now: Instant) -> Option<AnimationStep> {
        let step = self.animator.tick(now)?;
        self.events.publish(events::YearAdvanced { year: step.year });
        if step.finished {
            self.events.publish(events::AnimationFinished { year: step.year });
        }
        Some(step)
    }

    /// Earliest pending deadline, used to schedule the next repaint
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.scenes.next_due(), self.animator.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::handler_from_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn session(now: Instant) -> ExplorerSession {
        ExplorerSession::new(Dataset::default(), AppSettings::default(), now)
    }

    #[test]
    fn test_new_session_starts_on_distribution() {
        let start = Instant::now();
        let mut session = session(start);

        assert_eq!(session.current_scene(), Scene::Distribution);
        assert_eq!(session.next_deadline(), Some(start + Duration::from_millis(100)));
        assert_eq!(
            session.poll_initializations(start + Duration::from_millis(100)),
            vec![Scene::Distribution]
        );
        assert_eq!(session.next_deadline(), None);
    }

    #[test]
    fn test_animation_events_are_published() {
        let start = Instant::now();
        let mut session = session(start);
        let finished = Arc::new(AtomicUsize::new(0));
        let advanced = Arc::new(AtomicUsize::new(0));

        let counter = finished.clone();
        session
            .events()
            .subscribe::<events::AnimationFinished>(handler_from_fn(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        let counter = advanced.clone();
        session
            .events()
            .subscribe::<events::YearAdvanced>(handler_from_fn(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        let slider = YearSlider::default();
        assert!(session.play(&slider, start));
        assert!(!session.play(&slider, start));

        let mut now = start;
        while session.animator().is_running() {
            now += Duration::from_millis(800);
            session.tick_animation(now);
        }

        assert_eq!(advanced.load(Ordering::SeqCst), slider.positions().count());
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
