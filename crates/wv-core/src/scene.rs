//! Scene controller
//!
//! Exactly one of the three scenes is active. Activating a scene schedules
//! one deferred initialization so the new container can settle its layout
//! before the view rebuilds.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Distribution,
    Map,
    Explorer,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Distribution, Scene::Map, Scene::Explorer];

    pub fn index(self) -> usize {
        match self {
            Scene::Distribution => 0,
            Scene::Map => 1,
            Scene::Explorer => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Scene::Distribution => "Global Development",
            Scene::Map => "Regional Map",
            Scene::Explorer => "Indicator Explorer",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingInit {
    scene: Scene,
    due: Instant,
}

/// Tracks the active scene and the initializations waiting to run
#[derive(Debug)]
pub struct SceneController {
    current: Scene,
    delay: Duration,
    pending: VecDeque<PendingInit>,
}

impl SceneController {
    /// Start on the distribution scene with its initialization scheduled
    pub fn new(delay: Duration, now: Instant) -> Self {
        let mut controller = Self {
            current: Scene::Distribution,
            delay,
            pending: VecDeque::new(),
        };
        controller.show_scene(Scene::Distribution, now);
        controller
    }

    pub fn current(&self) -> Scene {
        self.current
    }

    /// Whether the nav control and container of `scene` are marked active
    pub fn is_active(&self, scene: Scene) -> bool {
        self.current == scene
    }

    /// Activate `scene` and schedule its rebuild, even if it is already active
    pub fn show_scene(&mut self, scene: Scene, now: Instant) {
        tracing::info!("Showing scene {:?}", scene);
        self.current = scene;
        self.pending.push_back(PendingInit {
            scene,
            due: now + self.delay,
        });
    }

    /// Drain every initialization that is due, in scheduling order
    pub fn poll(&mut self, now: Instant) -> Vec<Scene> {
        let mut ready = Vec::new();
        while let Some(next) = self.pending.front() {
            if next.due > now {
                break;
            }
            ready.push(next.scene);
            self.pending.pop_front();
        }
        ready
    }

    /// Deadline of the next pending initialization
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
