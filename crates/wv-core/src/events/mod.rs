use std::any::{Any, TypeId};

use ahash::AHashMap;
use parking_lot::Mutex;

/// Session-wide event bus
pub struct EventBus {
    handlers: Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Scene and animation events
pub mod events {
    use super::Event;
    use crate::scene::Scene;

    /// A scene became the active one
    #[derive(Debug, Clone)]
    pub struct SceneActivated {
        pub scene: Scene,
    }

    /// A scene's deferred initialization ran
    #[derive(Debug, Clone)]
    pub struct SceneInitialized {
        pub scene: Scene,
    }

    #[derive(Debug, Clone)]
    pub struct AnimationStarted {
        pub from: i32,
        pub to: i32,
    }

    #[derive(Debug, Clone)]
    pub struct YearAdvanced {
        pub year: i32,
    }

    #[derive(Debug, Clone)]
    pub struct AnimationFinished {
        pub year: i32,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        SceneActivated,
        SceneInitialized,
        AnimationStarted,
        YearAdvanced,
        AnimationFinished
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(AHashMap::new()),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        self.handlers
            .lock()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(handler);
    }

    /// Publish an event to the handlers of its type
    pub fn publish<E: Event>(&self, event: E) {
        let mut handlers = self.handlers.lock();
        if let Some(event_handlers) = handlers.get_mut(&TypeId::of::<E>()) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event handler backed by a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::*;
    use super::*;
    use crate::scene::Scene;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_handlers_only_see_their_type() {
        let bus = EventBus::new();
        let activations = Arc::new(AtomicUsize::new(0));

        let counter = activations.clone();
        bus.subscribe::<SceneActivated>(handler_from_fn(move |event| {
            if event.as_any().downcast_ref::<SceneActivated>().is_some() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        }));

        bus.publish(SceneActivated { scene: Scene::Map });
        bus.publish(YearAdvanced { year: 1965 });
        bus.publish(SceneActivated { scene: Scene::Explorer });

        assert_eq!(activations.load(Ordering::SeqCst), 2);
    }
}
