use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use wv_core::events::{events, handler_from_fn};
use wv_core::{AppSettings, ExplorerSession, Scene};
use wv_data::generate_seeded;
use wv_views::Viewport;

const DELAY: Duration = Duration::from_millis(100);

fn settled(viewport: &mut Viewport, session: &mut ExplorerSession, now: &mut Instant) {
    *now += DELAY;
    viewport.update(session, *now);
}

#[test]
fn test_round_trip_reinitializes_distribution() {
    let mut now = Instant::now();
    let mut session = ExplorerSession::new(generate_seeded(77), AppSettings::default(), now);
    let mut viewport = Viewport::new();

    let initialized = Arc::new(AtomicUsize::new(0));
    let counter = initialized.clone();
    session
        .events()
        .subscribe::<events::SceneInitialized>(handler_from_fn(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

    settled(&mut viewport, &mut session, &mut now);
    let distribution = viewport.distribution().unwrap();
    assert_eq!(distribution.initializations(), 1);
    assert_eq!(distribution.year(), 2020);

    // Move away from the defaults through a short animation run
    assert!(viewport.play(&mut session, now));
    now += Duration::from_millis(800);
    viewport.update(&mut session, now);
    assert_eq!(viewport.distribution().unwrap().year(), 1960);

    for scene in [Scene::Map, Scene::Explorer, Scene::Distribution] {
        viewport.show_scene(&mut session, scene, now);
        assert_eq!(session.current_scene(), scene);
        assert!(session.is_active(scene));
        settled(&mut viewport, &mut session, &mut now);
    }

    let distribution = viewport.distribution().unwrap();
    assert_eq!(distribution.initializations(), 2);
    assert_eq!(distribution.year(), 2020);
    assert_eq!(distribution.marks().len(), 25);
    assert_eq!(distribution.last_join().entered, 25);

    assert_eq!(viewport.map().unwrap().initializations(), 1);
    assert_eq!(viewport.explorer().unwrap().initializations(), 1);
    assert_eq!(initialized.load(Ordering::SeqCst), 4);
}

#[test]
fn test_reentering_active_scene_rebuilds_it() {
    let mut now = Instant::now();
    let mut session = ExplorerSession::new(generate_seeded(5), AppSettings::default(), now);
    let mut viewport = Viewport::new();
    settled(&mut viewport, &mut session, &mut now);

    viewport.show_scene(&mut session, Scene::Map, now);
    settled(&mut viewport, &mut session, &mut now);
    viewport.show_scene(&mut session, Scene::Map, now);
    settled(&mut viewport, &mut session, &mut now);

    let map = viewport.map().unwrap();
    assert_eq!(map.initializations(), 2);
    assert_eq!(map.cells().len(), 25);
    assert!(!session.is_active(Scene::Distribution));
}

#[test]
fn test_rapid_switching_runs_every_initialization() {
    let mut now = Instant::now();
    let mut session = ExplorerSession::new(generate_seeded(5), AppSettings::default(), now);
    let mut viewport = Viewport::new();

    viewport.show_scene(&mut session, Scene::Map, now);
    viewport.show_scene(&mut session, Scene::Explorer, now);
    settled(&mut viewport, &mut session, &mut now);

    assert!(viewport.view(Scene::Distribution).is_initialized());
    assert!(viewport.view(Scene::Map).is_initialized());
    assert!(viewport.view(Scene::Explorer).is_initialized());
    assert_eq!(session.current_scene(), Scene::Explorer);
}
