//! Time-based interpolation between visual states

use std::time::{Duration, Instant};

use egui::{Color32, Pos2, Rect};

/// A value that can be interpolated
pub trait Tween: Clone {
    /// Value at progress `t` in `[0, 1]` from `self` to `to`
    fn tween(&self, to: &Self, t: f32) -> Self;
}

impl Tween for f32 {
    fn tween(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Tween for f64 {
    fn tween(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * f64::from(t)
    }
}

impl Tween for Pos2 {
    fn tween(&self, to: &Self, t: f32) -> Self {
        self.lerp(*to, t)
    }
}

impl Tween for Rect {
    fn tween(&self, to: &Self, t: f32) -> Self {
        Rect::from_min_max(self.min.tween(&to.min, t), self.max.tween(&to.max, t))
    }
}

impl Tween for Color32 {
    fn tween(&self, to: &Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Color32::from_rgba_premultiplied(
            channel(self.r(), to.r()),
            channel(self.g(), to.g()),
            channel(self.b(), to.b()),
            channel(self.a(), to.a()),
        )
    }
}

impl<A: Tween, B: Tween> Tween for (A, B) {
    fn tween(&self, to: &Self, t: f32) -> Self {
        (self.0.tween(&to.0, t), self.1.tween(&to.1, t))
    }
}

/// Cubic in-out easing
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A value moving from `from` to `to` between two instants
#[derive(Debug, Clone)]
pub struct Transition<T: Tween> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
}

impl<T: Tween> Transition<T> {
    pub fn new(from: T, to: T, start: Instant, duration: Duration) -> Self {
        Self { from, to, start, duration }
    }

    /// A transition that is already at rest on `value`
    pub fn settled(value: T, now: Instant) -> Self {
        Self::new(value.clone(), value, now, Duration::ZERO)
    }

    /// Restart from the current value towards `to`
    pub fn retarget(&mut self, to: T, now: Instant, duration: Duration) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: Instant) -> T {
        let t = self.progress(now);
        if t >= 1.0 {
            self.to.clone()
        } else {
            self.from.tween(&self.to, ease_cubic_in_out(t))
        }
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn target(&self) -> &T {
        &self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_transition_runs_and_settles() {
        let start = Instant::now();
        let transition = Transition::new(0.0_f32, 10.0, start, Duration::from_millis(500));

        assert_eq!(transition.value_at(start), 0.0);
        assert_eq!(transition.value_at(start + Duration::from_millis(250)), 5.0);
        assert_eq!(transition.value_at(start + Duration::from_millis(500)), 10.0);
        assert!(!transition.is_done(start + Duration::from_millis(499)));
        assert!(transition.is_done(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let start = Instant::now();
        let mut transition = Transition::new(0.0_f32, 10.0, start, Duration::from_millis(500));

        let mid = start + Duration::from_millis(250);
        transition.retarget(20.0, mid, Duration::from_millis(500));
        assert_eq!(transition.value_at(mid), 5.0);
        assert_eq!(*transition.target(), 20.0);
        assert_eq!(transition.value_at(mid + Duration::from_millis(500)), 20.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let now = Instant::now();
        let transition = Transition::new(Color32::WHITE, Color32::BLACK, now, Duration::ZERO);
        assert_eq!(transition.value_at(now), Color32::BLACK);
        assert!(Transition::settled(3.0_f64, now).is_done(now));
    }
}
