use std::time::Duration;

pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(250);

/// Quadratic ease-in on `[0, 1]`.
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Eases the displayed value towards the bound value.
///
/// Timestamps are monotonic durations since any fixed origin (the host's frame clock).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    started: Duration,
    duration: Duration,
}

impl Transition {
    /// A transition that has already arrived at `value`.
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            started: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Starts easing from whatever is displayed at `now` towards `target`.
    pub fn retarget(&mut self, target: f64, now: Duration) {
        if target == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = target;
        self.started = now;
    }

    /// Jumps straight to `value`, dropping any transition in flight.
    pub fn settle(&mut self, value: f64) {
        self.from = value;
        self.to = value;
    }

    /// Moves towards `target`: immediately while the pointer is driving the value,
    /// eased otherwise.
    pub fn follow(&mut self, target: f64, now: Duration, tracking: bool) {
        if tracking {
            self.settle(target);
        } else {
            self.retarget(target, now);
        }
    }

    pub fn fraction(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn sample(&self, now: Duration) -> f64 {
        let t = self.fraction(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_in(t)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.fraction(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_settled_is_finished() {
        let t = Transition::settled(5.0).with_duration(DEFAULT_TRANSITION);
        assert_eq!(t.sample(ms(0)), 5.0);
        assert_eq!(t.target(), 5.0);
    }

    #[test]
    fn test_eases_in() {
        let mut t = Transition::settled(0.0).with_duration(ms(100));
        t.retarget(100.0, ms(1000));
        assert_eq!(t.sample(ms(1000)), 0.0);
        assert!((t.sample(ms(1050)) - 25.0).abs() < 1e-9);
        assert!(!t.is_finished(ms(1099)));
        assert_eq!(t.sample(ms(1100)), 100.0);
        assert!(t.is_finished(ms(1100)));
        assert_eq!(t.sample(ms(5000)), 100.0);
    }

    #[test]
    fn test_retarget_starts_from_displayed_value() {
        let mut t = Transition::settled(0.0).with_duration(ms(100));
        t.retarget(100.0, ms(0));
        t.retarget(0.0, ms(50));
        assert!((t.sample(ms(50)) - 25.0).abs() < 1e-9);
        assert_eq!(t.sample(ms(150)), 0.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut t = Transition::settled(1.0);
        t.retarget(2.0, ms(10));
        assert_eq!(t.sample(ms(10)), 2.0);
    }

    #[test]
    fn test_settle_drops_transition() {
        let mut t = Transition::settled(0.0).with_duration(ms(100));
        t.retarget(10.0, ms(0));
        t.settle(4.0);
        assert_eq!(t.sample(ms(10)), 4.0);
    }

    #[test]
    fn test_tracking_keeps_up_with_pointer() {
        let mut t = Transition::settled(0.0).with_duration(DEFAULT_TRANSITION);
        for i in 1..=60 {
            t.follow(i as f64, ms(16 * i), true);
            assert_eq!(t.sample(ms(16 * i)), i as f64);
        }
        assert_eq!(t.sample(ms(960)), 60.0);
        assert!(t.is_finished(ms(960)));
    }

    #[test]
    fn test_follow_without_tracking_eases() {
        let mut t = Transition::settled(0.0).with_duration(ms(100));
        t.follow(100.0, ms(0), false);
        assert!((t.sample(ms(50)) - 25.0).abs() < 1e-9);

        // the pointer takes over mid-transition
        t.follow(80.0, ms(60), true);
        assert_eq!(t.sample(ms(60)), 80.0);
    }

    #[test]
    fn test_sample_before_start_stays_at_origin() {
        let mut t = Transition::settled(0.0).with_duration(ms(100));
        t.retarget(10.0, ms(500));
        assert_eq!(t.sample(ms(100)), 0.0);
    }
}
