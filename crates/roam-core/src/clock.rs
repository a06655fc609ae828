use std::time::Instant;

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now_seconds(&self) -> f64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_seconds(&self) -> f64 {
        (**self).now_seconds()
    }
}

/// Clock advanced explicitly by the host, one simulation step at a time.
///
/// This is what deterministic simulations and tests should use. Time never
/// goes backwards: negative or non-finite steps are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seconds: f64) -> Self {
        Self {
            now: if seconds.is_finite() { seconds.max(0.0) } else { 0.0 },
        }
    }

    pub fn advance(&mut self, dt_seconds: f64) {
        if dt_seconds.is_finite() && dt_seconds > 0.0 {
            self.now += dt_seconds;
        }
    }

    /// Jump forward to `seconds`; earlier timestamps are ignored.
    pub fn advance_to(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > self.now {
            self.now = seconds;
        }
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now
    }
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}
