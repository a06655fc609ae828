use crate::{DurationError, RandomSource, State, World};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive window of seconds a timed state may last.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DurationRange {
    pub min: f64,
    pub max: f64,
}

impl DurationRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(seconds: f64) -> Self {
        Self::new(seconds, seconds)
    }

    pub fn validate(self) -> Result<Self, DurationError> {
        let Self { min, max } = self;
        if !min.is_finite() || !max.is_finite() {
            return Err(DurationError::NonFinite { min, max });
        }
        if min < 0.0 || max < 0.0 {
            return Err(DurationError::Negative { min, max });
        }
        if min > max {
            return Err(DurationError::Inverted { min, max });
        }
        Ok(self)
    }

    pub fn contains(self, seconds: f64) -> bool {
        self.min <= seconds && seconds <= self.max
    }

    pub fn sample(self, rng: &mut dyn RandomSource) -> f64 {
        rng.uniform(self.min, self.max).clamp(self.min, self.max)
    }
}

/// Start timestamp plus a duration re-rolled on every activation.
///
/// A window that has never been started reports itself as elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    range: DurationRange,
    started_at: f64,
    duration: f64,
}

impl TimeWindow {
    pub fn new(range: DurationRange) -> Result<Self, DurationError> {
        Ok(Self {
            range: range.validate()?,
            started_at: 0.0,
            duration: 0.0,
        })
    }

    pub fn range(&self) -> DurationRange {
        self.range
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Duration drawn by the latest [`begin`](Self::begin).
    pub fn sampled_duration(&self) -> f64 {
        self.duration
    }

    pub fn begin<W: World + ?Sized>(&mut self, world: &mut W) {
        self.started_at = world.now_seconds();
        self.duration = self.range.sample(world.rng());
    }

    pub fn elapsed(&self, now_seconds: f64) -> f64 {
        (now_seconds - self.started_at).max(0.0)
    }

    pub fn is_elapsed(&self, now_seconds: f64) -> bool {
        self.elapsed(now_seconds) >= self.duration
    }
}

/// Hooks of a behavior whose lifetime is bounded by a [`TimeWindow`].
///
/// `on_start` runs after the window has been stamped and its duration drawn.
pub trait TimedBehavior<W> {
    fn on_start(&mut self, _world: &mut W) {}

    fn on_update(&mut self, world: &mut W);

    fn on_stop(&mut self, _world: &mut W) {}
}

/// A [`State`] that finishes once its randomized duration has elapsed.
#[derive(Debug, Clone)]
pub struct TimeConstrained<B> {
    window: TimeWindow,
    behavior: B,
}

impl<B> TimeConstrained<B> {
    pub fn new(range: DurationRange, behavior: B) -> Result<Self, DurationError> {
        Ok(Self {
            window: TimeWindow::new(range)?,
            behavior,
        })
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }
}

impl<W, B> State<W> for TimeConstrained<B>
where
    W: World,
    B: TimedBehavior<W>,
{
    fn start(&mut self, world: &mut W) {
        self.window.begin(world);
        self.behavior.on_start(world);
    }

    fn update(&mut self, world: &mut W) {
        self.behavior.on_update(world);
    }

    fn stop(&mut self, world: &mut W) {
        self.behavior.on_stop(world);
    }

    fn finished(&self, world: &W) -> bool {
        self.window.is_elapsed(world.now_seconds())
    }
}
