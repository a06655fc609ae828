use crate::{Clock, RandomSource};

/// Host services a state may read while it runs.
///
/// The core crate only needs time and randomness; subsystems that move
/// entities around (motion ports, perception, ...) should define extension
/// traits on top of this one.
pub trait World {
    fn clock(&self) -> &dyn Clock;

    fn rng(&mut self) -> &mut dyn RandomSource;

    fn now_seconds(&self) -> f64 {
        self.clock().now_seconds()
    }
}
