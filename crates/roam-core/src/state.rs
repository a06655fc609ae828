use core::fmt::Debug;

/// A unit of behavior scheduled by [`StateMachine`](crate::StateMachine).
///
/// Lifecycle: `start` once per activation, `update` once per tick while
/// active, `stop` exactly once when the machine switches away. The machine
/// always stops the outgoing state before starting the incoming one, so
/// anything acquired in `start` can be released in `stop`.
pub trait State<W> {
    fn start(&mut self, world: &mut W);

    fn update(&mut self, world: &mut W);

    fn stop(&mut self, world: &mut W);

    /// Whether the current activation has run its course. Must not mutate.
    fn finished(&self, world: &W) -> bool;
}

impl<W, S> State<W> for Box<S>
where
    S: State<W> + ?Sized,
{
    fn start(&mut self, world: &mut W) {
        (**self).start(world);
    }

    fn update(&mut self, world: &mut W) {
        (**self).update(world);
    }

    fn stop(&mut self, world: &mut W) {
        (**self).stop(world);
    }

    fn finished(&self, world: &W) -> bool {
        (**self).finished(world)
    }
}

/// Variant identity: one registered instance per key.
pub trait StateKey: Copy + Ord + Debug + 'static {
    fn name(self) -> &'static str;
}

impl StateKey for &'static str {
    fn name(self) -> &'static str {
        self
    }
}
