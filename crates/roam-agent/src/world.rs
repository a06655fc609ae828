use roam_core::{Clock, RandomSource, World};

use crate::MotionPort;

/// A [`World`] that can also steer the agent's body.
pub trait AgentWorld: World {
    fn motion(&mut self) -> &mut dyn MotionPort;
}

/// The collaborators one agent runs against, injected by the host.
#[derive(Debug, Clone)]
pub struct AgentHost<M, C, R> {
    pub motion: M,
    pub clock: C,
    pub rng: R,
}

impl<M, C, R> AgentHost<M, C, R> {
    pub fn new(motion: M, clock: C, rng: R) -> Self {
        Self { motion, clock, rng }
    }
}

impl<M, C, R> World for AgentHost<M, C, R>
where
    C: Clock,
    R: RandomSource,
{
    fn clock(&self) -> &dyn Clock {
        &self.clock
    }

    fn rng(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }
}

impl<M, C, R> AgentWorld for AgentHost<M, C, R>
where
    M: MotionPort,
    C: Clock,
    R: RandomSource,
{
    fn motion(&mut self) -> &mut dyn MotionPort {
        &mut self.motion
    }
}
