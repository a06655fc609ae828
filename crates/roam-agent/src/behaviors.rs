//! The five timed behaviors an autonomous agent cycles through.
//!
//! Each one is a [`TimedBehavior`]; wrap it in [`TimeConstrained`] to get a
//! schedulable state whose duration is re-rolled on every activation.

use roam_core::{SignBias, StateKey, TimeConstrained, TimedBehavior};

use crate::{AgentWorld, Vec3};

/// Variant identity of the agent's registered states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Behavior {
    Idle,
    MoveForward,
    RotatedMove,
    Rotate,
    MoveBackward,
}

impl Behavior {
    pub const ALL: [Behavior; 5] = [
        Behavior::Idle,
        Behavior::MoveForward,
        Behavior::RotatedMove,
        Behavior::Rotate,
        Behavior::MoveBackward,
    ];
}

impl StateKey for Behavior {
    fn name(self) -> &'static str {
        match self {
            Behavior::Idle => "idle",
            Behavior::MoveForward => "move_forward",
            Behavior::RotatedMove => "rotated_move",
            Behavior::Rotate => "rotate",
            Behavior::MoveBackward => "move_backward",
        }
    }
}

pub type IdleState = TimeConstrained<Idle>;
pub type MoveForwardState = TimeConstrained<MoveForward>;
pub type RotatedMoveState = TimeConstrained<RotatedMove>;
pub type RotateState = TimeConstrained<RotateInPlace>;
pub type MoveBackwardState = TimeConstrained<MoveBackward>;

/// Waits out its duration without issuing motion commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl<W: AgentWorld> TimedBehavior<W> for Idle {
    fn on_update(&mut self, _world: &mut W) {}
}

/// Drives straight along the heading captured at activation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveForward {
    heading: Vec3,
}

impl MoveForward {
    pub fn heading(&self) -> Vec3 {
        self.heading
    }
}

impl<W: AgentWorld> TimedBehavior<W> for MoveForward {
    fn on_start(&mut self, world: &mut W) {
        self.heading = world.motion().forward();
    }

    fn on_update(&mut self, world: &mut W) {
        world.motion().move_in(self.heading);
    }

    fn on_stop(&mut self, world: &mut W) {
        self.heading = Vec3::ZERO;
        world.motion().move_in(Vec3::ZERO);
    }
}

/// Arcs: turns one way every tick while moving along the current facing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotatedMove {
    bias: SignBias,
    sign: f32,
}

impl RotatedMove {
    pub fn new(bias: SignBias) -> Self {
        Self { bias, sign: 0.0 }
    }

    /// `-1`/`+1` while active, `0` otherwise.
    pub fn sign(&self) -> f32 {
        self.sign
    }
}

impl<W: AgentWorld> TimedBehavior<W> for RotatedMove {
    fn on_start(&mut self, world: &mut W) {
        self.sign = self.bias.sample(world.rng()).as_f32();
    }

    fn on_update(&mut self, world: &mut W) {
        let motion = world.motion();
        motion.rotate(self.sign);
        let facing = motion.forward();
        motion.move_in(facing);
    }

    fn on_stop(&mut self, _world: &mut W) {
        self.sign = 0.0;
    }
}

/// Turns on the spot, holding linear motion at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotateInPlace {
    bias: SignBias,
    sign: f32,
}

impl RotateInPlace {
    pub fn new(bias: SignBias) -> Self {
        Self { bias, sign: 0.0 }
    }

    pub fn sign(&self) -> f32 {
        self.sign
    }
}

impl<W: AgentWorld> TimedBehavior<W> for RotateInPlace {
    fn on_start(&mut self, world: &mut W) {
        world.motion().stop();
        self.sign = self.bias.sample(world.rng()).as_f32();
    }

    fn on_update(&mut self, world: &mut W) {
        let motion = world.motion();
        motion.stop();
        motion.rotate(self.sign);
    }

    fn on_stop(&mut self, _world: &mut W) {
        self.sign = 0.0;
    }
}

/// Reverses away from whatever is in front, tracking the live facing.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveBackward;

impl<W: AgentWorld> TimedBehavior<W> for MoveBackward {
    fn on_update(&mut self, world: &mut W) {
        let motion = world.motion();
        let back = -motion.forward();
        motion.move_in(back);
    }

    fn on_stop(&mut self, world: &mut W) {
        world.motion().stop();
    }
}
