//! Autonomous-agent behavior pipeline built on `roam-core`.
//!
//! An [`AgentController`] cycles an agent between moving forward and arcing,
//! and overrides that routine when the host reports collisions: a wall makes
//! it stop, back off and turn; another agent makes it turn on the spot.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod behaviors;
pub mod collision;
pub mod config;
pub mod controller;
pub mod error;
pub mod math;
pub mod motion;
pub mod world;

pub use behaviors::{
    Behavior, Idle, IdleState, MoveBackward, MoveBackwardState, MoveForward, MoveForwardState,
    RotateInPlace, RotateState, RotatedMove, RotatedMoveState,
};
pub use collision::{CollisionEvent, CollisionEventSource, CollisionQueue};
pub use config::{BehaviorConfig, DurationConfig};
pub use controller::{AgentController, BehaviorMachine};
pub use error::{AgentError, Result};
pub use math::Vec3;
pub use motion::{BodyConfig, KinematicBody, MotionPort};
pub use world::{AgentHost, AgentWorld};
