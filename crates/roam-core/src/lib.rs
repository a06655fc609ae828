//! Deterministic, engine-agnostic state-machine scheduling engine.
//!
//! A [`StateMachine`] owns one state instance per variant, cycles through a
//! default pipeline, and lets reactive overrides jump the line without losing
//! the pipeline position.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod clock;
pub mod error;
pub mod machine;
pub mod rng;
pub mod state;
pub mod timed;
pub mod world;

pub use agent::AgentId;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::{DurationError, MachineError, Result};
pub use machine::StateMachine;
pub use rng::{derive_seed, DeterministicRng, RandomSource, Sign, SignBias, SplitMix64};
pub use state::{State, StateKey};
pub use timed::{DurationRange, TimeConstrained, TimeWindow, TimedBehavior};
pub use world::World;
