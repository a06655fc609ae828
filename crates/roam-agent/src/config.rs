//! Behavior tuning, resolved and validated before any agent is built.

use roam_core::{DurationRange, SignBias, StateKey};

use crate::{AgentError, Behavior, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `[min, max]` seconds for each timed behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DurationConfig {
    pub forward_move: DurationRange,
    pub backward_move: DurationRange,
    pub rotated_move: DurationRange,
    pub rotation: DurationRange,
    pub idle: DurationRange,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            forward_move: DurationRange::new(1.0, 2.0),
            backward_move: DurationRange::new(0.5, 0.75),
            rotated_move: DurationRange::new(1.5, 2.5),
            rotation: DurationRange::new(1.0, 2.5),
            idle: DurationRange::new(1.0, 3.0),
        }
    }
}

impl DurationConfig {
    pub fn range(&self, behavior: Behavior) -> DurationRange {
        match behavior {
            Behavior::Idle => self.idle,
            Behavior::MoveForward => self.forward_move,
            Behavior::RotatedMove => self.rotated_move,
            Behavior::Rotate => self.rotation,
            Behavior::MoveBackward => self.backward_move,
        }
    }

    /// Reject the first malformed range, naming the behavior it belongs to.
    pub fn validate(&self) -> Result<()> {
        for behavior in Behavior::ALL {
            self.range(behavior)
                .validate()
                .map_err(|source| AgentError::InvalidDuration {
                    behavior: behavior.name(),
                    source,
                })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    pub durations: DurationConfig,
    pub sign_bias: SignBias,
}

impl BehaviorConfig {
    pub fn validate(&self) -> Result<()> {
        self.durations.validate()
    }
}
