use thiserror::Error;

/// Precondition violations reported by [`StateMachine`](crate::StateMachine).
///
/// None of these are transient: the offending call is aborted and the caller
/// is expected to surface the error rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("state `{0}` is already registered")]
    DuplicateState(&'static str),

    #[error("state `{0}` is not registered")]
    StateNotFound(&'static str),

    #[error("override queue and default pipeline are both empty")]
    EmptyPipeline,
}

/// Malformed `[min, max]` duration window, rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DurationError {
    #[error("duration bounds must be finite (min={min}, max={max})")]
    NonFinite { min: f64, max: f64 },

    #[error("duration bounds must be non-negative (min={min}, max={max})")]
    Negative { min: f64, max: f64 },

    #[error("minimum duration {min} exceeds maximum duration {max}")]
    Inverted { min: f64, max: f64 },
}

pub type Result<T, E = MachineError> = std::result::Result<T, E>;
