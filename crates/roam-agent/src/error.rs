use roam_core::{DurationError, MachineError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("invalid `{behavior}` duration: {source}")]
    InvalidDuration {
        behavior: &'static str,
        #[source]
        source: DurationError,
    },

    #[error(transparent)]
    Machine(#[from] MachineError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
