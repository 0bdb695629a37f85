use thiserror::Error;

use crate::flows::ChatFlowError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    ChatFlow(#[from] ChatFlowError),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Shopper-safe notice for the conversation surface. Detail stays in the
    /// logs; nothing here is fatal to the process.
    pub fn shopper_notice(&self) -> &'static str {
        match self {
            Self::Domain(_) => "That didn't work. Please try that step again.",
            Self::Persistence(_) => {
                "We couldn't save that just now. Please try again in a moment."
            }
            Self::Integration(_) => {
                "Something is temporarily unavailable. Please try again shortly."
            }
            Self::Configuration(_) => "Something went wrong on our side.",
        }
    }
}
