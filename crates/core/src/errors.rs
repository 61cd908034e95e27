use thiserror::Error;

use crate::domain::criteria::ScoringDimension;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid priority weight for {dimension:?}: {value}")]
    InvalidWeight { dimension: ScoringDimension, value: f64 },
    #[error("invalid budget range: min {min} is above max {max}")]
    InvalidBudget { min: String, max: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("input failure: {0}")]
    Input(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in command envelopes.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain_validation",
            Self::Input(_) => "input",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(_) => "The request could not be processed. Check inputs and try again.",
            Self::Input(_) => "The input could not be read. Check the file path and JSON shape.",
            Self::Configuration(_) => "The configuration is invalid. Run `policyscope config`.",
        }
    }
}
