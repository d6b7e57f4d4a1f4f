//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or driving a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A configuration field could not be read as a real number.
    #[error("Invalid value for {field}: {value:?} is not a finite real number")]
    InvalidConfig { field: &'static str, value: String },

    /// A number was rejected by a finiteness or positivity guard.
    #[error("Invalid numeric value: {0}")]
    Numeric(#[from] pct_core::CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pct_controls::ControlError> for SimError {
    fn from(e: pct_controls::ControlError) -> Self {
        match e {
            pct_controls::ControlError::Numeric(inner) => SimError::Numeric(inner),
        }
    }
}
