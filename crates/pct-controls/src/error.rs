//! Error types for control loop components.

use pct_core::CoreError;
use thiserror::Error;

/// Result type for control loop operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised while building control loop components.
///
/// Everything here is a construction-time precondition failure. Once a
/// component exists, its step and compute operations cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Numeric guard from pct-core rejected a parameter.
    #[error(transparent)]
    Numeric(#[from] CoreError),
}
