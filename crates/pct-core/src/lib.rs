//! pct-core: shared numeric foundation for the process control tutor.
//!
//! Contains:
//! - numeric (Real + tolerances + float guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
