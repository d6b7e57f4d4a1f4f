//! Numerical building blocks of the closed loop.
//!
//! The loop is made of two leaf components that share a fixed step interval:
//! - a first-order lag plant ([`FirstOrderProcess`]) advanced by explicit Euler
//! - a discrete PID law ([`PidController`]) with rectangular integration and a
//!   backward-difference derivative
//!
//! Neither component clamps, filters or saturates anything. The dynamics are
//! kept transparent so that unstable or aggressive tunings show up as such.

pub mod controller;
pub mod error;
pub mod process;

pub use controller::{PidController, PidControllerState, PidGains};
pub use error::{ControlError, ControlResult};
pub use process::{FirstOrderProcess, ProcessState};
