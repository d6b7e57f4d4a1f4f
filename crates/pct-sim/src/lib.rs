//! Real-time closed-loop simulation for the process control tutor.
//!
//! Provides:
//! - [`Simulation`]: the orchestrator owning plant, controller, session
//!   state and the recorded time series
//! - [`TickTrigger`] / [`DeadlineTrigger`]: the self re-arming timer seam
//!   between the orchestrator and whatever event loop hosts it
//! - [`SimConfig`] / [`TuningForm`]: configuration intake (YAML files and
//!   text fields)
//!
//! Everything runs on the caller's thread. A tick runs to completion before
//! the next one is armed, so no state is shared across threads.

pub mod config;
pub mod error;
pub mod series;
pub mod sim;
pub mod trigger;

pub use config::{PlantConfig, ResetPolicy, SimConfig, Tuning, TuningForm};
pub use error::{SimError, SimResult};
pub use series::{Sample, TimeSeries};
pub use sim::{SimState, Simulation, SimulationSession, TickOutcome};
pub use trigger::{DeadlineTrigger, TickTrigger};
