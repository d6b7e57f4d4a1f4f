//! First-order lag plant.
//!
//! The plant output approaches `gain * u` exponentially with time constant
//! `tau`:
//!
//! ```text
//! dy/dt = (gain * u - y) / tau
//! ```
//!
//! discretised with explicit Euler at the fixed step `dt`:
//!
//! ```text
//! y[n+1] = y[n] + (dt / tau) * (gain * u[n] - y[n])
//! ```
//!
//! Accuracy and stability need `dt` small relative to `tau`; the defaults
//! (`dt = 0.1 s`, `tau = 5 s`) give a per-step factor of 0.02.

use crate::error::ControlResult;
use pct_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Measured output of the plant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessState {
    /// Current output, in process units.
    pub output: f64,
}

/// First-order lag process model.
///
/// # Example
///
/// ```
/// use pct_controls::FirstOrderProcess;
///
/// let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
///
/// // Hold the input at 1.0 for 60 s of simulated time
/// for _ in 0..600 {
///     plant.step(1.0);
/// }
///
/// assert!(plant.output() > 0.99);
/// assert!(plant.output() < 1.0);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FirstOrderProcess {
    gain: f64,
    tau: f64,
    dt: f64,
    state: ProcessState,
}

impl FirstOrderProcess {
    /// Create a plant at rest (`output = 0`).
    ///
    /// # Arguments
    ///
    /// * `gain` - Static gain (any finite value)
    /// * `tau` - Time constant in seconds (must be positive)
    /// * `dt` - Step interval in seconds (must be positive)
    ///
    /// # Errors
    ///
    /// Returns error if `tau` or `dt` are not positive, or if any argument
    /// is not finite.
    pub fn new(gain: f64, tau: f64, dt: f64) -> ControlResult<Self> {
        let gain = ensure_finite(gain, "process gain")?;
        let tau = ensure_positive(tau, "process time constant")?;
        let dt = ensure_positive(dt, "step interval")?;
        Ok(Self {
            gain,
            tau,
            dt,
            state: ProcessState::default(),
        })
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn time_constant(&self) -> f64 {
        self.tau
    }

    pub fn step_interval(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn output(&self) -> f64 {
        self.state.output
    }

    /// Advance the output by one step with `input` held over the interval.
    ///
    /// Returns the updated output. No clamping is applied to either the
    /// input or the output.
    pub fn step(&mut self, input: f64) -> f64 {
        let y = self.state.output;
        self.state.output = y + (self.dt / self.tau) * (self.gain * input - y);
        self.state.output
    }

    /// Return the plant to rest.
    pub fn reset(&mut self) {
        self.state = ProcessState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pct_core::{CoreError, Tolerances, nearly_equal};

    fn tol() -> Tolerances {
        Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        }
    }

    #[test]
    fn single_step_matches_euler_update() {
        let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
        let y = plant.step(2.0);
        assert!(nearly_equal(y, 0.04, tol()));
        assert_eq!(plant.output(), y);
    }

    #[test]
    fn gain_scales_fixed_point() {
        let mut plant = FirstOrderProcess::new(3.0, 0.5, 0.01).unwrap();
        for _ in 0..5_000 {
            plant.step(2.0);
        }
        assert!((plant.output() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn negative_input_is_not_clamped() {
        let mut plant = FirstOrderProcess::new(1.0, 1.0, 0.1).unwrap();
        let y = plant.step(-50.0);
        assert!(nearly_equal(y, -5.0, tol()));
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut plant = FirstOrderProcess::new(1.0, 5.0, 0.1).unwrap();
        plant.step(10.0);
        assert!(plant.output() > 0.0);
        plant.reset();
        assert_eq!(plant.state(), ProcessState { output: 0.0 });
    }

    #[test]
    fn invalid_parameters() {
        assert!(FirstOrderProcess::new(1.0, 0.0, 0.1).is_err());
        assert!(FirstOrderProcess::new(1.0, -5.0, 0.1).is_err());
        assert!(FirstOrderProcess::new(1.0, 5.0, 0.0).is_err());
        assert!(FirstOrderProcess::new(f64::NAN, 5.0, 0.1).is_err());

        let err = FirstOrderProcess::new(1.0, 5.0, -0.1).unwrap_err();
        assert_eq!(
            err,
            crate::ControlError::Numeric(CoreError::NotPositive {
                what: "step interval",
                value: -0.1
            })
        );
    }
}
