//! Discrete PID controller.
//!
//! Each call to [`PidController::compute`] performs one sample of the law
//!
//! ```text
//! e[n]  = sp - pv
//! I[n]  = I[n-1] + e[n] * dt
//! D[n]  = (e[n] - e[n-1]) / dt
//! u[n]  = kp * e[n] + ki * I[n] + kd * D[n]
//! ```
//!
//! There is no anti-windup, no output clamping and no derivative filter.
//! After the memory is cleared, `e[n-1]` is taken as zero, so the first
//! sample carries a derivative kick of `kd * e[0] / dt`.

use crate::error::ControlResult;
use pct_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// PID gains. Any finite value is accepted, including zero and negative
/// gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain (1/s).
    pub ki: f64,
    /// Derivative gain (s).
    pub kd: f64,
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> ControlResult<Self> {
        Ok(Self {
            kp: ensure_finite(kp, "kp")?,
            ki: ensure_finite(ki, "ki")?,
            kd: ensure_finite(kd, "kd")?,
        })
    }

    /// Proportional-only gains.
    pub fn proportional(kp: f64) -> Self {
        Self {
            kp,
            ki: 0.0,
            kd: 0.0,
        }
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::proportional(1.0)
    }
}

/// Feedback memory of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidControllerState {
    /// Rectangular running sum of `error * dt`.
    pub integral: f64,
    /// Error seen by the previous sample.
    pub previous_error: f64,
}

/// PID controller with its gains and memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    gains: PidGains,
    dt: f64,
    state: PidControllerState,
}

impl PidController {
    /// Create a controller with cleared memory.
    ///
    /// # Errors
    ///
    /// Returns error if `dt` is not positive and finite.
    pub fn new(gains: PidGains, dt: f64) -> ControlResult<Self> {
        let dt = ensure_positive(dt, "step interval")?;
        Ok(Self {
            gains,
            dt,
            state: PidControllerState::default(),
        })
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Replace the gains. The integral and previous error are kept.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    pub fn step_interval(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> PidControllerState {
        self.state
    }

    /// Compute the control action for one sample.
    ///
    /// Updates the integral first, then the previous error, then returns
    /// the combined output.
    pub fn compute(&mut self, setpoint: f64, process_variable: f64) -> f64 {
        let error = setpoint - process_variable;

        self.state.integral += error * self.dt;
        let derivative = (error - self.state.previous_error) / self.dt;
        self.state.previous_error = error;

        self.gains.kp * error + self.gains.ki * self.state.integral + self.gains.kd * derivative
    }

    /// Zero the integral and the previous error. Gains are untouched.
    pub fn clear(&mut self) {
        self.state = PidControllerState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only_returns_error() {
        let mut pid = PidController::new(PidGains::proportional(1.0), 0.1).unwrap();
        assert_eq!(pid.compute(1.0, 0.25), 0.75);
        assert_eq!(pid.compute(-3.0, 2.0), -5.0);
        assert_eq!(pid.compute(0.0, 0.0), 0.0);
    }

    #[test]
    fn integral_accumulates_rectangular_sum() {
        let mut pid = PidController::new(PidGains::new(0.0, 1.0, 0.0).unwrap(), 0.1).unwrap();

        // Constant error of 1.0 for 10 samples
        let mut out = 0.0;
        for _ in 0..10 {
            out = pid.compute(1.0, 0.0);
        }

        assert!((pid.state().integral - 1.0).abs() < 1e-12);
        assert!((out - 1.0).abs() < 1e-12);
    }

    #[test]
    fn first_sample_has_derivative_kick() {
        let mut pid = PidController::new(PidGains::new(0.0, 0.0, 1.0).unwrap(), 0.1).unwrap();

        // previous_error starts at zero: D = (2 - 0) / 0.1
        let out = pid.compute(2.0, 0.0);
        assert!((out - 20.0).abs() < 1e-9);

        // Unchanged error: no derivative action
        let out = pid.compute(2.0, 0.0);
        assert!(out.abs() < 1e-12);
    }

    #[test]
    fn memory_updates_once_per_compute() {
        let mut pid = PidController::new(PidGains::default(), 0.5).unwrap();
        pid.compute(1.0, 0.2);
        let state = pid.state();
        assert!((state.integral - 0.4).abs() < 1e-12);
        assert!((state.previous_error - 0.8).abs() < 1e-12);

        pid.compute(1.0, 0.6);
        let state = pid.state();
        assert!((state.integral - 0.6).abs() < 1e-12);
        assert!((state.previous_error - 0.4).abs() < 1e-12);
    }

    #[test]
    fn set_gains_keeps_memory_and_clear_keeps_gains() {
        let mut pid = PidController::new(PidGains::proportional(2.0), 0.1).unwrap();
        pid.compute(1.0, 0.0);
        let before = pid.state();

        let gains = PidGains::new(-1.0, 0.5, 0.25).unwrap();
        pid.set_gains(gains);
        assert_eq!(pid.state(), before);
        assert_eq!(pid.gains(), gains);

        pid.clear();
        assert_eq!(pid.state(), PidControllerState::default());
        assert_eq!(pid.gains(), gains);
    }

    #[test]
    fn invalid_controller_params() {
        assert!(PidController::new(PidGains::default(), 0.0).is_err());
        assert!(PidController::new(PidGains::default(), -0.1).is_err());
        assert!(PidGains::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(PidGains::new(1.0, f64::INFINITY, 0.0).is_err());
    }
}
