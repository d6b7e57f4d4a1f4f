//! Simulation configuration.
//!
//! Two layers:
//! - [`SimConfig`]: the static setup (plant constants, step interval, initial
//!   tuning, reset policy), loadable from YAML
//! - [`TuningForm`]: the four editable text fields a front end shows for
//!   `kp`, `ki`, `kd` and `setpoint`, read once each time a run starts

use crate::error::{SimError, SimResult};
use pct_controls::PidGains;
use pct_core::{ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// First-order plant constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// Static gain.
    pub gain: f64,
    /// Time constant (seconds).
    pub time_constant_s: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            gain: 1.0,
            time_constant_s: 5.0,
        }
    }
}

/// What `reset` does to the controller's integral and previous error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Zero the integral and previous error along with the plant output.
    #[default]
    ClearController,
    /// Leave the controller memory as it was. Only the plant output, clock
    /// and series are cleared.
    KeepController,
}

/// Controller gains and setpoint applied at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub setpoint: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            kd: 0.0,
            setpoint: 1.0,
        }
    }
}

impl Tuning {
    pub fn gains(&self) -> PidGains {
        PidGains {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        PidGains::new(self.kp, self.ki, self.kd)?;
        ensure_finite(self.setpoint, "setpoint")?;
        Ok(())
    }
}

/// Raw text of the tuning fields, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuningForm {
    pub kp: String,
    pub ki: String,
    pub kd: String,
    pub setpoint: String,
}

impl TuningForm {
    /// Read all four fields.
    ///
    /// Fails on the first field that is not a finite real number and names
    /// it in the error. Surrounding whitespace is ignored.
    pub fn parse(&self) -> SimResult<Tuning> {
        Ok(Tuning {
            kp: parse_field("kp", &self.kp)?,
            ki: parse_field("ki", &self.ki)?,
            kd: parse_field("kd", &self.kd)?,
            setpoint: parse_field("setpoint", &self.setpoint)?,
        })
    }
}

impl Default for TuningForm {
    fn default() -> Self {
        Self::from(&Tuning::default())
    }
}

impl From<&Tuning> for TuningForm {
    fn from(tuning: &Tuning) -> Self {
        Self {
            kp: format!("{:?}", tuning.kp),
            ki: format!("{:?}", tuning.ki),
            kd: format!("{:?}", tuning.kd),
            setpoint: format!("{:?}", tuning.setpoint),
        }
    }
}

fn parse_field(field: &'static str, text: &str) -> SimResult<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SimError::InvalidConfig {
            field,
            value: text.to_string(),
        })
}

/// Complete simulation setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub plant: PlantConfig,
    /// Fixed logical step and timer period (seconds).
    pub step_interval_s: f64,
    /// Tuning shown in the form before the user edits anything.
    pub tuning: Tuning,
    pub reset_policy: ResetPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            plant: PlantConfig::default(),
            step_interval_s: 0.1,
            tuning: Tuning::default(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Check the constants that appear as divisors in the update laws.
    ///
    /// The step interval must also be shorter than the plant time constant;
    /// at or beyond it the explicit Euler update no longer approaches its
    /// target monotonically.
    pub fn validate(&self) -> SimResult<()> {
        ensure_finite(self.plant.gain, "process gain")?;
        let tau = ensure_positive(self.plant.time_constant_s, "process time constant")?;
        let dt = ensure_positive(self.step_interval_s, "step interval")?;
        if dt >= tau {
            return Err(SimError::InvalidArg {
                what: "step interval must be shorter than the process time constant",
            });
        }
        // Also the timer period
        if Duration::try_from_secs_f64(dt).is_err() {
            return Err(SimError::InvalidArg {
                what: "step interval does not fit a timer period",
            });
        }
        self.tuning.validate()
    }

    pub fn from_yaml_str(content: &str) -> SimResult<Self> {
        let config: SimConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> SimResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_yaml(path: &Path) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save_yaml(&self, path: &Path) -> SimResult<()> {
        self.validate()?;
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}
