//! Simulation orchestrator and run lifecycle.
//!
//! ```text
//!            start                 toggle_pause
//!  Stopped ─────────▶ Running ◀──────────────▶ RunningPaused
//!     ▲                  │  ◀── start (resume) ──┘   │
//!     └──── stop/reset ──┴────────────────────────────┘
//! ```
//!
//! Per tick, in this order:
//! 1. controller sees the plant output left by the previous tick
//! 2. plant steps with the resulting control action
//! 3. logical time advances by one step interval
//! 4. the sample is appended to the series

use crate::config::{ResetPolicy, SimConfig, Tuning, TuningForm};
use crate::error::SimResult;
use crate::series::{Sample, TimeSeries};
use crate::trigger::{DeadlineTrigger, TickTrigger};
use pct_controls::{FirstOrderProcess, PidController, PidControllerState, PidGains};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Lifecycle state derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Stopped,
    Running,
    RunningPaused,
}

/// Run flags and the setpoint pulled at the last start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSession {
    pub running: bool,
    /// Only meaningful while `running` is set.
    pub paused: bool,
    pub setpoint: f64,
}

impl SimulationSession {
    pub fn state(&self) -> SimState {
        match (self.running, self.paused) {
            (false, _) => SimState::Stopped,
            (true, false) => SimState::Running,
            (true, true) => SimState::RunningPaused,
        }
    }
}

/// Result of one trigger firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The loop advanced and this sample was appended.
    Advanced(Sample),
    /// Paused: nothing computed, trigger re-armed.
    Paused,
    /// Not running: nothing computed, trigger left disarmed.
    Stopped,
}

impl TickOutcome {
    pub fn sample(&self) -> Option<Sample> {
        match self {
            TickOutcome::Advanced(sample) => Some(*sample),
            _ => None,
        }
    }
}

/// Closed-loop simulation driven by a [`TickTrigger`].
#[derive(Debug)]
pub struct Simulation<T: TickTrigger = DeadlineTrigger> {
    process: FirstOrderProcess,
    controller: PidController,
    session: SimulationSession,
    series: TimeSeries,
    time: f64,
    reset_policy: ResetPolicy,
    trigger: T,
}

impl Simulation<DeadlineTrigger> {
    /// Simulation with a polled deadline trigger.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        Self::new(config, DeadlineTrigger::new())
    }

    /// Run one tick if the trigger is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.trigger.poll(now) {
            Some(self.tick())
        } else {
            None
        }
    }
}

impl<T: TickTrigger> Simulation<T> {
    /// Build a stopped simulation at rest.
    ///
    /// The controller takes the configured initial gains and the series
    /// starts at `(0, 0, tuning.setpoint)`.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails [`SimConfig::validate`].
    pub fn new(config: &SimConfig, mut trigger: T) -> SimResult<Self> {
        config.validate()?;
        let dt = config.step_interval_s;
        let process = FirstOrderProcess::new(config.plant.gain, config.plant.time_constant_s, dt)?;
        let controller = PidController::new(config.tuning.gains(), dt)?;
        let setpoint = config.tuning.setpoint;
        trigger.cancel();

        Ok(Self {
            process,
            controller,
            session: SimulationSession {
                running: false,
                paused: false,
                setpoint,
            },
            series: TimeSeries::starting_at(setpoint),
            time: 0.0,
            reset_policy: config.reset_policy,
            trigger,
        })
    }

    pub fn state(&self) -> SimState {
        self.session.state()
    }

    pub fn session(&self) -> SimulationSession {
        self.session
    }

    pub fn session_setpoint(&self) -> f64 {
        self.session.setpoint
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Logical time of the last appended sample.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn process_output(&self) -> f64 {
        self.process.output()
    }

    pub fn gains(&self) -> PidGains {
        self.controller.gains()
    }

    pub fn controller_state(&self) -> PidControllerState {
        self.controller.state()
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    /// Trigger period: one step interval of wall-clock time.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.process.step_interval())
    }

    /// Start or resume a run, reading the tuning from text fields.
    ///
    /// From `Stopped` the form is parsed and applied before anything else
    /// changes; a field that does not parse leaves the simulation stopped
    /// and untouched. From `RunningPaused` the run resumes and the form is
    /// not read. From `Running` this is a no-op.
    pub fn start(&mut self, form: &TuningForm) -> SimResult<()> {
        self.start_from(|| form.parse())
    }

    /// Same as [`start`](Self::start) with an already parsed tuning.
    pub fn start_with(&mut self, tuning: Tuning) -> SimResult<()> {
        self.start_from(|| {
            tuning.validate()?;
            Ok(tuning)
        })
    }

    fn start_from(&mut self, pull: impl FnOnce() -> SimResult<Tuning>) -> SimResult<()> {
        match self.state() {
            SimState::Stopped => {
                let tuning = pull()?;
                self.controller.set_gains(tuning.gains());
                self.session = SimulationSession {
                    running: true,
                    paused: false,
                    setpoint: tuning.setpoint,
                };
                // First tick on the next scheduler turn
                self.trigger.arm(Duration::ZERO);
                info!(
                    kp = tuning.kp,
                    ki = tuning.ki,
                    kd = tuning.kd,
                    setpoint = tuning.setpoint,
                    time = self.time,
                    "simulation started"
                );
            }
            SimState::RunningPaused => {
                self.session.paused = false;
                info!(time = self.time, "simulation resumed");
            }
            SimState::Running => debug!("start ignored: already running"),
        }
        Ok(())
    }

    /// End the run and cancel the trigger. State is kept for inspection.
    pub fn stop(&mut self) {
        if !self.session.running {
            debug!("stop ignored: already stopped");
            return;
        }
        self.session.running = false;
        self.session.paused = false;
        self.trigger.cancel();
        info!(time = self.time, samples = self.series.len(), "simulation stopped");
    }

    /// Flip between `Running` and `RunningPaused`. The trigger keeps firing.
    pub fn toggle_pause(&mut self) {
        if !self.session.running {
            debug!("pause ignored: not running");
            return;
        }
        self.session.paused = !self.session.paused;
        if self.session.paused {
            info!(time = self.time, "simulation paused");
        } else {
            info!(time = self.time, "simulation resumed");
        }
    }

    /// Stop and return the plant, clock and series to the origin.
    ///
    /// Gains and the session setpoint are kept. Controller memory follows
    /// the configured [`ResetPolicy`].
    pub fn reset(&mut self) {
        self.session.running = false;
        self.session.paused = false;
        self.trigger.cancel();

        self.series = TimeSeries::starting_at(self.session.setpoint);
        self.time = 0.0;
        self.process.reset();
        if self.reset_policy == ResetPolicy::ClearController {
            self.controller.clear();
        }
        info!(policy = ?self.reset_policy, "simulation reset");
    }

    /// Handle one trigger firing.
    ///
    /// While paused, nothing numeric happens. While running (paused or not)
    /// the trigger is re-armed for one step interval after the tick.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = match self.state() {
            SimState::Stopped => return TickOutcome::Stopped,
            SimState::RunningPaused => TickOutcome::Paused,
            SimState::Running => TickOutcome::Advanced(self.advance()),
        };
        self.trigger.arm(self.tick_interval());
        outcome
    }

    fn advance(&mut self) -> Sample {
        let setpoint = self.session.setpoint;
        let control = self.controller.compute(setpoint, self.process.output());
        let process_value = self.process.step(control);
        self.time += self.process.step_interval();

        let sample = Sample {
            time: self.time,
            process_value,
            setpoint,
        };
        self.series.push(sample);
        trace!(time = self.time, control, process_value, "tick");
        sample
    }
}
