use crate::views::{ControlPanel, PanelAction, ResponsePlot};
use pct_sim::{SimConfig, Simulation, TuningForm};
use std::time::Instant;

pub struct ProcessControlApp {
    sim: Simulation,
    form: TuningForm,
    control_panel: ControlPanel,
    response_plot: ResponsePlot,
    last_error: Option<String>,
}

impl ProcessControlApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, sim: Simulation, config: &SimConfig) -> Self {
        Self {
            sim,
            form: TuningForm::from(&config.tuning),
            control_panel: ControlPanel,
            response_plot: ResponsePlot::default(),
            last_error: None,
        }
    }

    fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::Start => match self.sim.start(&self.form) {
                Ok(()) => self.last_error = None,
                Err(e) => {
                    tracing::warn!("start rejected: {e}");
                    self.last_error = Some(e.to_string());
                }
            },
            PanelAction::Stop => self.sim.stop(),
            PanelAction::TogglePause => self.sim.toggle_pause(),
            PanelAction::Reset => {
                self.sim.reset();
                self.response_plot.reset_view();
            }
        }
    }
}

impl eframe::App for ProcessControlApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut action = None;

        egui::SidePanel::left("control_parameters")
            .resizable(false)
            .show(ctx, |ui| {
                action = self.control_panel.show(
                    ui,
                    &mut self.form,
                    self.sim.state(),
                    self.last_error.as_deref(),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.response_plot.show(ui, self.sim.series());
        });

        if let Some(action) = action {
            self.apply(action);
        }

        // Host end of the tick trigger: fire if due, then wake up for the next one
        let now = Instant::now();
        if self.sim.poll(now).is_some() {
            ctx.request_repaint();
        }
        if let Some(wait) = self.sim.trigger().time_until(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
