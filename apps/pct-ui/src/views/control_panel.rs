use pct_sim::{SimState, TuningForm};

const BUTTON_SIZE: [f32; 2] = [170.0, 26.0];

/// Command requested by a button press this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Start,
    Stop,
    TogglePause,
    Reset,
}

pub struct ControlPanel;

impl ControlPanel {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        form: &mut TuningForm,
        state: SimState,
        error: Option<&str>,
    ) -> Option<PanelAction> {
        let mut action = None;

        ui.heading("Control Parameters");
        ui.separator();

        egui::Grid::new("tuning_fields")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (label, text) in [
                    ("Kp", &mut form.kp),
                    ("Ki", &mut form.ki),
                    ("Kd", &mut form.kd),
                    ("Setpoint", &mut form.setpoint),
                ] {
                    ui.label(label);
                    ui.add(egui::TextEdit::singleline(text).desired_width(90.0));
                    ui.end_row();
                }
            });

        if state != SimState::Stopped {
            ui.small("Edits apply on the next start after Stop or Reset");
        }

        ui.add_space(8.0);

        if ui
            .add_sized(BUTTON_SIZE, egui::Button::new("Start Simulation"))
            .clicked()
        {
            action = Some(PanelAction::Start);
        }
        if ui
            .add_sized(BUTTON_SIZE, egui::Button::new("Stop Simulation"))
            .clicked()
        {
            action = Some(PanelAction::Stop);
        }
        let pause_label = if state == SimState::RunningPaused {
            "Resume Simulation"
        } else {
            "Pause Simulation"
        };
        if ui
            .add_enabled(
                state != SimState::Stopped,
                egui::Button::new(pause_label).min_size(BUTTON_SIZE.into()),
            )
            .clicked()
        {
            action = Some(PanelAction::TogglePause);
        }
        if ui
            .add_sized(BUTTON_SIZE, egui::Button::new("Reset Simulation"))
            .clicked()
        {
            action = Some(PanelAction::Reset);
        }

        ui.separator();
        let status = match state {
            SimState::Stopped => "Stopped",
            SimState::Running => "Running",
            SimState::RunningPaused => "Paused",
        };
        ui.label(format!("Status: {status}"));

        if let Some(message) = error {
            ui.colored_label(egui::Color32::RED, message);
        }

        action
    }
}
