use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};
use pct_sim::TimeSeries;

#[derive(Default)]
pub struct ResponsePlot {
    reset_bounds: bool,
}

impl ResponsePlot {
    /// Snap back to the default window on the next frame.
    pub fn reset_view(&mut self) {
        self.reset_bounds = true;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, series: &TimeSeries) {
        ui.heading("Process Response");
        ui.separator();

        let process: PlotPoints = series
            .iter()
            .map(|s| [s.time, s.process_value])
            .collect();
        let setpoint: PlotPoints = series.iter().map(|s| [s.time, s.setpoint]).collect();

        let mut plot = Plot::new("process_response")
            .legend(Legend::default())
            .x_axis_label("Time (s)")
            .y_axis_label("Process Variable")
            .include_x(0.0)
            .include_x(50.0)
            .include_y(0.0)
            .include_y(2.0);
        if std::mem::take(&mut self.reset_bounds) {
            plot = plot.reset();
        }

        plot.show(ui, |plot_ui| {
            plot_ui.line(Line::new(process).name("Process Variable"));
            plot_ui.line(
                Line::new(setpoint)
                    .name("Setpoint")
                    .style(LineStyle::dashed_loose()),
            );
        });
    }
}
