#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::ProcessControlApp;
use pct_sim::{SimConfig, SimResult, Simulation};
use std::path::Path;

fn load_config() -> SimResult<SimConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => SimConfig::load_yaml(Path::new(&path)),
        None => Ok(SimConfig::default()),
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let (sim, config) = match load_config().and_then(|config| {
        let sim = Simulation::from_config(&config)?;
        Ok((sim, config))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("cannot set up simulation: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Process Control Teaching Tool"),
        ..Default::default()
    };

    eframe::run_native(
        "Process Control Teaching Tool",
        options,
        Box::new(move |cc| Ok(Box::new(ProcessControlApp::new(cc, sim, &config)))),
    )
}
