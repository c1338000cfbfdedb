mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod view;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::resolve();
    log::info!("Using dataset {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // Loaded once for the session; a failure is shown in the top bar.
    let mut state = AppState::new(config.clone());
    state.load(&config.data_path);

    eframe::run_native(
        "Superstore Sales Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
