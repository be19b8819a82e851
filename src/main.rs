mod app;
mod color;
mod state;
mod ui;

use anyhow::Context;
use app::FindexApp;
use eframe::egui;
use findex_explorer::config::AppConfig;
use findex_explorer::data::DatasetStore;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::resolve()?;

    // No dashboard without data: a failed initial load ends the process.
    let store = DatasetStore::new(&config.data_path);
    let table = store
        .load()
        .with_context(|| format!("loading survey data from {}", config.data_path.display()))?;
    let mut state = AppState::default();
    state.set_dataset(store, table)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Findex Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(FindexApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
