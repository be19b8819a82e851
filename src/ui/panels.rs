use eframe::egui::{self, Color32, RichText, Ui};
use findex_explorer::glossary::{ABOUT_FINDEX, FINDEX_URL};

use crate::state::{AppState, Section};

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the sidebar: section selector plus the Findex blurb.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Explore Financial Insights");
    ui.separator();

    ui.label("Select an analysis section:");
    for section in Section::ALL {
        ui.radio_value(&mut state.section, section, section.label());
    }

    ui.add_space(12.0);
    ui.separator();

    ui.strong("What is Findex?");
    ui.label(ABOUT_FINDEX);
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label("For more information, visit the");
        ui.hyperlink_to("Global Findex website", FINDEX_URL);
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(store), Some(table)) = (&state.store, &state.table) {
            ui.label(format!(
                "{} respondents from {}",
                table.len(),
                store.path().display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Findex microdata")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
