use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the closures.
    let categories: Vec<String> = dataset
        .category_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let options = state
        .view
        .as_ref()
        .map(|v| v.sub_category_options.clone())
        .unwrap_or_default();
    let current = state.selection.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Category single-select ----
            ui.strong("Select a Category");
            let selected_text = current
                .category
                .clone()
                .unwrap_or_else(|| "Choose a Category".to_string());
            egui::ComboBox::from_id_salt("category")
                .selected_text(selected_text)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for cat in &categories {
                        let is_current = current.category.as_deref() == Some(cat.as_str());
                        if ui.selectable_label(is_current, cat).clicked() && !is_current {
                            state.select_category(Some(cat.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Sub-category multi-select ----
            let header_text = format!(
                "Select Sub-Categories  ({}/{})",
                current.sub_categories.len(),
                options.len()
            );
            ui.strong(header_text);

            if options.is_empty() {
                ui.label("Choose a Category first.");
                return;
            }

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for sub in &options {
                let mut checked = current.sub_categories.contains(sub);
                let swatch = current
                    .category
                    .as_deref()
                    .map(|c| state.category_colors.color_for(c))
                    .unwrap_or(Color32::GRAY);
                let text = if checked {
                    RichText::new(sub).color(swatch)
                } else {
                    RichText::new(sub)
                };
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_sub_category(sub);
                }
            }
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

        if let Some(ds) = &state.dataset {
            let selected = state.view.as_ref().map_or(0, |v| v.selected_rows);
            ui.label(format!("{} orders loaded, {} selected", ds.len(), selected));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open order data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
