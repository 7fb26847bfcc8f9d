use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterColumn;
use crate::data::source::CsvFileSource;
use crate::state::AppState;
use crate::ui::{map, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Label of each multi-select, in display order.
const FILTERS: [(FilterColumn, &str); 3] = [
    (FilterColumn::Year, "選擇年度"),
    (FilterColumn::Eligibility, "選擇對象類別"),
    (FilterColumn::Position, "選擇裝置位置"),
];

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🗺️ 資料篩選");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone the options so we can mutate state inside the loop.
    let domains = state.domains.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (column, label) in FILTERS {
                // No eligibility column in the worksheet → no eligibility filter.
                let Some(all_values) = domains.get(column) else {
                    continue;
                };
                let n_selected = state.selection.get(column).map_or(0, |s| s.len());
                let header_text = format!("{label}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(label)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(column);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(column);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .selection
                                .get(column)
                                .is_some_and(|s| s.contains(val));

                            let mut text = RichText::new(val.to_string());
                            if column == FilterColumn::Year {
                                text = text.color(state.year_colors.color_for(val));
                            }

                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(column, val);
                            }
                        }
                    });
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
            if ui.button("Reload sheet").clicked() {
                state.reload_sheet();
                ui.close_menu();
            }
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows fetched, {} with coordinates, {} shown",
                ds.source_rows,
                ds.len(),
                state.presentation.points.len()
            ));
        }

        if let Some(origin) = &state.origin {
            ui.separator();
            ui.label(RichText::new(origin).weak());
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Title, error banner, metrics, map and detail table.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(&state.config.display.title);
    ui.label(&state.config.display.subtitle);
    ui.add_space(8.0);

    if let Some(message) = &state.error {
        error_banner(ui, message);
        return;
    }

    let Some(metrics) = &state.presentation.metrics else {
        ui.label("Loading…");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            table::metrics_strip(ui, metrics);
            ui.separator();

            ui.strong("📍 成功分隊轄區分佈點位");
            map::installation_map(ui, state);
            ui.add_space(8.0);

            table::detail_table(ui, &state.presentation.table);
        });
}

fn error_banner(ui: &mut Ui, message: &str) {
    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(0x4a, 0x1c, 0x1c))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(message).color(Color32::LIGHT_RED));
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open worksheet export")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&CsvFileSource { path });
    }
}
