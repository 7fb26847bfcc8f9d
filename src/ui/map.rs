use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::model::CellValue;
use crate::data::present::MAP_COLUMNS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Installation map (central panel)
// ---------------------------------------------------------------------------

/// Scatter the filtered installations, longitude on x and latitude on y,
/// one legend entry per year.
pub fn installation_map(ui: &mut Ui, state: &AppState) {
    let points = &state.presentation.points;
    if points.is_empty() {
        ui.label(
            RichText::new("⚠ 目前篩選條件下沒有可顯示的座標數據。").color(Color32::YELLOW),
        );
        return;
    }

    let mut by_year: BTreeMap<&CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    for p in points {
        by_year.entry(&p.year).or_default().push([p.lon, p.lat]);
    }

    let [lat_name, lon_name] = MAP_COLUMNS;

    Plot::new("installation_map")
        .height(480.0)
        .legend(Legend::default())
        .x_axis_label(lon_name)
        .y_axis_label(lat_name)
        .data_aspect(1.0)
        .label_formatter(move |name, value| {
            let coords = format!("{lat_name} {:.5}\n{lon_name} {:.5}", value.y, value.x);
            if name.is_empty() {
                coords
            } else {
                format!("{name}\n{coords}")
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (year, coords) in by_year {
                let series = Points::new(PlotPoints::from(coords))
                    .name(year.to_string())
                    .color(state.year_colors.color_for(year))
                    .radius(4.0);
                plot_ui.points(series);
            }
        });
}
