use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::present::{Metrics, RedactedTable};

/// Households, latest selected year and unit total, side by side.
pub fn metrics_strip(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(3, |cols| {
        metric(&mut cols[0], "總裝設戶數", format!("{} 戶", metrics.households));
        metric(&mut cols[1], "最新裝設年度", metrics.latest_year_label());
        metric(&mut cols[2], "總裝設顆數", format!("{} 顆", metrics.units));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

/// Collapsible preview of the filtered rows with identity columns removed.
pub fn detail_table(ui: &mut Ui, table: &RedactedTable) {
    egui::CollapsingHeader::new("查看明細資料 (已自動隱藏身分證字號與電話)")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(360.0)
                    .columns(Column::auto().at_least(60.0), table.columns.len())
                    .header(22.0, |mut header| {
                        for name in &table.columns {
                            header.col(|ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, table.rows.len(), |mut row| {
                            let cells = &table.rows[row.index()];
                            for cell in cells {
                                row.col(|ui| {
                                    ui.label(cell.to_string());
                                });
                            }
                        });
                    });
            });
        });
}
