mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use app::AlarmMapApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = DashboardConfig::default_path();
    let config = DashboardConfig::load(&config_path)?;
    log::info!(
        "Using worksheet '{}' of {}",
        config.source.worksheet,
        config.source.url
    );

    let font = match &config.display.font_path {
        Some(path) => Some(load_font(path)?),
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "住警器裝設地圖",
        options,
        Box::new(move |cc| {
            if let Some(bytes) = font {
                install_font(&cc.egui_ctx, bytes);
            }
            Ok(Box::new(AlarmMapApp::new(AppState::new(config))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}

fn load_font(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read font file: {path:?}"))
}

/// Register a CJK-capable fallback font so the Chinese headers render.
fn install_font(ctx: &egui::Context, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
}
