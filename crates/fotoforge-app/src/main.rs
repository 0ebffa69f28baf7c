//! FotoForge desktop application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod preview;

use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1480.0, 880.0])
            .with_title("FotoForge"),
        ..Default::default()
    };

    eframe::run_native(
        "FotoForge",
        options,
        Box::new(|_cc| Ok(Box::new(app::EditorApp::default()))),
    )
}
