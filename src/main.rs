#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod config;
mod orders;
mod timeline;
mod ui;

use eframe::egui;

fn main() -> eframe::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([960.0, 600.0])
        .with_title("Planboard");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Planboard",
        options,
        Box::new(|cc| Ok(Box::new(ui::PlanBoardApp::new(cc)))),
    )
}
