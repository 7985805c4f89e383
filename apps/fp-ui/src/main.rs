#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod map_view;
mod sidebar;
mod symbols;

use app::FlowPywrApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("FlowPywr"),
        ..Default::default()
    };

    eframe::run_native(
        "FlowPywr",
        options,
        Box::new(|cc| Ok(Box::new(FlowPywrApp::new(cc)))),
    )
}
