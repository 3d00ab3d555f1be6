#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use absketch::{AbsketchApp, AppServices};

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("absketch"),
        ..Default::default()
    };
    eframe::run_native(
        "absketch",
        options,
        Box::new(|cc| Ok(Box::new(AbsketchApp::new(cc, AppServices::default())))),
    )
}
