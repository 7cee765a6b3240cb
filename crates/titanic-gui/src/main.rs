//! Titanic survival predictor - desktop GUI
//!
//! Pick passenger features in the sidebar and score them with a trained
//! pipeline.

mod app;
mod views;

use eframe::egui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Titanic Survival Predictor")
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Survival Predictor",
        options,
        Box::new(|cc| Ok(Box::new(app::TitanicApp::new(cc)))),
    )
}
