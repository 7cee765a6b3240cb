//! Main application struct and eframe::App implementation

use crate::views::{MainPanelView, SidebarView};
use eframe::egui;
use titanic_gui::settings::{load_settings, save_settings};
use titanic_gui::state::AppState;
use titanic_gui::theme;

/// Main application struct
pub struct TitanicApp {
    state: AppState,
}

impl TitanicApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Initialize Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = load_settings();
        tracing::info!("Loaded settings: dark_mode={}", settings.general.dark_mode);
        theme::apply_visuals(&cc.egui_ctx, settings.general.dark_mode);

        let state = AppState::new(settings);
        tracing::info!("{}", state.load_status());
        Self { state }
    }
}

impl eframe::App for TitanicApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut file_to_upload = self.handle_shortcuts(ctx);

        egui::SidePanel::left("input_controls")
            .resizable(true)
            .default_width(300.0)
            .min_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(path) = SidebarView::show(ui, &mut self.state) {
                        file_to_upload = Some(path);
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                MainPanelView::show(ui, &mut self.state);
            });
        });

        if let Some(path) = file_to_upload {
            tracing::info!("Uploading model from {:?}", path);
            self.state.upload_file(&path);
        }

        if self.state.settings_dirty {
            theme::apply_visuals(ctx, self.state.settings.general.dark_mode);
            if let Err(e) = save_settings(&self.state.settings) {
                tracing::error!("Failed to save settings: {}", e);
            }
            self.state.settings_dirty = false;
        }
    }
}

impl TitanicApp {
    /// Cmd/Ctrl+Enter predicts, Cmd/Ctrl+O picks a model to upload.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) -> Option<std::path::PathBuf> {
        let modifiers = ctx.input(|i| i.modifiers);
        let cmd_or_ctrl = if cfg!(target_os = "macos") {
            modifiers.command
        } else {
            modifiers.ctrl
        };
        if !cmd_or_ctrl {
            return None;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.state.predict();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::O)) {
            return rfd::FileDialog::new()
                .add_filter("Model artifact", &["json", "toml"])
                .pick_file();
        }
        None
    }
}
