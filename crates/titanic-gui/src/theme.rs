//! Theme and styling constants

use titanic_infer::Severity;

/// Spacing constants
pub mod spacing {
    pub const XS: f32 = 4.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

/// Message colors not covered by egui's visuals
pub mod colors {
    use egui::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);
    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
}

pub fn severity_color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Success => colors::SUCCESS,
        Severity::Info => colors::INFO,
        Severity::Warning => colors::WARNING,
        Severity::Error => colors::ERROR,
    }
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => egui_phosphor::regular::CHECK_CIRCLE,
        Severity::Info => egui_phosphor::regular::INFO,
        Severity::Warning => egui_phosphor::regular::WARNING,
        Severity::Error => egui_phosphor::regular::X_CIRCLE,
    }
}

pub fn apply_visuals(ctx: &egui::Context, dark_mode: bool) {
    let visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    ctx.set_visuals(visuals);
}
