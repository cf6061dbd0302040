//! Status bar along the bottom of the window

use eframe::egui;

/// Status message, cursor position and version
pub struct StatusBar;

impl StatusBar {
    pub fn show(ui: &mut egui::Ui, message: &str, cursor: Option<usize>, version: &str) {
        ui.horizontal(|ui| {
            ui.label(message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(format!("v{}", version)).weak());
                ui.separator();
                if let Some(position) = cursor {
                    ui.label(format!("Cursor Position: {}", position));
                }
            });
        });
    }
}
