//! Preview panel: rendered Markdown or the generated HTML source

use eframe::egui;

use super::blocks::render_blocks;
use crate::core::workspace::Workspace;

/// What the preview pane displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    #[default]
    Rendered,
    Html,
}

/// Markdown preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, workspace: &Workspace, mode: &mut PreviewMode) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("HTML Preview").weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.selectable_value(mode, PreviewMode::Html, "HTML");
                ui.selectable_value(mode, PreviewMode::Rendered, "Rendered");
            });
        });
        ui.add_space(8.0);

        let artifact = workspace.preview().artifact();

        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .show(ui, |ui| {
                if artifact.is_empty() {
                    Self::show_empty(ui);
                    return;
                }
                match mode {
                    PreviewMode::Rendered => render_blocks(ui, &artifact.blocks),
                    PreviewMode::Html => {
                        ui.add(
                            egui::TextEdit::multiline(&mut artifact.html.as_str())
                                .code_editor()
                                .desired_width(f32::INFINITY),
                        );
                    }
                }
            });
    }

    /// Show empty state
    fn show_empty(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Nothing to preview");
            ui.label("Start typing Markdown in the editor");
        });
    }
}
