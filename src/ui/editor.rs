//! Markdown editor panel

use std::ops::Range;

use eframe::egui;

use crate::core::config::EditorConfig;
use crate::core::document::Document;

const EDITOR_ID: &str = "littera_editor";

/// What happened in the editor this frame
#[derive(Debug, Default)]
pub struct EditorOutput {
    /// New content, if the user typed
    pub edited: Option<String>,
    /// Cursor position as a character offset
    pub cursor: Option<usize>,
}

/// Markdown editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel. `select` highlights a character range, used to
    /// jump to search hits.
    pub fn show(
        ui: &mut egui::Ui,
        document: &Document,
        config: &EditorConfig,
        select: Option<Range<usize>>,
    ) -> EditorOutput {
        let id = egui::Id::new(EDITOR_ID);
        let jumped = select.is_some();
        if let Some(span) = select {
            Self::select(ui.ctx(), id, span);
        }

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Text Editor").weak());
            if !document.is_editable() {
                ui.label(egui::RichText::new("read-only").italics().weak());
            }
        });
        ui.add_space(8.0);

        let mut result = EditorOutput::default();

        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                // Read-only text goes in as &str, which egui refuses to modify
                // but still lets the user select.
                let mut owned = document.content().to_owned();
                let mut borrowed = document.content();
                let buffer: &mut dyn egui::TextBuffer = if document.is_editable() {
                    &mut owned
                } else {
                    &mut borrowed
                };

                let output = egui::TextEdit::multiline(buffer)
                    .id(id)
                    .font(egui::FontId::proportional(config.font_size))
                    .lock_focus(config.capture_tab)
                    .frame(false)
                    .desired_width(f32::INFINITY)
                    .desired_rows(30)
                    .show(ui);

                if jumped {
                    output.response.request_focus();
                }
                if output.response.changed() && document.is_editable() {
                    result.edited = Some(owned);
                }
                result.cursor = output.state.cursor.char_range().map(|r| r.primary.index);
            });

        result
    }

    fn select(ctx: &egui::Context, id: egui::Id, span: Range<usize>) {
        let mut state = egui::text_edit::TextEditState::load(ctx, id).unwrap_or_default();
        let range = egui::text::CCursorRange::two(
            egui::text::CCursor::new(span.start),
            egui::text::CCursor::new(span.end),
        );
        state.cursor.set_char_range(Some(range));
        state.store(ctx, id);
    }
}
