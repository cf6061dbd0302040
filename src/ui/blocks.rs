//! Drawing of converted Markdown blocks in the preview pane

use eframe::egui::{self, Color32, FontId, RichText, Ui};

use crate::core::blocks::{Block, Span};

/// Render every block of the preview artifact
pub fn render_blocks(ui: &mut Ui, blocks: &[Block]) {
    for block in blocks {
        render_block(ui, block);
    }
}

fn render_block(ui: &mut Ui, block: &Block) {
    match block {
        Block::Heading { level, spans } => render_heading(ui, *level, spans),
        Block::Paragraph { spans, quote_depth } => render_paragraph(ui, spans, *quote_depth),
        Block::ListItem {
            depth,
            marker,
            spans,
        } => render_list_item(ui, *depth, marker, spans),
        Block::CodeBlock { lang, code } => render_code_block(ui, lang.as_deref(), code),
        Block::Table { headers, rows } => render_table(ui, headers, rows),
        Block::Html(html) => render_code_block(ui, Some("html"), html),
        Block::Rule => {
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);
        }
    }
}

fn render_heading(ui: &mut Ui, level: u8, spans: &[Span]) {
    let font_size = match level {
        1 => 28.0,
        2 => 24.0,
        3 => 20.0,
        4 => 18.0,
        5 => 16.0,
        _ => 14.0,
    };

    ui.horizontal_wrapped(|ui| {
        for span in spans {
            ui.label(span_text(span).font(FontId::proportional(font_size)).strong());
        }
    });

    ui.add_space(match level {
        1 => 12.0,
        2 => 10.0,
        _ => 6.0,
    });
}

fn render_paragraph(ui: &mut Ui, spans: &[Span], quote_depth: usize) {
    if quote_depth == 0 {
        render_spans(ui, spans);
        ui.add_space(8.0);
        return;
    }

    egui::Frame::new()
        .fill(Color32::from_rgb(35, 35, 40))
        .inner_margin(egui::Margin {
            left: 12 * quote_depth.min(4) as i8,
            right: 8,
            top: 6,
            bottom: 6,
        })
        .show(ui, |ui| {
            // Left border
            let rect = ui.max_rect();
            ui.painter().rect_filled(
                egui::Rect::from_min_size(
                    rect.min - egui::vec2(12.0, 6.0),
                    egui::vec2(4.0, rect.height() + 12.0),
                ),
                0.0,
                Color32::from_rgb(100, 100, 120),
            );
            render_spans(ui, spans);
        });
    ui.add_space(8.0);
}

fn render_list_item(ui: &mut Ui, depth: usize, marker: &str, spans: &[Span]) {
    ui.horizontal_wrapped(|ui| {
        ui.add_space(16.0 * depth as f32);
        ui.label(RichText::new(marker).color(Color32::from_rgb(150, 150, 150)));
        ui.add_space(4.0);
        for span in spans {
            render_span(ui, span);
        }
    });
    ui.add_space(2.0);
}

fn render_code_block(ui: &mut Ui, lang: Option<&str>, code: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(40, 40, 40))
        .stroke(egui::Stroke::new(1.0, Color32::from_rgb(60, 60, 60)))
        .inner_margin(egui::Margin::same(8))
        .outer_margin(egui::Margin::symmetric(0, 4))
        .corner_radius(4.0)
        .show(ui, |ui| {
            if let Some(lang) = lang {
                ui.label(
                    RichText::new(lang)
                        .font(FontId::monospace(12.0))
                        .color(Color32::from_rgb(128, 128, 128)),
                );
                ui.add_space(4.0);
            }
            ui.label(
                RichText::new(code.trim_end_matches('\n'))
                    .font(FontId::monospace(14.0))
                    .color(Color32::from_rgb(200, 200, 200)),
            );
        });

    ui.add_space(8.0);
}

fn render_table(ui: &mut Ui, headers: &[Vec<Span>], rows: &[Vec<Vec<Span>>]) {
    egui::Grid::new(ui.next_auto_id())
        .striped(true)
        .min_col_width(60.0)
        .show(ui, |ui| {
            for cell in headers {
                ui.horizontal_wrapped(|ui| {
                    for span in cell {
                        ui.label(span_text(span).strong());
                    }
                });
            }
            ui.end_row();

            for row in rows {
                for cell in row {
                    ui.horizontal_wrapped(|ui| render_spans(ui, cell));
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
}

fn render_spans(ui: &mut Ui, spans: &[Span]) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            render_span(ui, span);
        }
    });
}

fn render_span(ui: &mut Ui, span: &Span) {
    match &span.link {
        Some(url) => {
            ui.hyperlink_to(span_text(span), url);
        }
        None => {
            ui.label(span_text(span));
        }
    }
}

fn span_text(span: &Span) -> RichText {
    let mut text = RichText::new(&span.text);
    if span.code {
        text = text
            .font(FontId::monospace(14.0))
            .background_color(Color32::from_rgb(45, 45, 45));
    }
    if span.strong {
        text = text.strong();
    }
    if span.emphasis {
        text = text.italics();
    }
    text
}
