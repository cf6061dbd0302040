//! Floating find window

use eframe::egui;

/// What the user asked the find window to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindRequest {
    Find(String),
    FindNext,
    Closed,
}

#[derive(Default)]
pub struct FindDialog {
    visible: bool,
    term: String,
    focus_requested: bool,
    /// Match count of the last search, `Some(0)` when nothing matched
    count: Option<usize>,
}

impl FindDialog {
    pub fn open(&mut self) {
        if !self.visible {
            tracing::debug!("Find window opened");
        }
        self.visible = true;
        self.focus_requested = true;
    }

    pub fn set_count(&mut self, count: Option<usize>) {
        self.count = count;
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<FindRequest> {
        if !self.visible {
            return None;
        }

        let mut request = None;
        let mut open = true;

        egui::Window::new("Find")
            .collapsible(false)
            .resizable(false)
            .default_pos(egui::pos2(120.0, 120.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Search for");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.term).desired_width(200.0),
                    );
                    if self.focus_requested {
                        response.request_focus();
                        self.focus_requested = false;
                    }
                    if response.changed() {
                        self.count = None;
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        request = Some(FindRequest::Find(self.term.clone()));
                    }
                });

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    match self.count {
                        Some(0) => {
                            ui.label(egui::RichText::new("No matches").weak());
                        }
                        Some(n) => {
                            ui.label(egui::RichText::new(format!("{} match(es)", n)).weak());
                        }
                        None => {}
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Find Next (F3)").clicked() {
                            request = Some(FindRequest::FindNext);
                        }
                        if ui.button("Find").clicked() {
                            request = Some(FindRequest::Find(self.term.clone()));
                        }
                    });
                });
            });

        if !open {
            self.visible = false;
            self.count = None;
            tracing::debug!("Find window closed");
            return Some(FindRequest::Closed);
        }
        request
    }
}
