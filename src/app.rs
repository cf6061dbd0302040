//! Main application state and UI coordination

use std::ops::Range;
use std::path::PathBuf;

use eframe::egui;

use crate::core::builtin::{BuiltinDoc, DESCRIPTION, WEBSITE};
use crate::core::config::AppConfig;
use crate::core::persistence::load_header;
use crate::core::workspace::{Command, Feedback, Workspace};
use crate::ui::{
    editor::EditorPanel,
    find::{FindDialog, FindRequest},
    preview::{PreviewMode, PreviewPanel},
    status_bar::StatusBar,
};
use crate::{APP_NAME, APP_VERSION};

/// User actions coming from menus and shortcuts
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    New,
    Open,
    OpenRecent(PathBuf),
    Save,
    SaveAs,
    ExportPdf,
    Quit,
    ShowFind,
    FindNext,
    SetPreviewVisible(bool),
    Builtin(BuiltinDoc),
    Website,
    About,
}

/// Main application state
pub struct LitteraApp {
    /// Document, matches and preview
    workspace: Workspace,
    /// Application configuration
    config: AppConfig,
    /// Last status bar message
    status: String,
    /// Editor cursor as a character offset
    cursor_position: Option<usize>,
    /// Range to select in the editor on the next frame
    pending_selection: Option<Range<usize>>,
    find_dialog: FindDialog,
    about_visible: bool,
    preview_mode: PreviewMode,
    /// Title last sent to the window
    window_title: String,
}

impl LitteraApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });

        let header = load_header(config.export.header_template.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Falling back to built-in PDF header: {}", e);
            crate::core::persistence::DEFAULT_HEADER.to_string()
        });

        let workspace = Workspace::new(
            config.preview.visible,
            header,
            Box::new(config.export.renderer()),
        );

        Self {
            workspace,
            config,
            status: String::new(),
            cursor_position: None,
            pending_selection: None,
            find_dialog: FindDialog::default(),
            about_visible: false,
            preview_mode: PreviewMode::default(),
            window_title: String::new(),
        }
    }

    /// Run a command against the workspace and reflect the result in the UI.
    /// Returns whether the command succeeded.
    fn run(&mut self, command: Command) -> bool {
        match self.workspace.execute(command) {
            Ok(feedback) => {
                self.apply_feedback(feedback);
                true
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.status = e.to_string();
                false
            }
        }
    }

    fn apply_feedback(&mut self, feedback: Feedback) {
        match feedback {
            Feedback::None => {}
            Feedback::Status(message) => self.status = message,
            Feedback::Found { term, count, span } => {
                self.status = format!("Found {} instance(s) of {}", count, term);
                self.find_dialog.set_count(Some(count));
                self.pending_selection = Some(span);
            }
            Feedback::Next { span } => self.pending_selection = Some(span),
            Feedback::NotFound { term } => {
                self.status = format!("{} not found", term);
                self.find_dialog.set_count(Some(0));
            }
        }
    }

    fn handle(&mut self, ctx: &egui::Context, action: Action) {
        match action {
            Action::New => {
                self.run(Command::New);
            }
            Action::Open => {
                if let Some(path) = self.file_dialog().pick_file() {
                    self.open_path(path);
                }
            }
            Action::OpenRecent(path) => self.open_path(path),
            Action::Save => {
                if self.workspace.document().path().is_none() {
                    self.handle(ctx, Action::SaveAs);
                } else if self.run(Command::Save) {
                    if let Some(path) = self.workspace.document().path().map(|p| p.to_path_buf()) {
                        self.remember(path);
                    }
                }
            }
            Action::SaveAs => {
                let dialog = self
                    .file_dialog()
                    .set_file_name(self.workspace.document().title());
                if let Some(path) = dialog.save_file() {
                    if self.run(Command::SaveAs(path.clone())) {
                        self.remember(path);
                    }
                }
            }
            Action::ExportPdf => self.export_pdf(),
            Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            Action::ShowFind => self.find_dialog.open(),
            Action::FindNext => {
                self.run(Command::FindNext);
            }
            Action::SetPreviewVisible(visible) => {
                if self.run(Command::SetPreviewVisible(visible)) {
                    self.config.preview.visible = visible;
                    self.save_config();
                }
            }
            Action::Builtin(doc) => {
                self.run(Command::ShowBuiltin(doc));
            }
            Action::Website => {
                if let Err(e) = open::that(WEBSITE) {
                    tracing::error!("Failed to open {}: {}", WEBSITE, e);
                    self.status = format!("Could not open {}", WEBSITE);
                }
            }
            Action::About => self.about_visible = true,
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        if self.run(Command::Open(path.clone())) {
            self.remember(path);
        }
    }

    fn export_pdf(&mut self) {
        let stem = self
            .workspace
            .document()
            .path()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string());

        let mut dialog = rfd::FileDialog::new()
            .add_filter("PDF (*.pdf)", &["pdf"])
            .set_file_name(format!("{}.pdf", stem));
        if let Some(dir) = &self.config.last_directory {
            dialog = dialog.set_directory(dir);
        }

        if let Some(path) = dialog.save_file() {
            self.status = "Exporting file...".to_string();
            self.run(Command::ExportPdf(path));
        }
    }

    /// File dialog for notes, starting in the last used directory
    fn file_dialog(&self) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new()
            .add_filter("Markdown (*.md)", &["md"])
            .add_filter("Text (*.txt)", &["txt"])
            .add_filter("All (*.*)", &["*"]);
        match &self.config.last_directory {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember(&mut self, path: PathBuf) {
        self.config.add_recent_file(&path);
        self.save_config();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {:#}", e);
        }
    }

    /// Collect keyboard shortcuts. Shift variants are checked first since
    /// egui matches Ctrl+S against Ctrl+Shift+S too.
    fn shortcuts(ctx: &egui::Context) -> Vec<Action> {
        use egui::{Key, Modifiers};

        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
        ctx.input_mut(|i| {
            let mut actions = Vec::new();
            if i.consume_key(ctrl_shift, Key::S) {
                actions.push(Action::SaveAs);
            }
            if i.consume_key(ctrl_shift, Key::E) {
                actions.push(Action::ExportPdf);
            }
            if i.consume_key(Modifiers::CTRL, Key::S) {
                actions.push(Action::Save);
            }
            if i.consume_key(Modifiers::CTRL, Key::N) {
                actions.push(Action::New);
            }
            if i.consume_key(Modifiers::CTRL, Key::O) {
                actions.push(Action::Open);
            }
            if i.consume_key(Modifiers::CTRL, Key::Q) {
                actions.push(Action::Quit);
            }
            if i.consume_key(Modifiers::CTRL, Key::F) {
                actions.push(Action::ShowFind);
            }
            if i.consume_key(Modifiers::NONE, Key::F3) {
                actions.push(Action::FindNext);
            }
            if i.consume_key(Modifiers::CTRL, Key::R) {
                actions.push(Action::Builtin(BuiltinDoc::Reference));
            }
            actions
        })
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Vec<Action> {
        let mut actions = Vec::new();
        let preview_visible = self.workspace.preview().is_visible();
        let recent = self.config.recent_files.clone();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let items = [
                        ("New (Ctrl+N)", Action::New),
                        ("Open... (Ctrl+O)", Action::Open),
                    ];
                    for (label, action) in items {
                        if ui.button(label).clicked() {
                            actions.push(action);
                            ui.close();
                        }
                    }
                    ui.add_enabled_ui(!recent.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            for path in &recent {
                                if ui.button(path.display().to_string()).clicked() {
                                    actions.push(Action::OpenRecent(path.clone()));
                                    ui.close();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Save (Ctrl+S)").clicked() {
                        actions.push(Action::Save);
                        ui.close();
                    }
                    if ui.button("Save As... (Ctrl+Shift+S)").clicked() {
                        actions.push(Action::SaveAs);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Export as PDF... (Ctrl+Shift+E)").clicked() {
                        actions.push(Action::ExportPdf);
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Quit (Ctrl+Q)").clicked() {
                        actions.push(Action::Quit);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    if ui.button("Find (Ctrl+F)").clicked() {
                        actions.push(Action::ShowFind);
                        ui.close();
                    }
                    if ui.button("Find Next (F3)").clicked() {
                        actions.push(Action::FindNext);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    let mut visible = preview_visible;
                    if ui.checkbox(&mut visible, "Show HTML Preview").changed() {
                        actions.push(Action::SetPreviewVisible(visible));
                        ui.close();
                    }
                    ui.separator();
                    ui.add_enabled_ui(preview_visible, |ui| {
                        if ui.radio_value(&mut self.preview_mode, PreviewMode::Rendered, "Rendered").clicked() {
                            ui.close();
                        }
                        if ui.radio_value(&mut self.preview_mode, PreviewMode::Html, "HTML Source").clicked() {
                            ui.close();
                        }
                    });
                });

                ui.menu_button("Help", |ui| {
                    let pages = [
                        ("Reference (Ctrl+R)", BuiltinDoc::Reference),
                        ("Credits", BuiltinDoc::Credits),
                        ("License", BuiltinDoc::License),
                    ];
                    for (label, doc) in pages {
                        if ui.button(label).clicked() {
                            actions.push(Action::Builtin(doc));
                            ui.close();
                        }
                    }
                    ui.separator();
                    if ui.button("Website").clicked() {
                        actions.push(Action::Website);
                        ui.close();
                    }
                    if ui.button("About").clicked() {
                        actions.push(Action::About);
                        ui.close();
                    }
                });
            });
        });

        actions
    }

    fn render_about(&mut self, ctx: &egui::Context) {
        egui::Window::new(format!("About {}", APP_NAME))
            .collapsible(false)
            .resizable(false)
            .open(&mut self.about_visible)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(format!("{} v{}", APP_NAME, APP_VERSION));
                    ui.add_space(8.0);
                    ui.label(DESCRIPTION.trim());
                    ui.add_space(8.0);
                    ui.hyperlink(WEBSITE);
                    ui.label(egui::RichText::new("(c) 2022 programmingdesigner").weak());
                });
            });
    }

    /// Keep the window title in step with the document
    fn update_title(&mut self, ctx: &egui::Context) {
        let document = self.workspace.document();
        let marker = if document.is_dirty() { "*" } else { "" };
        let title = format!("{}{} - {}", document.title(), marker, APP_NAME);
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}

impl eframe::App for LitteraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let mut actions = Self::shortcuts(ctx);

        // Render menu bar
        actions.extend(self.render_menu_bar(ctx));

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            StatusBar::show(ui, &self.status, self.cursor_position, APP_VERSION);
        });

        if self.workspace.preview().is_visible() {
            egui::SidePanel::right("preview_panel")
                .resizable(true)
                .default_width(ctx.screen_rect().width() / 2.0)
                .min_width(200.0)
                .show(ctx, |ui| {
                    PreviewPanel::show(ui, &self.workspace, &mut self.preview_mode);
                });
        }

        let selection = self.pending_selection.take();
        let output = egui::CentralPanel::default()
            .show(ctx, |ui| {
                EditorPanel::show(ui, self.workspace.document(), &self.config.editor, selection)
            })
            .inner;

        if output.cursor.is_some() {
            self.cursor_position = output.cursor;
        }
        if let Some(content) = output.edited {
            self.run(Command::Edit(content));
        }

        match self.find_dialog.show(ctx) {
            Some(FindRequest::Find(term)) => {
                self.run(Command::Find(term));
            }
            Some(FindRequest::FindNext) => {
                self.run(Command::FindNext);
            }
            Some(FindRequest::Closed) => self.status.clear(),
            None => {}
        }

        self.render_about(ctx);

        for action in actions {
            self.handle(ctx, action);
        }

        self.update_title(ctx);
    }
}
