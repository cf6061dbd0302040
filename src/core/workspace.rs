//! Commands issued by the UI and the state they act on
//!
//! The window never mutates the document directly: every menu item, shortcut
//! and dialog button becomes a [`Command`], and [`Workspace::execute`] answers
//! with [`Feedback`] for the status bar and editor cursor.

use std::ops::Range;
use std::path::PathBuf;

use super::builtin::BuiltinDoc;
use super::document::Document;
use super::error::Result;
use super::find::{search, MatchSet, MatchState};
use super::pdf::PdfRenderer;
use super::persistence::export_pdf;
use super::preview::PreviewSync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    ExportPdf(PathBuf),
    SetPreviewVisible(bool),
    Find(String),
    FindNext,
    ShowBuiltin(BuiltinDoc),
    Edit(String),
}

/// What the UI should show after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    None,
    Status(String),
    /// A new search hit; select `span` in the editor
    Found {
        term: String,
        count: usize,
        span: Range<usize>,
    },
    /// Moved to the next hit of the current search
    Next { span: Range<usize> },
    /// The term does not occur; informational only
    NotFound { term: String },
}

pub struct Workspace {
    document: Document,
    matches: MatchSet,
    /// Term of the last search, kept so "find next" can re-search after edits
    last_term: String,
    preview: PreviewSync,
    export_header: String,
    renderer: Box<dyn PdfRenderer>,
}

impl Workspace {
    pub fn new(preview_visible: bool, export_header: String, renderer: Box<dyn PdfRenderer>) -> Self {
        let document = Document::new();
        let mut preview = PreviewSync::new(preview_visible);
        preview.refresh(document.content());

        Self {
            document,
            matches: MatchSet::default(),
            last_term: String::new(),
            preview,
            export_header,
            renderer,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    #[allow(dead_code)]
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn preview(&self) -> &PreviewSync {
        &self.preview
    }

    #[allow(dead_code)]
    pub fn set_renderer(&mut self, renderer: Box<dyn PdfRenderer>) {
        self.renderer = renderer;
    }

    pub fn execute(&mut self, command: Command) -> Result<Feedback> {
        match command {
            Command::New => {
                self.replace_document(Document::new());
                Ok(Feedback::Status("New document".to_string()))
            }
            Command::Open(path) => {
                self.document.load(&path)?;
                self.content_replaced();
                Ok(Feedback::Status(format!("Opened {}", path.display())))
            }
            Command::Save => {
                self.document.save_in_place()?;
                self.preview.refresh(self.document.content());
                Ok(Feedback::Status(format!("Saved {}", self.document.title())))
            }
            Command::SaveAs(path) => {
                self.document.save(&path)?;
                self.preview.refresh(self.document.content());
                Ok(Feedback::Status(format!("Saved {}", path.display())))
            }
            Command::ExportPdf(path) => {
                export_pdf(
                    self.document.content(),
                    self.preview.extensions(),
                    &self.export_header,
                    self.renderer.as_ref(),
                    &path,
                )?;
                Ok(Feedback::Status(format!("Exported {}", path.display())))
            }
            Command::SetPreviewVisible(visible) => {
                self.preview.toggle(visible, self.document.content());
                let message = if visible {
                    "HTML Preview shown"
                } else {
                    "HTML Preview hidden"
                };
                tracing::info!("{}", message);
                Ok(Feedback::Status(message.to_string()))
            }
            Command::Find(term) => Ok(self.find(term)),
            Command::FindNext => Ok(self.find_next()),
            Command::ShowBuiltin(doc) => {
                self.replace_document(doc.document());
                tracing::info!("Showing {} (read-only)", doc.title());
                Ok(Feedback::Status(format!("{} (read-only)", doc.title())))
            }
            Command::Edit(content) => {
                self.document.set_content(content)?;
                self.content_replaced();
                Ok(Feedback::None)
            }
        }
    }

    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.content_replaced();
    }

    /// Content changed: old match offsets are meaningless now
    fn content_replaced(&mut self) {
        self.matches = MatchSet::default();
        self.preview.refresh(self.document.content());
    }

    fn find(&mut self, term: String) -> Feedback {
        self.matches = search(self.document.content(), &term);
        self.last_term = term;

        match self.matches.state() {
            MatchState::Empty if self.matches.term().is_empty() => Feedback::None,
            MatchState::Empty => {
                tracing::debug!("{:?} not found", self.matches.term());
                Feedback::NotFound {
                    term: self.matches.term().to_string(),
                }
            }
            MatchState::Active => match self.matches.advance() {
                Some(position) => Feedback::Found {
                    term: self.matches.term().to_string(),
                    count: self.matches.len(),
                    span: self.span(position),
                },
                None => Feedback::None,
            },
        }
    }

    fn find_next(&mut self) -> Feedback {
        if self.matches.is_empty() {
            return self.find(self.last_term.clone());
        }
        match self.matches.advance() {
            Some(position) => Feedback::Next {
                span: self.span(position),
            },
            None => Feedback::None,
        }
    }

    fn span(&self, position: usize) -> Range<usize> {
        self.matches
            .span_at(position)
            .unwrap_or(position..position)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::core::error::NoteError;

    struct FakeRenderer {
        fail: bool,
    }

    impl PdfRenderer for FakeRenderer {
        fn name(&self) -> &str {
            "fake"
        }

        fn render(&self, html: &str) -> Result<Vec<u8>> {
            if self.fail {
                Err(NoteError::Render("boom".to_string()))
            } else {
                Ok(html.as_bytes().to_vec())
            }
        }
    }

    fn workspace() -> Workspace {
        Workspace::new(
            true,
            "<html><body>".to_string(),
            Box::new(FakeRenderer { fail: false }),
        )
    }

    fn edit(ws: &mut Workspace, text: &str) {
        ws.execute(Command::Edit(text.to_string())).unwrap();
    }

    #[test]
    fn test_find_selects_first_match_and_reports_count() {
        let mut ws = workspace();
        edit(&mut ws, "aaa");

        let feedback = ws.execute(Command::Find("aa".to_string())).unwrap();
        assert_eq!(
            feedback,
            Feedback::Found {
                term: "aa".to_string(),
                count: 2,
                span: 0..2,
            }
        );
        assert_eq!(ws.execute(Command::FindNext).unwrap(), Feedback::Next { span: 1..3 });
        assert_eq!(ws.execute(Command::FindNext).unwrap(), Feedback::Next { span: 0..2 });
    }

    #[test]
    fn test_find_missing_term() {
        let mut ws = workspace();
        edit(&mut ws, "Hello world");

        let feedback = ws.execute(Command::Find("rust".to_string())).unwrap();
        assert_eq!(feedback, Feedback::NotFound { term: "rust".to_string() });
        assert!(ws.matches().is_empty());

        assert_eq!(ws.execute(Command::Find(String::new())).unwrap(), Feedback::None);
        assert_eq!(ws.execute(Command::FindNext).unwrap(), Feedback::None);
    }

    #[test]
    fn test_edit_invalidates_matches() {
        let mut ws = workspace();
        edit(&mut ws, "one cat");
        ws.execute(Command::Find("cat".to_string())).unwrap();
        assert_eq!(ws.matches().len(), 1);

        edit(&mut ws, "cat cat cat");
        assert!(ws.matches().is_empty());

        // Find next searches again with the last term
        let feedback = ws.execute(Command::FindNext).unwrap();
        assert!(matches!(feedback, Feedback::Found { count: 3, .. }));
    }

    #[test]
    fn test_preview_follows_edits_and_toggle() {
        let mut ws = workspace();
        edit(&mut ws, "# Title");
        assert!(ws.preview().artifact().html.contains("<h1>Title</h1>"));

        ws.execute(Command::SetPreviewVisible(false)).unwrap();
        assert!(ws.preview().artifact().is_empty());

        edit(&mut ws, "# Changed");
        assert!(ws.preview().artifact().is_empty());

        let feedback = ws.execute(Command::SetPreviewVisible(true)).unwrap();
        assert_eq!(feedback, Feedback::Status("HTML Preview shown".to_string()));
        assert!(ws.preview().artifact().html.contains("<h1>Changed</h1>"));
    }

    #[test]
    fn test_builtin_is_read_only() {
        let mut ws = workspace();
        ws.execute(Command::ShowBuiltin(BuiltinDoc::Reference)).unwrap();

        let err = ws.execute(Command::Edit("scribble".to_string())).unwrap_err();
        assert!(matches!(err, NoteError::ReadOnly));
        assert_eq!(ws.document().content(), BuiltinDoc::Reference.content());

        ws.execute(Command::New).unwrap();
        assert!(ws.document().is_editable());
        assert_eq!(ws.document().content(), "");
    }

    #[test]
    fn test_save_open_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todo.md");
        let mut ws = workspace();

        edit(&mut ws, "- [ ] write notes");
        assert!(matches!(ws.execute(Command::Save), Err(NoteError::Untitled)));

        ws.execute(Command::SaveAs(path.clone())).unwrap();
        assert!(!ws.document().is_dirty());

        edit(&mut ws, "- [x] write notes");
        ws.execute(Command::Save).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- [x] write notes");

        ws.execute(Command::New).unwrap();
        ws.execute(Command::Open(path.clone())).unwrap();
        assert_eq!(ws.document().content(), "- [x] write notes");
        assert_eq!(ws.document().title(), "todo.md");
    }

    #[test]
    fn test_open_failure_leaves_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = workspace();
        edit(&mut ws, "keep me");
        ws.execute(Command::Find("keep".to_string())).unwrap();

        let result = ws.execute(Command::Open(dir.path().join("absent.md")));

        assert!(matches!(result, Err(NoteError::Io { .. })));
        assert_eq!(ws.document().content(), "keep me");
        assert_eq!(ws.matches().len(), 1);
    }

    #[test]
    fn test_export_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("note.pdf");
        let mut ws = workspace();
        edit(&mut ws, "# Report");

        ws.execute(Command::ExportPdf(output.clone())).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("<html><body><h1>Report</h1>"));
        assert!(written.contains("Littera Note-taking App"));
    }

    #[test]
    fn test_export_render_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("note.pdf");
        let mut ws = workspace();
        ws.set_renderer(Box::new(FakeRenderer { fail: true }));
        edit(&mut ws, "text");

        let err = ws.execute(Command::ExportPdf(output.clone())).unwrap_err();

        assert!(matches!(err, NoteError::Render(_)));
        assert!(!output.exists());
        assert!(ws.document().is_dirty());
    }
}
