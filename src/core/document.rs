//! The single document being edited

use std::path::{Path, PathBuf};

use super::error::{NoteError, Result};
use super::persistence::{read_text, write_text};

/// A Markdown or plain-text note
#[derive(Debug, Clone)]
pub struct Document {
    /// Document content
    content: String,
    /// File path, `None` while untitled
    path: Option<PathBuf>,
    /// Whether the document has unsaved changes
    dirty: bool,
    /// Read-only documents reject edits
    editable: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty, untitled document
    pub fn new() -> Self {
        Self {
            content: String::new(),
            path: None,
            dirty: false,
            editable: true,
        }
    }

    /// Create a read-only document from static text
    pub fn read_only(content: impl Into<String>) -> Self {
        let mut document = Self::new();
        document.content = content.into();
        document.set_editable(false);
        document
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Get the document title (file name, or "untitled")
    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Replace the content from a file.
    ///
    /// On failure the document is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<&str> {
        let content = read_text(path)?;

        self.content = content;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        self.set_editable(true);

        tracing::info!("Opened document: {}", path.display());
        Ok(&self.content)
    }

    /// Write the content to `path` and make it the document's path
    pub fn save(&mut self, path: &Path) -> Result<()> {
        write_text(path, &self.content)?;

        self.path = Some(path.to_path_buf());
        self.dirty = false;

        tracing::info!("Saved document: {}", path.display());
        Ok(())
    }

    /// Save to the current path
    pub fn save_in_place(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(NoteError::Untitled)?;
        self.save(&path)
    }

    /// Update content and mark as modified
    pub fn set_content(&mut self, content: String) -> Result<()> {
        if !self.editable {
            return Err(NoteError::ReadOnly);
        }
        if self.content != content {
            self.content = content;
            self.dirty = true;
        }
        Ok(())
    }
}
