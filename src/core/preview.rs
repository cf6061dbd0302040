//! Markdown to HTML conversion for the preview pane and PDF export

use pulldown_cmark::{html, Event, Options, Parser};
use serde::{Deserialize, Serialize};

use super::blocks::{self, Block};

/// Markdown dialect features enabled for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkdownExtension {
    Tables,
    SaneLists,
    FencedCode,
    Smarty,
}

/// The fixed extension set used everywhere in the app
pub const DEFAULT_EXTENSIONS: [MarkdownExtension; 4] = [
    MarkdownExtension::Tables,
    MarkdownExtension::SaneLists,
    MarkdownExtension::FencedCode,
    MarkdownExtension::Smarty,
];

impl MarkdownExtension {
    /// Parser options that switch this extension on.
    ///
    /// Fenced code blocks and strict list parsing are CommonMark core
    /// behaviour in pulldown-cmark, so they need no flag.
    fn options(self) -> Options {
        match self {
            Self::Tables => Options::ENABLE_TABLES,
            Self::Smarty => Options::ENABLE_SMART_PUNCTUATION,
            Self::SaneLists | Self::FencedCode => Options::empty(),
        }
    }
}

/// HTML derived from document content, with the block layout the preview
/// pane draws from the same parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewArtifact {
    pub html: String,
    pub blocks: Vec<Block>,
}

impl PreviewArtifact {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Convert Markdown to HTML and preview blocks. Pure: the same input always
/// gives the same output.
pub fn render(content: &str, extensions: &[MarkdownExtension]) -> PreviewArtifact {
    let options = extensions
        .iter()
        .fold(Options::empty(), |acc, ext| acc | ext.options());

    let events: Vec<Event<'_>> = Parser::new_ext(content, options).collect();
    let mut html_output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut html_output, events.iter().cloned());

    PreviewArtifact {
        html: html_output,
        blocks: blocks::build(&events),
    }
}

/// Keeps the preview surface in step with the document
#[derive(Debug, Clone)]
pub struct PreviewSync {
    extensions: Vec<MarkdownExtension>,
    visible: bool,
    artifact: PreviewArtifact,
}

impl PreviewSync {
    pub fn new(visible: bool) -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.to_vec(),
            visible,
            artifact: PreviewArtifact::default(),
        }
    }

    pub fn extensions(&self) -> &[MarkdownExtension] {
        &self.extensions
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// What the preview surface currently shows
    pub fn artifact(&self) -> &PreviewArtifact {
        &self.artifact
    }

    /// Render with this preview's extension set without touching its state
    pub fn render(&self, content: &str) -> PreviewArtifact {
        render(content, &self.extensions)
    }

    /// Re-render the published artifact. A hidden preview shows nothing.
    pub fn refresh(&mut self, content: &str) {
        if self.visible {
            self.artifact = self.render(content);
            tracing::debug!("Preview refreshed ({} bytes of HTML)", self.artifact.html.len());
        } else {
            self.artifact = PreviewArtifact::default();
        }
    }

    /// Show or hide the preview. Showing always renders fresh content.
    pub fn toggle(&mut self, visible: bool, content: &str) {
        self.visible = visible;
        self.refresh(content);
    }
}

impl Default for PreviewSync {
    fn default() -> Self {
        Self::new(true)
    }
}
