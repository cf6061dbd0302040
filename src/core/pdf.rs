//! HTML-to-PDF rendering through an external converter

use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use super::error::{NoteError, Result};

/// Converts a complete HTML document into PDF bytes
pub trait PdfRenderer {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Render `html`; any internal converter failure is a `NoteError::Render`
    fn render(&self, html: &str) -> Result<Vec<u8>>;
}

/// Renderer that pipes HTML through a converter process.
///
/// The program reads HTML on stdin and writes the PDF to stdout, which is how
/// `wkhtmltopdf - -` behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRenderer {
    program: String,
    args: Vec<String>,
}

const DEFAULT_PROGRAM: &str = "wkhtmltopdf";
const DEFAULT_ARGS: [&str; 3] = ["--quiet", "-", "-"];

impl Default for CommandRenderer {
    fn default() -> Self {
        Self::new(
            DEFAULT_PROGRAM,
            DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl PdfRenderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    fn render(&self, html: &str) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NoteError::Render(format!("failed to start {}: {}", self.program, e)))?;

        // Feed stdin from a second thread while this one drains stdout and
        // stderr, otherwise a converter that writes before it has read all
        // of its input fills a pipe and both sides block.
        let stdin = child.stdin.take();
        let (output, sent) = thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(html.as_bytes())));
            let output = child.wait_with_output();
            let sent = match writer {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked"))),
                None => Ok(()),
            };
            (output, sent)
        });

        let output =
            output.map_err(|e| NoteError::Render(format!("converter did not finish: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NoteError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        if let Err(e) = sent {
            return Err(NoteError::Render(format!("failed to send HTML: {}", e)));
        }
        if output.stdout.is_empty() {
            return Err(NoteError::Render(format!("{} produced no output", self.program)));
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_render_error() {
        let renderer = CommandRenderer::new("littera-no-such-converter", Vec::new());
        let err = renderer.render("<html></html>").unwrap_err();
        assert!(matches!(err, NoteError::Render(_)));
        assert!(err.to_string().contains("littera-no-such-converter"));
    }

    #[cfg(unix)]
    #[test]
    fn test_passes_html_through_stdin() {
        let renderer = CommandRenderer::new("cat", Vec::new());
        let bytes = renderer.render("<p>hi</p>").unwrap();
        assert_eq!(bytes, b"<p>hi</p>");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_render_error() {
        let renderer = CommandRenderer::new(
            "sh",
            vec!["-c".to_string(), "cat >/dev/null; echo broken >&2; exit 3".to_string()],
        );
        let err = renderer.render("<p>hi</p>").unwrap_err();
        assert!(matches!(err, NoteError::Render(_)));
        assert!(err.to_string().contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_large_document_does_not_block_on_pipes() {
        // Far more than a pipe buffer, echoed while still being read
        let html = "x".repeat(1 << 20);
        let renderer = CommandRenderer::new("cat", Vec::new());
        let bytes = renderer.render(&html).unwrap();
        assert_eq!(bytes.len(), html.len());
    }

    #[cfg(unix)]
    #[test]
    fn test_chatty_stderr_does_not_block() {
        let renderer = CommandRenderer::new(
            "sh",
            vec!["-c".to_string(), "cat >&2; echo done".to_string()],
        );
        let bytes = renderer.render(&"y".repeat(1 << 20)).unwrap();
        assert_eq!(bytes, b"done\n");
    }

    #[test]
    fn test_default_uses_wkhtmltopdf() {
        let renderer = CommandRenderer::default();
        assert_eq!(renderer.program(), "wkhtmltopdf");
        assert_eq!(renderer.args(), ["--quiet", "-", "-"]);
    }
}
