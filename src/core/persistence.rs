//! Reading and writing note files, and assembling the PDF export

use std::fs;
use std::path::Path;

use super::error::{NoteError, Result};
use super::pdf::PdfRenderer;
use super::preview::{render, MarkdownExtension};

/// Header used when no template file is configured.
pub const DEFAULT_HEADER: &str = include_str!("../../assets/pdf_header.html");

/// Trailing block appended after the converted body: page break, table of
/// contents marker and attribution line.
pub const EXPORT_FOOTER: &str = concat!(
    "<div class=\"page-break\" style=\"page-break-before: always;\"></div>",
    "<div class=\"toc\"><!-- toc --></div>",
    "<div class=\"attribution\" style=\"margin-top: 20pt;\"><hr>",
    "<p>Made with <span style=\"font-weight:bold;\">Littera Note-taking App</span></p></div>",
    "</body></html>",
);

/// Read a UTF-8 text file verbatim
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| NoteError::io(path, e))
}

/// Write text verbatim, replacing the file
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| NoteError::io(path, e))
}

/// Load the export header, from a template file if one is configured
pub fn load_header(template: Option<&Path>) -> Result<String> {
    match template {
        Some(path) => read_text(path),
        None => Ok(DEFAULT_HEADER.to_string()),
    }
}

/// Full HTML handed to the PDF renderer
pub fn export_html(content: &str, extensions: &[MarkdownExtension], header: &str) -> String {
    let body = render(content, extensions);
    let mut html = String::with_capacity(header.len() + body.html.len() + EXPORT_FOOTER.len());
    html.push_str(header);
    html.push_str(&body.html);
    html.push_str(EXPORT_FOOTER);
    html
}

/// Convert `content` to PDF and write it to `output`.
///
/// The file is only written once the renderer succeeded, so a render failure
/// never leaves a partial PDF behind.
pub fn export_pdf(
    content: &str,
    extensions: &[MarkdownExtension],
    header: &str,
    renderer: &dyn PdfRenderer,
    output: &Path,
) -> Result<usize> {
    let html = export_html(content, extensions, header);
    tracing::debug!("Rendering {} bytes of HTML with {}", html.len(), renderer.name());

    let pdf = renderer.render(&html)?;
    fs::write(output, &pdf).map_err(|e| NoteError::io(output, e))?;

    tracing::info!("Exported PDF: {} ({} bytes)", output.display(), pdf.len());
    Ok(pdf.len())
}
