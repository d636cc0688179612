//! Plain-text extraction from uploaded files.
//!
//! The upload's file extension selects the reader. PDF and DOCX support sit
//! behind the `pdf` and `docx` features; with a feature disabled, that
//! format is reported as unsupported.

use std::path::Path;

use crate::{DocsortError, Result};

/// Message returned for any file type outside the supported set.
pub const UNSUPPORTED_FILE_MESSAGE: &str = "Only .txt, .pdf, and .docx files are allowed";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the format from a filename's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Detect the format of `filename`, failing with
/// [`DocsortError::UnsupportedFileType`] for anything else.
pub fn detect(filename: &str) -> Result<DocumentKind> {
    DocumentKind::from_filename(filename)
        .ok_or_else(|| DocsortError::UnsupportedFileType(UNSUPPORTED_FILE_MESSAGE.to_string()))
}

/// Extract plain text from the raw bytes of a document.
///
/// CPU-bound for PDF and DOCX; async callers should run it on the blocking
/// pool.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    match kind {
        DocumentKind::PlainText => Ok(plain_text(bytes)),
        DocumentKind::Pdf => pdf_text(bytes),
        DocumentKind::Docx => docx_text(bytes),
    }
}

/// UTF-8, falling back to lossy decoding for stray invalid bytes.
fn plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(feature = "pdf")]
fn pdf_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocsortError::Extraction(format!("failed to parse PDF: {e}")))
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_bytes: &[u8]) -> Result<String> {
    Err(DocsortError::UnsupportedFileType(
        "PDF support is not enabled in this build".to_string(),
    ))
}

/// Paragraph text from the main document part, one line per paragraph.
#[cfg(feature = "docx")]
fn docx_text(bytes: &[u8]) -> Result<String> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| DocsortError::Extraction(format!("failed to parse DOCX: {e}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        let DocumentChild::Paragraph(paragraph) = child else {
            continue;
        };
        let mut line = String::new();
        for run in paragraph.children.iter().filter_map(|c| match c {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        }) {
            for piece in &run.children {
                match piece {
                    RunChild::Text(text) => line.push_str(&text.text),
                    RunChild::Tab(_) => line.push('\t'),
                    _ => {}
                }
            }
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

#[cfg(not(feature = "docx"))]
fn docx_text(_bytes: &[u8]) -> Result<String> {
    Err(DocsortError::UnsupportedFileType(
        "DOCX support is not enabled in this build".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_extensions() {
        assert_eq!(DocumentKind::from_filename("a.txt"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_filename("A.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("report.v2.docx"), Some(DocumentKind::Docx));
    }

    #[test]
    fn rejects_other_extensions() {
        assert_eq!(DocumentKind::from_filename("image.jpg"), None);
        assert_eq!(DocumentKind::from_filename("noext"), None);
        assert_eq!(DocumentKind::from_filename("old.doc"), None);
        let err = detect("image.jpg").unwrap_err();
        assert_eq!(err.to_string(), format!("unsupported file type: {UNSUPPORTED_FILE_MESSAGE}"));
    }

    #[test]
    fn plain_text_falls_back_to_lossy() {
        let text = extract_text(DocumentKind::PlainText, b"caf\xff ok").unwrap();
        assert!(text.starts_with("caf"));
        assert!(text.ends_with(" ok"));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn garbage_pdf_is_an_extraction_error() {
        let err = extract_text(DocumentKind::Pdf, b"dummy pdf content").unwrap_err();
        assert!(matches!(err, DocsortError::Extraction(_)));
    }

    #[cfg(feature = "docx")]
    #[test]
    fn docx_paragraphs_become_lines() {
        use docx_rs::{Docx, Paragraph, Run};

        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph.")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Second "))
                    .add_run(Run::new().add_text("paragraph.")),
            )
            .build()
            .pack(&mut buf)
            .unwrap();

        let text = extract_text(DocumentKind::Docx, buf.get_ref()).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[cfg(feature = "docx")]
    #[test]
    fn garbage_docx_is_an_extraction_error() {
        let err = extract_text(DocumentKind::Docx, b"not a zip").unwrap_err();
        assert!(matches!(err, DocsortError::Extraction(_)));
    }
}
