//! Document text extraction
//!
//! Turns document bytes into one plain-text string. PDFs go through
//! `pdf-extract`; anything else must be UTF-8 text. Text that is empty or
//! whitespace-only after extraction is an error, since nothing could be
//! generated from it.
//!
//! A panic inside `pdf-extract` becomes an `Extraction` error. While a PDF
//! is extracted the process panic hook is replaced by one that logs at
//! debug level, so malformed PDFs print nothing to stderr.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{QuizgenError, Result};

/// Magic bytes at the start of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// UTF-8 plain text (txt, md, ...)
    Text,
}

impl DocumentKind {
    /// Detect the format from content, falling back to the file extension
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use quizgen::document::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::detect(b"%PDF-1.7 ...", None), DocumentKind::Pdf);
    /// assert_eq!(DocumentKind::detect(b"", Some(Path::new("notes.PDF"))), DocumentKind::Pdf);
    /// assert_eq!(DocumentKind::detect(b"hello", Some(Path::new("notes.md"))), DocumentKind::Text);
    /// ```
    pub fn detect(bytes: &[u8], path: Option<&Path>) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            return Self::Pdf;
        }

        let is_pdf_extension = path
            .and_then(|p| p.extension())
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf_extension {
            Self::Pdf
        } else {
            Self::Text
        }
    }
}

/// Extract text from in-memory document bytes
///
/// # Errors
///
/// Returns `QuizgenError::Extraction` if the PDF cannot be read, the text
/// is not UTF-8, or no non-whitespace text remains.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String> {
    let text = match kind {
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Text => String::from_utf8(bytes.to_vec()).map_err(|e| {
            QuizgenError::Extraction(format!("document is not valid UTF-8 text: {}", e))
        })?,
    };

    if text.trim().is_empty() {
        return Err(QuizgenError::Extraction("no text found in document".to_string()).into());
    }

    tracing::debug!("Extracted {} characters ({:?})", text.chars().count(), kind);
    Ok(text)
}

/// Read a document from disk and extract its text
///
/// # Errors
///
/// Returns `QuizgenError::Extraction` if the file cannot be read or yields
/// no text.
pub fn load_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        QuizgenError::Extraction(format!("failed to read {}: {}", path.display(), e))
    })?;

    let kind = DocumentKind::detect(&bytes, Some(path));
    tracing::info!("Loading document {} as {:?}", path.display(), kind);
    extract_text(&bytes, kind)
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs. The hook is swapped so
    // the panic message goes to the debug log instead of stderr.
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!("pdf-extract panicked: {}", info);
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));
    panic::set_hook(previous_hook);

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            tracing::error!("PDF extraction failed: {}", e);
            Err(QuizgenError::Extraction(format!("failed to read PDF: {}", e)).into())
        }
        Err(_) => {
            tracing::error!("PDF extraction aborted on malformed input");
            Err(QuizgenError::Extraction("failed to read PDF: malformed document".to_string()).into())
        }
    }
}
