//! Document text extraction.
//!
//! Produces the raw text answers are extracted from: every page's text
//! followed by a newline, concatenated in page order.

mod extractor;
mod text;

pub use extractor::PdfExtractor;
pub use text::PlainTextSource;

use std::path::Path;

use tracing::debug;

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Kind of document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Contains extractable text.
    Text,
    /// No text layer (e.g. a scanned document) or no text at all.
    Empty,
}

impl DocumentKind {
    /// Classify extracted text by its non-whitespace length.
    pub fn classify(text: &str, min_text_length: usize) -> Self {
        let len = text.chars().filter(|c| !c.is_whitespace()).count();
        if len >= min_text_length.max(1) {
            DocumentKind::Text
        } else {
            DocumentKind::Empty
        }
    }
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for sources of page text.
pub trait DocumentSource {
    /// Load a document from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Text of the whole document, each page followed by a newline.
    fn document_text(&self) -> Result<String> {
        let mut text = String::new();
        for page in 1..=self.page_count() {
            text.push_str(&self.extract_page_text(page)?);
            text.push('\n');
        }
        Ok(text)
    }
}

/// Create an unloaded source for a file extension (`pdf` or `txt`).
pub fn source_for_extension(extension: &str, config: &PdfConfig) -> Result<Box<dyn DocumentSource>> {
    match extension.to_lowercase().as_str() {
        "pdf" => Ok(Box::new(PdfExtractor::new().with_max_pages(config.max_pages))),
        "txt" | "text" => Ok(Box::new(PlainTextSource::new())),
        other => Err(PdfError::UnsupportedFormat(other.to_string())),
    }
}

/// Read a file and return its document text.
pub fn document_text_from_file(path: &Path, config: &PdfConfig) -> crate::Result<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let mut source = source_for_extension(extension, config)?;
    let data = std::fs::read(path)?;
    source.load(&data)?;

    let text = source.document_text()?;
    debug!(
        "Read {} pages, {} characters from {}",
        source.page_count(),
        text.len(),
        path.display()
    );
    Ok(text)
}
