//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{DocumentSource, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf, with pdf-extract as a whole-document
/// fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    /// Maximum pages to read (0 = unlimited).
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: 0,
        }
    }

    /// Limit the number of pages read by [`DocumentSource::document_text`].
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(PdfError::NotLoaded)
    }

    fn pages_to_read(&self) -> u32 {
        let count = self.page_count();
        match self.max_pages {
            0 => count,
            max => count.min(u32::try_from(max).unwrap_or(u32::MAX)),
        }
    }

    /// Whole-document text from pdf-extract.
    fn fallback_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn document_text(&self) -> Result<String> {
        self.document()?;

        let pages = self.pages_to_read();
        let mut text = String::new();
        let mut failed = 0;

        for page in 1..=pages {
            match self.extract_page_text(page) {
                Ok(page_text) => {
                    trace!("Page {}: {} characters", page, page_text.len());
                    text.push_str(&page_text);
                }
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page, e);
                    failed += 1;
                }
            }
            text.push('\n');
        }

        if failed == pages {
            debug!("Per-page extraction failed, falling back to whole-document text");
            let mut text = self.fallback_text()?;
            text.push('\n');
            return Ok(text);
        }

        Ok(text)
    }
}
