//! Plain text documents. Form feeds separate pages.

use super::{DocumentSource, Result};
use crate::error::PdfError;

const PAGE_BREAK: char = '\u{000C}';

/// Already-decoded UTF-8 text presented as a document.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    pages: Vec<String>,
}

impl PlainTextSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from text directly.
    pub fn from_text(text: &str) -> Self {
        let mut source = Self::new();
        source.set_text(text);
        source
    }

    fn set_text(&mut self, text: &str) {
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
        self.pages = text.split(PAGE_BREAK).map(str::to_string).collect();
    }
}

impl DocumentSource for PlainTextSource {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(data)?;
        self.set_text(text);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let index = page.checked_sub(1).ok_or(PdfError::InvalidPage(page))?;
        self.pages
            .get(index as usize)
            .map(|p| p.trim_end_matches('\n').to_string())
            .ok_or(PdfError::InvalidPage(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let source = PlainTextSource::from_text("Question 1: A\n");
        assert_eq!(source.page_count(), 1);
        assert_eq!(source.document_text().unwrap(), "Question 1: A\n");
    }

    #[test]
    fn test_form_feed_pages() {
        let source = PlainTextSource::from_text("page one\u{000C}page two\u{000C}");
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.extract_page_text(2).unwrap(), "page two");
        assert_eq!(source.document_text().unwrap(), "page one\npage two\n");
    }

    #[test]
    fn test_invalid_page() {
        let source = PlainTextSource::from_text("x");
        assert!(matches!(source.extract_page_text(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(source.extract_page_text(2), Err(PdfError::InvalidPage(2))));
    }

    #[test]
    fn test_load_rejects_invalid_utf8() {
        let mut source = PlainTextSource::new();
        assert!(matches!(source.load(&[0xff, 0xfe, 0x00]), Err(PdfError::InvalidUtf8(_))));
    }
}
