//! Answer extraction from document text.

mod extractor;
pub mod rules;

pub use extractor::{AnswerExtractor, ExtractionResult};

pub use crate::models::answers::{AnswerMap, Strategy};

/// Extract answers with default settings.
pub fn extract_answers(text: &str, question_count: usize) -> AnswerMap {
    AnswerExtractor::new().extract(text, question_count)
}
