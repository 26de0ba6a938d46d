//! Heuristic answer extraction strategies.

pub mod block;
pub mod markers;
pub mod numbered;
pub mod paragraph;
pub mod patterns;

pub use block::BlockStrategy;
pub use markers::{scan_blocks, MarkedBlock, Marker, MarkerSet, LABELED_MARKERS, QUESTION_MARKERS};
pub use numbered::NumberedLineStrategy;
pub use paragraph::ParagraphStrategy;

use crate::models::answers::{AnswerMap, Strategy};

/// Trait for a single extraction pass over document text.
pub trait AnswerStrategy {
    /// Which strategy this is.
    fn kind(&self) -> Strategy;

    /// Extract answers numbered `1..=question_count`. Entries outside that
    /// range or with blank text are dropped.
    fn extract(&self, text: &str, question_count: usize) -> AnswerMap;
}

/// Parse a run of ASCII digits as a question number.
///
/// Leading zeros are accepted (`"07"` is 7). Values too large for `u64`
/// saturate, which puts them out of range for any exam.
pub(crate) fn parse_number(digits: &str) -> u64 {
    digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')))
}
