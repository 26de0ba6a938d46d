//! Paragraph fallback: the Nth substantial paragraph answers question N.

use super::patterns::PARAGRAPH_BREAK;
use super::AnswerStrategy;
use crate::models::answers::{AnswerMap, Strategy};

/// Default paragraph length (in characters) at or below which a paragraph
/// is skipped.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 10;

/// Positional assignment of blank-line separated paragraphs.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphStrategy {
    min_chars: usize,
}

impl ParagraphStrategy {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for ParagraphStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PARAGRAPH_CHARS)
    }
}

impl AnswerStrategy for ParagraphStrategy {
    fn kind(&self) -> Strategy {
        Strategy::Paragraph
    }

    fn extract(&self, text: &str, question_count: usize) -> AnswerMap {
        let mut answers = AnswerMap::new();

        let paragraphs = PARAGRAPH_BREAK
            .split(text)
            .map(str::trim)
            .filter(|p| p.chars().count() > self.min_chars)
            .take(question_count);

        for (index, paragraph) in paragraphs.enumerate() {
            answers.insert_bounded(index as u64 + 1, paragraph, question_count);
        }

        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assigns_paragraphs_in_order() {
        let text = "Encapsulation hides state.\n\nStrings can be reversed in place.\n\n\nThe stack is LIFO.";
        let answers = ParagraphStrategy::default().extract(text, 3);

        assert_eq!(
            answers.iter().collect::<Vec<_>>(),
            vec![
                (1, "Encapsulation hides state."),
                (2, "Strings can be reversed in place."),
                (3, "The stack is LIFO."),
            ]
        );
    }

    #[test]
    fn test_skips_short_paragraphs() {
        // "Page 1" and a 10-character paragraph are skipped.
        let text = "Page 1\n\n0123456789\n\nA real first answer\n\nA real second answer";
        let answers = ParagraphStrategy::default().extract(text, 5);

        assert_eq!(answers.get(1), Some("A real first answer"));
        assert_eq!(answers.get(2), Some("A real second answer"));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn test_stops_at_question_count() {
        let text = "first paragraph here\n\nsecond paragraph here\n\nthird paragraph here";
        let answers = ParagraphStrategy::default().extract(text, 2);
        assert_eq!(answers.len(), 2);
        assert!(!answers.contains(3));
    }

    #[test]
    fn test_custom_threshold() {
        let answers = ParagraphStrategy::new(0).extract("a\n\nb", 2);
        assert_eq!(answers.get(2), Some("b"));
    }
}
