//! Answer extractor trying each strategy in priority order.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::rules::{
    AnswerStrategy, BlockStrategy, NumberedLineStrategy, ParagraphStrategy,
    paragraph::DEFAULT_MIN_PARAGRAPH_CHARS,
};
use crate::models::answers::{AnswerMap, Strategy};
use crate::models::config::ExtractionConfig;

/// Result of answer extraction with diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted answers keyed by question number.
    pub answers: AnswerMap,
    /// Strategy that produced the answers, `None` if nothing matched.
    pub strategy: Option<Strategy>,
    /// Number of questions the answers were bounded by.
    pub question_count: usize,
    /// Length of the input text in characters.
    pub text_length: usize,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Converts document text into answers for a known number of questions.
///
/// Strategies run in a fixed order and the first one that keeps at least
/// one answer wins. Results of different strategies are never merged.
#[derive(Debug, Clone)]
pub struct AnswerExtractor {
    /// Run the positional paragraph strategy when everything else fails.
    paragraph_fallback: bool,
    /// Paragraphs this short or shorter are skipped by the fallback.
    min_paragraph_chars: usize,
}

impl AnswerExtractor {
    /// Create an extractor with default settings.
    pub fn new() -> Self {
        Self {
            paragraph_fallback: false,
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_paragraph_fallback(config.paragraph_fallback)
            .with_min_paragraph_chars(config.min_paragraph_chars)
    }

    /// Enable the paragraph fallback.
    pub fn with_paragraph_fallback(mut self, enabled: bool) -> Self {
        self.paragraph_fallback = enabled;
        self
    }

    /// Set the paragraph length threshold.
    pub fn with_min_paragraph_chars(mut self, chars: usize) -> Self {
        self.min_paragraph_chars = chars;
        self
    }

    pub fn paragraph_fallback(&self) -> bool {
        self.paragraph_fallback
    }

    /// Extract answers numbered `1..=question_count` from text.
    ///
    /// Never fails: no match is an empty map.
    pub fn extract(&self, text: &str, question_count: usize) -> AnswerMap {
        self.run(text, question_count).0
    }

    /// Extract answers and report which strategy matched.
    pub fn extract_with_report(&self, text: &str, question_count: usize) -> ExtractionResult {
        let start = Utc::now();
        let (answers, strategy) = self.run(text, question_count);

        let mut warnings = Vec::new();
        if answers.is_empty() {
            warnings.push("No answers could be extracted".to_string());
        } else if answers.len() < question_count {
            warnings.push(format!(
                "Extracted {} of {} answers, missing: {}",
                answers.len(),
                question_count,
                missing_summary(&answers, question_count)
            ));
        }
        if strategy == Some(Strategy::Paragraph) {
            warnings.push("Answers were assigned to questions by paragraph order".to_string());
        }

        let elapsed = (Utc::now() - start).num_milliseconds().max(0) as u64;

        ExtractionResult {
            answers,
            strategy,
            question_count,
            text_length: text.chars().count(),
            warnings,
            processing_time_ms: elapsed,
        }
    }

    fn run(&self, text: &str, question_count: usize) -> (AnswerMap, Option<Strategy>) {
        if question_count == 0 || text.trim().is_empty() {
            debug!("Nothing to extract ({} questions)", question_count);
            return (AnswerMap::new(), None);
        }

        info!(
            "Extracting answers for {} questions from {} bytes of text",
            question_count,
            text.len()
        );

        let block = BlockStrategy::question();
        let labeled = BlockStrategy::labeled();
        let numbered = NumberedLineStrategy::new();
        let strategies: [&dyn AnswerStrategy; 3] = [&block, &labeled, &numbered];

        for strategy in strategies {
            let answers = strategy.extract(text, question_count);
            if !answers.is_empty() {
                debug!("{} strategy matched {} answers", strategy.kind(), answers.len());
                return (answers, Some(strategy.kind()));
            }
            debug!("{} strategy matched nothing", strategy.kind());
        }

        if self.paragraph_fallback {
            let paragraph = ParagraphStrategy::new(self.min_paragraph_chars);
            let answers = paragraph.extract(text, question_count);
            if !answers.is_empty() {
                debug!("paragraph fallback assigned {} answers", answers.len());
                return (answers, Some(Strategy::Paragraph));
            }
        }

        (AnswerMap::new(), None)
    }
}

/// Missing question numbers listed in a warning before the rest are
/// only counted.
const MAX_LISTED_MISSING: usize = 20;

/// List the first missing question numbers and count the rest.
///
/// Walks at most `answers.len() + MAX_LISTED_MISSING` numbers, so the cost
/// does not depend on `question_count`.
fn missing_summary(answers: &AnswerMap, question_count: usize) -> String {
    let missing_total = question_count - answers.len();
    let listed: Vec<String> = (1..=question_count as u64)
        .filter(|n| !u32::try_from(*n).is_ok_and(|n| answers.contains(n)))
        .take(MAX_LISTED_MISSING)
        .map(|n| n.to_string())
        .collect();

    let mut summary = listed.join(", ");
    if missing_total > listed.len() {
        summary.push_str(&format!(" and {} more", missing_total - listed.len()));
    }
    summary
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(map: &AnswerMap) -> Vec<(u32, String)> {
        map.iter().map(|(n, a)| (n, a.to_string())).collect()
    }

    fn pairs(expected: &[(u32, &str)]) -> Vec<(u32, String)> {
        expected.iter().map(|(n, a)| (*n, a.to_string())).collect()
    }

    #[test]
    fn test_block_strategy_first() {
        let result = AnswerExtractor::new().extract_with_report("Question 1: A\nQuestion 2: B", 2);
        assert_eq!(entries(&result.answers), pairs(&[(1, "A"), (2, "B")]));
        assert_eq!(result.strategy, Some(Strategy::Block));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_falls_through_to_labeled() {
        let result = AnswerExtractor::new().extract_with_report("Answer 1: X", 1);
        assert_eq!(entries(&result.answers), pairs(&[(1, "X")]));
        assert_eq!(result.strategy, Some(Strategy::Labeled));
    }

    #[test]
    fn test_falls_through_to_numbered_lines() {
        let result = AnswerExtractor::new().extract_with_report("1. foo\n2) bar\n3: baz", 3);
        assert_eq!(entries(&result.answers), pairs(&[(1, "foo"), (2, "bar"), (3, "baz")]));
        assert_eq!(result.strategy, Some(Strategy::NumberedLine));
    }

    #[test]
    fn test_out_of_range_question_yields_empty() {
        let result = AnswerExtractor::new().extract_with_report("Question 5: X", 3);
        assert!(result.answers.is_empty());
        assert_eq!(result.strategy, None);
        assert_eq!(result.warnings, vec!["No answers could be extracted".to_string()]);
    }

    #[test]
    fn test_out_of_range_block_falls_through_to_numbered_lines() {
        let text = "Question 5: heading\n1. first\n2. second";
        let answers = AnswerExtractor::new().extract(text, 2);
        assert_eq!(entries(&answers), pairs(&[(1, "first"), (2, "second")]));
    }

    #[test]
    fn test_strategies_are_not_merged() {
        let text = "Question 1: from block\n2. from numbered line";
        let answers = AnswerExtractor::new().extract(text, 2);
        assert_eq!(entries(&answers), pairs(&[(1, "from block\n2. from numbered line")]));
    }

    #[test]
    fn test_leading_zero_normalized() {
        let answers = AnswerExtractor::new().extract("Question 07: X", 10);
        assert_eq!(entries(&answers), pairs(&[(7, "X")]));
    }

    #[test]
    fn test_empty_text() {
        let extractor = AnswerExtractor::new().with_paragraph_fallback(true);
        for count in [0, 1, 50] {
            assert!(extractor.extract("", count).is_empty());
        }
    }

    #[test]
    fn test_zero_questions() {
        assert!(AnswerExtractor::new().extract("Question 1: A", 0).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let extractor = AnswerExtractor::new();
        let text = "1. Start of answer\ncontinued line\n2. Next answer";
        let first = extractor.extract(text, 2);
        let second = extractor.extract(text, 2);
        assert_eq!(first, second);
        assert_eq!(
            entries(&first),
            pairs(&[(1, "Start of answer continued line"), (2, "Next answer")])
        );
    }

    #[test]
    fn test_paragraph_fallback_only_when_enabled() {
        let text = "Encapsulation bundles data.\n\nReverse by swapping ends.";

        assert!(AnswerExtractor::new().extract(text, 2).is_empty());

        let result = AnswerExtractor::new()
            .with_paragraph_fallback(true)
            .extract_with_report(text, 2);
        assert_eq!(result.strategy, Some(Strategy::Paragraph));
        assert_eq!(
            entries(&result.answers),
            pairs(&[(1, "Encapsulation bundles data."), (2, "Reverse by swapping ends.")])
        );
        assert!(result.warnings.iter().any(|w| w.contains("paragraph order")));
    }

    #[test]
    fn test_paragraph_fallback_never_overrides_earlier_match() {
        let text = "Some long introduction paragraph.\n\n1. the only numbered answer";
        let result = AnswerExtractor::new()
            .with_paragraph_fallback(true)
            .extract_with_report(text, 3);
        assert_eq!(result.strategy, Some(Strategy::NumberedLine));
        assert_eq!(entries(&result.answers), pairs(&[(1, "the only numbered answer")]));
    }

    #[test]
    fn test_partial_extraction_warning() {
        let result = AnswerExtractor::new().extract_with_report("Question 2: B", 3);
        assert_eq!(
            result.warnings,
            vec!["Extracted 1 of 3 answers, missing: 1, 3".to_string()]
        );
    }

    #[test]
    fn test_missing_warning_is_capped_for_huge_counts() {
        let result = AnswerExtractor::new().extract_with_report("Question 2: B", usize::MAX);
        let listed: Vec<String> = std::iter::once(1)
            .chain(3..=21)
            .map(|n: u64| n.to_string())
            .collect();
        assert_eq!(
            result.warnings,
            vec![format!(
                "Extracted 1 of {} answers, missing: {} and {} more",
                usize::MAX,
                listed.join(", "),
                usize::MAX - 1 - 20
            )]
        );
    }

    #[test]
    fn test_missing_warning_past_u32_range() {
        let count = u32::MAX as usize + 3;
        let result = AnswerExtractor::new().extract_with_report("Question 1: A", count);
        let warning = &result.warnings[0];
        assert!(warning.starts_with("Extracted 1 of 4294967298 answers, missing: 2, 3, 4,"));
        assert!(warning.ends_with(" and 4294967277 more"));
    }

    #[test]
    fn test_labeled_markers_match_inside_words() {
        // A lone "a" before a number on the next line is a label.
        let result = AnswerExtractor::new().extract_with_report("1. a\n2. b", 2);
        assert_eq!(result.strategy, Some(Strategy::Labeled));
        assert_eq!(entries(&result.answers), pairs(&[(2, "b")]));

        let answers = AnswerExtractor::new().extract("Answer 1: Area 51 is secret", 60);
        assert_eq!(entries(&answers), pairs(&[(1, "Are"), (51, "is secret")]));
    }

    #[test]
    fn test_from_config() {
        let config = ExtractionConfig {
            paragraph_fallback: true,
            min_paragraph_chars: 3,
        };
        let extractor = AnswerExtractor::from_config(&config);
        assert!(extractor.paragraph_fallback());
        assert_eq!(extractor.extract("abcd\n\nxy", 2).get(1), Some("abcd"));
    }
}
