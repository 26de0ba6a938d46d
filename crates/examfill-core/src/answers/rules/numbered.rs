//! Numbered-line strategy: answers start with `1.`, `2)`, `3:` at the
//! beginning of a line and continue on the following lines.

use tracing::debug;

use super::patterns::NUMBERED_LINE;
use super::{parse_number, AnswerStrategy};
use crate::models::answers::{AnswerMap, Strategy};

/// Line-oriented extraction with continuation lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedLineStrategy;

impl NumberedLineStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl AnswerStrategy for NumberedLineStrategy {
    fn kind(&self) -> Strategy {
        Strategy::NumberedLine
    }

    fn extract(&self, text: &str, question_count: usize) -> AnswerMap {
        let mut answers = AnswerMap::new();
        let mut discarded = 0usize;

        // A `0.` line leaves no question active.
        let mut current: Option<u64> = None;
        let mut buffer = String::new();

        let mut commit = |number: u64, buffer: &str, answers: &mut AnswerMap| {
            if !answers.insert_bounded(number, buffer, question_count) {
                discarded += 1;
            }
        };

        for line in text.lines() {
            let line = line.trim();

            if let Some(caps) = NUMBERED_LINE.captures(line) {
                if let Some(number) = current {
                    if !buffer.is_empty() {
                        commit(number, &buffer, &mut answers);
                    }
                }
                let number = parse_number(&caps[1]);
                current = (number > 0).then_some(number);
                buffer = caps[2].to_string();
            } else if current.is_some() && !line.is_empty() {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(line);
            }
        }

        if let Some(number) = current {
            if !buffer.is_empty() {
                commit(number, &buffer, &mut answers);
            }
        }

        if discarded > 0 {
            debug!("numbered_line strategy discarded {} answers", discarded);
        }

        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(map: &AnswerMap) -> Vec<(u32, &str)> {
        map.iter().collect()
    }

    #[test]
    fn test_mixed_separators() {
        let answers = NumberedLineStrategy.extract("1. foo\n2) bar\n3: baz", 3);
        assert_eq!(entries(&answers), vec![(1, "foo"), (2, "bar"), (3, "baz")]);
    }

    #[test]
    fn test_continuation_lines() {
        let text = "1. Start of answer\ncontinued line\n2. Next answer";
        let answers = NumberedLineStrategy.extract(text, 2);
        assert_eq!(
            entries(&answers),
            vec![(1, "Start of answer continued line"), (2, "Next answer")]
        );
    }

    #[test]
    fn test_number_alone_then_text_on_next_line() {
        let text = "1.\n   The answer\n\n   spans lines  \n2)";
        let answers = NumberedLineStrategy.extract(text, 2);
        assert_eq!(entries(&answers), vec![(1, "The answer spans lines")]);
    }

    #[test]
    fn test_text_before_first_number_is_ignored() {
        let text = "Name: Jane\nStudent ID 5\n1. real answer";
        let answers = NumberedLineStrategy.extract(text, 5);
        assert_eq!(entries(&answers), vec![(1, "real answer")]);
    }

    #[test]
    fn test_zero_deactivates_current_question() {
        let text = "1. one\n0. ignored\nalso ignored\n2. two";
        let answers = NumberedLineStrategy.extract(text, 2);
        assert_eq!(entries(&answers), vec![(1, "one"), (2, "two")]);
    }

    #[test]
    fn test_out_of_range_dropped() {
        let answers = NumberedLineStrategy.extract("1. a\n4. d\n07: g", 3);
        assert_eq!(entries(&answers), vec![(1, "a")]);

        let answers = NumberedLineStrategy.extract("07: g", 10);
        assert_eq!(entries(&answers), vec![(7, "g")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(NumberedLineStrategy.extract("", 3).is_empty());
        assert!(NumberedLineStrategy.extract("\n\n  \n", 3).is_empty());
    }
}
