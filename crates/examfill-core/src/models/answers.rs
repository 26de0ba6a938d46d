//! Extracted answer data.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Heuristic pass that produced an [`AnswerMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `Question N:` blocks.
    Block,
    /// `Question`/`Answer`/`Q`/`A` labeled blocks.
    Labeled,
    /// Lines starting with `N.`, `N)`, `N:`.
    NumberedLine,
    /// Positional assignment of paragraphs.
    Paragraph,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Block => "block",
            Strategy::Labeled => "labeled",
            Strategy::NumberedLine => "numbered_line",
            Strategy::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from 1-based question number to trimmed answer text.
///
/// Keys are positions in the exam's question list, not question ids.
/// The only way to add an entry is [`AnswerMap::insert_bounded`], so every
/// key lies in `1..=question_count` and every value is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<u32, String>);

impl AnswerMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert an answer if the number is in `1..=question_count` and the
    /// trimmed text is non-empty. A later answer for the same number
    /// replaces the earlier one.
    ///
    /// Returns `false` when the entry was discarded.
    pub fn insert_bounded(&mut self, number: u64, text: &str, question_count: usize) -> bool {
        let text = text.trim();
        if text.is_empty() || number == 0 || number > question_count as u64 {
            return false;
        }
        let Ok(key) = u32::try_from(number) else {
            return false;
        };
        self.0.insert(key, text.to_string());
        true
    }

    /// Answer text for a question number.
    pub fn get(&self, number: u32) -> Option<&str> {
        self.0.get(&number).map(String::as_str)
    }

    pub fn contains(&self, number: u32) -> bool {
        self.0.contains_key(&number)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(number, answer)` pairs in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(n, a)| (*n, a.as_str()))
    }

}
