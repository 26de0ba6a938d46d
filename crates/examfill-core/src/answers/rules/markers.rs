//! Scanner for numbered answer markers such as `Question 3:` or `Q.4`.
//!
//! Grammar of a marker, matched case-insensitively anywhere in the text:
//!
//! ```text
//! marker := literal whitespace* digit+ (":" | ".")?
//! ```
//!
//! A block is the text after a marker up to the start of the next marker
//! (or the end of the text). Blocks never overlap.

use super::parse_number;

/// Marker literals, tried in order at every position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSet {
    literals: &'static [&'static str],
}

/// Only `Question N`.
pub const QUESTION_MARKERS: MarkerSet = MarkerSet {
    literals: &["question"],
};

/// `Question N`, `Answer N`, `Q N`, `Q. N`, `A N`, `A. N`.
///
/// Longer literals come first so `Question 1` is one marker, not `Q` plus
/// leftovers.
pub const LABELED_MARKERS: MarkerSet = MarkerSet {
    literals: &["question", "answer", "q.", "q", "a.", "a"],
};

/// A marker occurrence in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the marker literal.
    pub start: usize,
    /// Byte offset just past the digits and optional separator.
    pub end: usize,
    /// Question number, saturated on overflow.
    pub number: u64,
}

/// Text introduced by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedBlock<'a> {
    pub number: u64,
    /// Untrimmed text between this marker and the next one.
    pub body: &'a str,
    /// Byte offset of the marker.
    pub start: usize,
    /// Byte offset where the block ends.
    pub end: usize,
}

impl MarkerSet {
    /// Find the first marker starting at or after byte offset `from`.
    pub fn find(&self, text: &str, from: usize) -> Option<Marker> {
        (from..text.len())
            .filter(|&i| text.is_char_boundary(i))
            .find_map(|i| self.match_at(text, i))
    }

    fn match_at(&self, text: &str, start: usize) -> Option<Marker> {
        self.literals
            .iter()
            .find_map(|literal| match_marker(text, start, literal))
    }
}

fn match_marker(text: &str, start: usize, literal: &str) -> Option<Marker> {
    let bytes = text.as_bytes();
    let literal_end = start + literal.len();
    if literal_end > bytes.len() || !bytes[start..literal_end].eq_ignore_ascii_case(literal.as_bytes()) {
        return None;
    }

    // The literal is ASCII, so `literal_end` is a char boundary.
    let after_space = text[literal_end..].trim_start();
    let digit_len = after_space.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }

    let number = parse_number(&after_space[..digit_len]);
    let mut end = text.len() - after_space.len() + digit_len;
    if matches!(bytes.get(end), Some(b':' | b'.')) {
        end += 1;
    }

    Some(Marker { start, end, number })
}

/// Split text into marker-introduced blocks. Text before the first marker
/// is ignored.
pub fn scan_blocks<'a>(text: &'a str, markers: &MarkerSet) -> Vec<MarkedBlock<'a>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(marker) = markers.find(text, pos) {
        let end = markers
            .find(text, marker.end)
            .map(|next| next.start)
            .unwrap_or(text.len());

        blocks.push(MarkedBlock {
            number: marker.number,
            body: &text[marker.end..end],
            start: marker.start,
            end,
        });
        pos = end;
    }

    blocks
}
