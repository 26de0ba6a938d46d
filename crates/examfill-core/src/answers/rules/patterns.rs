//! Line-level regex patterns for answer extraction.
//!
//! Marker blocks ("Question 3:") are found by the scanner in `markers`;
//! these patterns only cover single-line and paragraph layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "12. text", "3) text", "4: text", "5 text"
    pub static ref NUMBERED_LINE: Regex = Regex::new(
        r"^([0-9]+)[.):\s]+(.*)$"
    ).unwrap();

    // One or more blank lines
    pub static ref PARAGRAPH_BREAK: Regex = Regex::new(
        r"\n\s*\n"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_line_separators() {
        for line in ["1. foo", "1) foo", "1: foo", "1 foo", "1 .) foo"] {
            let caps = NUMBERED_LINE.captures(line).unwrap();
            assert_eq!(&caps[1], "1");
            assert_eq!(&caps[2], "foo", "line {line:?}");
        }
    }

    #[test]
    fn test_numbered_line_requires_separator() {
        assert!(NUMBERED_LINE.captures("2024").is_none());
        assert!(NUMBERED_LINE.captures("12abc").is_none());
        assert!(NUMBERED_LINE.captures("a. foo").is_none());
    }

    #[test]
    fn test_numbered_line_empty_remainder() {
        let caps = NUMBERED_LINE.captures("3.").unwrap();
        assert_eq!(&caps[2], "");
    }

    #[test]
    fn test_paragraph_break_spans_several_blank_lines() {
        let parts: Vec<&str> = PARAGRAPH_BREAK.split("one\n\n \n\t\ntwo\r\n\r\nthree").collect();
        assert_eq!(parts, vec!["one", "two\r", "three"]);
    }
}
