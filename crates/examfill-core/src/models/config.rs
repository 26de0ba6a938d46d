//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for examfill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamfillConfig {
    /// Document text configuration.
    pub pdf: PdfConfig,

    /// Answer extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Document text configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum non-whitespace text length to treat a document as text-based.
    pub min_text_length: usize,

    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            max_pages: 0,
        }
    }
}

/// Answer extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Assign paragraphs by position when no numbered strategy matches.
    pub paragraph_fallback: bool,

    /// Paragraphs with this many characters or fewer are skipped.
    pub min_paragraph_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            paragraph_fallback: false,
            min_paragraph_chars: 10,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (json, csv, text).
    pub format: String,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

impl ExamfillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ExamfillConfig =
            serde_json::from_str(r#"{"extraction": {"paragraph_fallback": true}}"#).unwrap();

        assert!(config.extraction.paragraph_fallback);
        assert_eq!(config.extraction.min_paragraph_chars, 10);
        assert_eq!(config.pdf.max_pages, 0);
        assert_eq!(config.output.format, "json");
    }
}
