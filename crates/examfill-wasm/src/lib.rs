//! WASM bindings for exam answer extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Answer maps cross the boundary as plain objects keyed by question number.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use examfill_core::models::config::ExtractionConfig;
use examfill_core::pdf::{DocumentSource, PdfExtractor};
use examfill_core::{AnswerMap, Exam, ExamfillError, Submission};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(error: ExamfillError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Extract answers from document text.
///
/// Returns an object mapping question numbers to answer text.
#[wasm_bindgen]
pub fn extract_answers(text: &str, question_count: usize) -> Result<JsValue, JsValue> {
    to_js(&examfill_core::extract_answers(text, question_count))
}

/// Extract answers from the bytes of a PDF file.
#[wasm_bindgen]
pub fn extract_answers_from_pdf(data: &[u8], question_count: usize) -> Result<JsValue, JsValue> {
    let text = pdf_text(data).map_err(to_js_error)?;
    to_js(&examfill_core::extract_answers(&text, question_count))
}

fn pdf_text(data: &[u8]) -> Result<String, ExamfillError> {
    let mut pdf = PdfExtractor::new();
    pdf.load(data)?;
    Ok(pdf.document_text()?)
}

/// Answer extractor class for browser use.
#[wasm_bindgen]
pub struct AnswerExtractor {
    inner: examfill_core::AnswerExtractor,
}

#[wasm_bindgen]
impl AnswerExtractor {
    /// Create a new answer extractor with the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: examfill_core::AnswerExtractor::from_config(&ExtractionConfig::default()),
        }
    }

    /// Assign paragraphs by position when no numbered answers are found.
    #[wasm_bindgen]
    pub fn set_paragraph_fallback(&mut self, enabled: bool) {
        self.inner = self.inner.clone().with_paragraph_fallback(enabled);
    }

    /// Extract answers from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, question_count: usize) -> Result<JsValue, JsValue> {
        to_js(&self.inner.extract(text, question_count))
    }

    /// Get extraction result with strategy, warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_report(&self, text: &str, question_count: usize) -> Result<JsValue, JsValue> {
        let result = self.inner.extract_with_report(text, question_count);
        for warning in &result.warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }
        to_js(&result)
    }

    /// Extract answers for an exam and return the submission payload.
    ///
    /// `exam` is the exam definition as a JS object; answers are bound to
    /// its questions by position.
    #[wasm_bindgen]
    pub fn bind_to_exam(&self, exam: JsValue, text: &str) -> Result<JsValue, JsValue> {
        let exam: Exam = serde_wasm_bindgen::from_value(exam)?;
        let submission = self.submission_for(&exam, text).map_err(to_js_error)?;
        to_js(&submission)
    }
}

impl AnswerExtractor {
    fn submission_for(&self, exam: &Exam, text: &str) -> Result<Submission, ExamfillError> {
        exam.validate()?;
        let answers: AnswerMap = self.inner.extract(text, exam.question_count());

        let mut sheet = examfill_core::AnswerSheet::for_exam(exam);
        sheet.apply(&answers);
        Ok(sheet.submission())
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}
