//! Error types for the examfill-core library.
//!
//! Answer extraction itself never fails; these errors cover the layers
//! around it (reading documents, loading exams).

use thiserror::Error;

/// Main error type for the examfill library.
#[derive(Error, Debug)]
pub enum ExamfillError {
    /// Document loading or text extraction error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Exam definition or answer sheet error.
    #[error("exam error: {0}")]
    Exam(#[from] ExamError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to turning a document into text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Text was requested before any document was loaded.
    #[error("no document loaded")]
    NotLoaded,

    /// The file type is not supported.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Plain text input was not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Errors related to exams and answer sheets.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExamError {
    /// The question id is not part of the exam.
    #[error("unknown question id: {0}")]
    UnknownQuestion(u64),

    /// The exam lists the same question id twice.
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(u64),

    /// The exam has no questions.
    #[error("exam has no questions")]
    NoQuestions,

    /// The exam definition could not be parsed.
    #[error("failed to parse exam: {0}")]
    Parse(String),
}

/// Result type for the examfill library.
pub type Result<T> = std::result::Result<T, ExamfillError>;
