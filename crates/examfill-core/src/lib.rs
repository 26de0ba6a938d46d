//! Core library for filling exam answers from uploaded documents.
//!
//! This crate provides:
//! - Document text extraction (PDF and plain text)
//! - Heuristic answer extraction (question blocks, labels, numbered lines,
//!   paragraphs)
//! - Exam models and the answer sheet that extracted answers are bound to

pub mod error;
pub mod models;
pub mod pdf;
pub mod answers;

pub use error::{ExamfillError, Result};
pub use models::answers::{AnswerMap, Strategy};
pub use models::exam::{AnswerSheet, Exam, Question, QuestionId, Submission};
pub use pdf::{DocumentKind, DocumentSource, PdfExtractor, PlainTextSource};
pub use answers::{extract_answers, AnswerExtractor, ExtractionResult};
