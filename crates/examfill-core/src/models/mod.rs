//! Data models.

pub mod answers;
pub mod config;
pub mod exam;

pub use answers::{AnswerMap, Strategy};
pub use config::ExamfillConfig;
pub use exam::{count_words, AnswerSheet, Exam, Question, QuestionId, Submission};
