//! Exam definitions and the caller-owned answer sheet.
//!
//! Extracted answers are keyed by position. Binding them to real question
//! ids happens here: answer `N` belongs to the `N`th question in display
//! order, whatever its id is.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::AnswerMap;
use crate::error::ExamError;

/// Identifier of a question as stored by the exam service.
pub type QuestionId = u64;

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<String>,
}

/// An exam with its questions in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub id: u64,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Exam {
    /// Parse and validate an exam from JSON.
    pub fn from_json(json: &str) -> Result<Self, ExamError> {
        let exam: Exam = serde_json::from_str(json).map_err(|e| ExamError::Parse(e.to_string()))?;
        exam.validate()?;
        Ok(exam)
    }

    /// Check that the exam has questions and that their ids are unique.
    pub fn validate(&self) -> Result<(), ExamError> {
        if self.questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }
        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(ExamError::DuplicateQuestion(question.id));
            }
        }
        Ok(())
    }

    /// Number of questions, used as the extraction bound.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Question ids in display order.
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id).collect()
    }

    /// Bind extracted answers to question ids by position.
    pub fn bind<'a>(&self, answers: &'a AnswerMap) -> Vec<(QuestionId, &'a str)> {
        bind_positional(&self.question_ids(), answers)
    }
}

/// Bind answer number `N` to `ids[N - 1]`. Numbers past the end of `ids`
/// are dropped.
pub fn bind_positional<'a>(ids: &[QuestionId], answers: &'a AnswerMap) -> Vec<(QuestionId, &'a str)> {
    answers
        .iter()
        .filter_map(|(number, text)| {
            let index = (number as usize).checked_sub(1)?;
            ids.get(index).map(|id| (*id, text))
        })
        .collect()
}

/// Answers as submitted to the exam service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub exam_id: u64,
    pub answers: BTreeMap<QuestionId, String>,
}

/// Answer text per question for the exam being taken.
///
/// Owned by the caller. Typed answers are edited one at a time; an uploaded
/// document replaces answers as a batch through [`AnswerSheet::apply`].
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSheet {
    exam_id: u64,
    question_ids: Vec<QuestionId>,
    answers: BTreeMap<QuestionId, String>,
    last_import: Option<DateTime<Utc>>,
}

impl AnswerSheet {
    /// Create an empty sheet for an exam.
    pub fn for_exam(exam: &Exam) -> Self {
        Self {
            exam_id: exam.id,
            question_ids: exam.question_ids(),
            answers: BTreeMap::new(),
            last_import: None,
        }
    }

    pub fn exam_id(&self) -> u64 {
        self.exam_id
    }

    /// Set the answer for a question.
    pub fn set_answer(&mut self, id: QuestionId, text: impl Into<String>) -> Result<(), ExamError> {
        if !self.question_ids.contains(&id) {
            return Err(ExamError::UnknownQuestion(id));
        }
        self.answers.insert(id, text.into());
        Ok(())
    }

    /// Current answer for a question, if any.
    pub fn answer(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    /// Word count of a question's answer.
    pub fn word_count(&self, id: QuestionId) -> usize {
        self.answer(id).map(count_words).unwrap_or(0)
    }

    /// Word count across all answers.
    pub fn total_words(&self) -> usize {
        self.answers.values().map(|a| count_words(a)).sum()
    }

    /// Number of questions with a non-blank answer.
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.trim().is_empty()).count()
    }

    /// Replace answers with extracted ones, bound by position.
    ///
    /// Questions without an extracted answer keep what was typed.
    /// Returns how many questions were filled.
    pub fn apply(&mut self, extracted: &AnswerMap) -> usize {
        let bound = bind_positional(&self.question_ids, extracted);
        let filled = bound.len();

        for (id, text) in bound {
            self.answers.insert(id, text.to_string());
        }

        if filled > 0 {
            self.last_import = Some(Utc::now());
        }

        debug!("Applied {} extracted answers to exam {}", filled, self.exam_id);
        filled
    }

    /// When answers were last filled from a document.
    pub fn last_import(&self) -> Option<DateTime<Utc>> {
        self.last_import
    }

    /// Remove every answer.
    pub fn clear(&mut self) {
        self.answers.clear();
        self.last_import = None;
    }

    /// Build the submission payload.
    pub fn submission(&self) -> Submission {
        Submission {
            exam_id: self.exam_id,
            answers: self.answers.clone(),
        }
    }
}

/// Number of whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
