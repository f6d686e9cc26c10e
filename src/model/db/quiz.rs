use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    common::score::{self, ScoreResult},
    mongodb::Id,
};

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text.
    pub text: String,
    /// Possible answers, in display order.
    pub options: Vec<String>,
    /// The option that scores. Always one of `options`.
    pub correct_option: String,
}

impl Question {
    /// Create a question, checking that it has exactly `arity` distinct
    /// options and that the correct option is one of them.
    pub fn new(
        text: String,
        options: Vec<String>,
        correct_option: String,
        arity: usize,
    ) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::validation("question text must not be blank"));
        }
        if options.len() != arity {
            return Err(Error::validation(format!(
                "expected {arity} options, got {}",
                options.len()
            )));
        }
        let mut seen = HashSet::new();
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(Error::validation(format!("duplicate option {option:?}")));
            }
        }
        if !options.contains(&correct_option) {
            return Err(Error::validation(format!(
                "correct option {correct_option:?} is not one of the options"
            )));
        }

        Ok(Self {
            text,
            options,
            correct_option,
        })
    }

    /// Exact, case-sensitive comparison against the correct option.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_option == answer
    }
}

/// Core quiz data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCore {
    pub questions: Vec<Question>,
}

impl QuizCore {
    /// Create a quiz from already-validated questions. A quiz must have at
    /// least one question.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::validation("a quiz needs at least one question"));
        }
        Ok(Self { questions })
    }

    /// Grade a submission against this quiz's answer key.
    pub fn score(&self, answers: &[String]) -> Result<ScoreResult> {
        score::score(&self.questions, answers)
    }
}

/// A quiz that has not been stored yet.
pub type NewQuiz = QuizCore;

/// A quiz from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub quiz: QuizCore,
}

impl Quiz {
    /// Attach a freshly allocated ID to a new quiz.
    pub fn assign_id(quiz: NewQuiz) -> Self {
        Self { id: Id::new(), quiz }
    }
}

impl Deref for Quiz {
    type Target = QuizCore;

    fn deref(&self) -> &Self::Target {
        &self.quiz
    }
}

/// The listing fields of a stored quiz. Never carries the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutline {
    #[serde(rename = "_id")]
    pub id: Id,
    pub question_count: usize,
}

impl From<&Quiz> for QuizOutline {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            question_count: quiz.questions.len(),
        }
    }
}
