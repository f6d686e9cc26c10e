use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    api::id::ApiId,
    db::quiz::{NewQuiz, Question, Quiz, QuizOutline},
};

/// A quiz specification, as submitted by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSpec {
    pub questions: Vec<QuestionSpec>,
}

impl QuizSpec {
    /// Validate this spec into a quiz whose questions all have
    /// `options_per_question` options.
    pub fn into_quiz(self, options_per_question: usize) -> Result<NewQuiz> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| {
                q.into_question(options_per_question).map_err(|err| match err {
                    Error::ValidationFailed(reason) => {
                        Error::validation(format!("question {}: {reason}", i + 1))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        NewQuiz::new(questions)
    }
}

/// A question specification, including its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

impl QuestionSpec {
    pub fn into_question(self, options_per_question: usize) -> Result<Question> {
        Question::new(
            self.text,
            self.options,
            self.correct_option,
            options_per_question,
        )
    }
}

impl From<Question> for QuestionSpec {
    fn from(question: Question) -> Self {
        Self {
            text: question.text,
            options: question.options,
            correct_option: question.correct_option,
        }
    }
}

/// A stored quiz including its answer key. Only ever returned to the
/// author, in response to creating the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizWithAnswers {
    pub id: ApiId,
    pub questions: Vec<QuestionSpec>,
}

impl From<Quiz> for QuizWithAnswers {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id.into(),
            questions: quiz.quiz.questions.into_iter().map(Into::into).collect(),
        }
    }
}

/// A stored quiz as shown to someone taking it: no answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDescription {
    pub id: ApiId,
    pub questions: Vec<QuestionDescription>,
}

/// A question without its correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescription {
    pub text: String,
    pub options: Vec<String>,
}

impl From<Quiz> for QuizDescription {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id.into(),
            questions: quiz
                .quiz
                .questions
                .into_iter()
                .map(|q| QuestionDescription {
                    text: q.text,
                    options: q.options,
                })
                .collect(),
        }
    }
}

/// A one-line summary of a quiz, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: ApiId,
    pub question_count: usize,
}

impl From<QuizOutline> for QuizSummary {
    fn from(outline: QuizOutline) -> Self {
        Self {
            id: outline.id.into(),
            question_count: outline.question_count,
        }
    }
}

/// Answers to a quiz, one per question, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub answers: Vec<String>,
}
