use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::db::quiz::Question;

/// The outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Number of questions answered correctly.
    pub score: usize,
    /// Number of questions in the quiz.
    pub total: usize,
}

/// Count the answers that exactly match their question's correct option.
///
/// Answers are matched to questions by position, so there must be exactly
/// one answer per question.
pub fn score(questions: &[Question], answers: &[String]) -> Result<ScoreResult> {
    if answers.len() != questions.len() {
        return Err(Error::LengthMismatch {
            expected: questions.len(),
            actual: answers.len(),
        });
    }

    let score = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(answer))
        .count();

    Ok(ScoreResult {
        score,
        total: questions.len(),
    })
}
