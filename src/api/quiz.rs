use log::info;
use rocket::{
    response::status::Created,
    serde::json::{Error as JsonError, Json},
    Route, State,
};

use crate::api::parse_id;
use crate::config::Config;
use crate::error::Result;
use crate::model::{
    api::quiz::{QuizDescription, QuizSpec, QuizSummary, QuizWithAnswers, Submission},
    common::score::ScoreResult,
};
use crate::store::Store;

pub fn routes() -> Vec<Route> {
    routes![create_quiz, list_quizzes, get_quiz, submit_answers]
}

#[post("/quizzes", data = "<spec>")]
async fn create_quiz(
    spec: std::result::Result<Json<QuizSpec>, JsonError<'_>>,
    store: &State<Store>,
    config: &State<Config>,
) -> Result<Created<Json<QuizWithAnswers>>> {
    let quiz = spec?
        .into_inner()
        .into_quiz(config.options_per_question())?;
    let quiz = store.create_quiz(quiz).await?;
    info!(
        "Created quiz {} with {} questions",
        quiz.id,
        quiz.questions.len()
    );

    let location = format!("/api/quizzes/{}", quiz.id);
    Ok(Created::new(location).body(Json(quiz.into())))
}

#[get("/quizzes")]
async fn list_quizzes(store: &State<Store>) -> Result<Json<Vec<QuizSummary>>> {
    let outlines = store.quizzes().await?;
    Ok(Json(outlines.into_iter().map(Into::into).collect()))
}

#[get("/quizzes/<quiz_id>")]
async fn get_quiz(quiz_id: &str, store: &State<Store>) -> Result<Json<QuizDescription>> {
    let quiz = store.quiz(parse_id(quiz_id, "Quiz")?).await?;
    Ok(Json(quiz.into()))
}

#[post("/quizzes/<quiz_id>/submissions", data = "<submission>")]
async fn submit_answers(
    quiz_id: &str,
    submission: std::result::Result<Json<Submission>, JsonError<'_>>,
    store: &State<Store>,
) -> Result<Json<ScoreResult>> {
    let quiz_id = parse_id(quiz_id, "Quiz")?;
    let submission = submission?.into_inner();
    let quiz = store.quiz(quiz_id).await?;
    let result = quiz.score(&submission.answers)?;
    info!(
        "Graded submission for quiz {quiz_id}: {}/{}",
        result.score, result.total
    );
    Ok(Json(result))
}
