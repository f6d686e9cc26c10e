use std::collections::HashMap;

use rocket::tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::model::{
    api::pagination::Page,
    db::{
        job::{JobPosting, NewJobPosting},
        quiz::{NewQuiz, Quiz, QuizOutline},
    },
    mongodb::Id,
};

/// A store that keeps everything in process memory.
///
/// Job postings are kept in ID order so that pages are stable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    quizzes: RwLock<HashMap<Id, Quiz>>,
    jobs: RwLock<Vec<JobPosting>>,
}

impl MemoryStore {
    pub async fn create_quiz(&self, quiz: NewQuiz) -> Quiz {
        let quiz = Quiz::assign_id(quiz);
        self.quizzes.write().await.insert(quiz.id, quiz.clone());
        quiz
    }

    pub async fn quiz(&self, id: Id) -> Result<Quiz> {
        self.quizzes
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Quiz {id}")))
    }

    pub async fn quizzes(&self) -> Vec<QuizOutline> {
        let mut outlines: Vec<QuizOutline> =
            self.quizzes.read().await.values().map(Into::into).collect();
        outlines.sort_by_key(|outline| outline.id);
        outlines
    }

    pub async fn create_job(&self, job: NewJobPosting) -> JobPosting {
        // Allocate under the lock so the list stays in ID order.
        let mut jobs = self.jobs.write().await;
        let job = JobPosting::assign_id(job);
        jobs.push(job.clone());
        job
    }

    pub async fn job(&self, id: Id) -> Result<JobPosting> {
        self.jobs
            .read()
            .await
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Job {id}")))
    }

    pub async fn jobs(&self, page: Option<Page>) -> (Vec<JobPosting>, u64) {
        let jobs = self.jobs.read().await;
        let total = jobs.len() as u64;
        let selected = match page {
            Some(page) => jobs
                .iter()
                .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
                .take(page.size() as usize)
                .cloned()
                .collect(),
            None => jobs.to_vec(),
        };
        (selected, total)
    }

    pub async fn clear(&self) {
        self.quizzes.write().await.clear();
        self.jobs.write().await.clear();
    }
}
