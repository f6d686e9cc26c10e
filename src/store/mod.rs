//! Persistence for quizzes and job postings.
//!
//! A [`Store`] is opened once when the server ignites, placed in managed
//! state for every handler to share, and closed on shutdown. Records are
//! only ever handed out as copies.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{
    api::pagination::Page,
    db::{
        job::{JobPosting, NewJobPosting},
        quiz::{NewQuiz, Quiz, QuizOutline},
    },
    mongodb::Id,
};

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Environment variable pointing tests at a real MongoDB deployment.
#[cfg(test)]
pub const TEST_DB_URI_VAR: &str = "QUIZBOARD_TEST_DB_URI";

/// Which backend a [`Store`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum StoreKind {
    #[default]
    #[serde(rename = "mongodb")]
    MongoDb,
    #[serde(rename = "memory")]
    Memory,
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MongoDb => write!(f, "MongoDB"),
            Self::Memory => write!(f, "in-memory"),
        }
    }
}

/// A handle on the record store. Cheap to clone; clones share the same data.
#[derive(Debug, Clone)]
pub enum Store {
    MongoDb(MongoStore),
    Memory(Arc<MemoryStore>),
}

impl Store {
    /// An empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(MemoryStore::default()))
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::MongoDb(_) => StoreKind::MongoDb,
            Self::Memory(_) => StoreKind::Memory,
        }
    }

    /// Persist a new quiz under a fresh ID.
    pub async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        match self {
            Self::MongoDb(store) => store.create_quiz(quiz).await,
            Self::Memory(store) => Ok(store.create_quiz(quiz).await),
        }
    }

    /// Fetch a quiz, failing with `NotFound` if there is none with this ID.
    pub async fn quiz(&self, id: Id) -> Result<Quiz> {
        match self {
            Self::MongoDb(store) => store.quiz(id).await,
            Self::Memory(store) => store.quiz(id).await,
        }
    }

    /// Outlines of all stored quizzes, ordered by ID.
    pub async fn quizzes(&self) -> Result<Vec<QuizOutline>> {
        match self {
            Self::MongoDb(store) => store.quizzes().await,
            Self::Memory(store) => Ok(store.quizzes().await),
        }
    }

    /// Persist a new job posting under a fresh ID.
    pub async fn create_job(&self, job: NewJobPosting) -> Result<JobPosting> {
        match self {
            Self::MongoDb(store) => store.create_job(job).await,
            Self::Memory(store) => Ok(store.create_job(job).await),
        }
    }

    /// Fetch a job posting, failing with `NotFound` if there is none with this ID.
    pub async fn job(&self, id: Id) -> Result<JobPosting> {
        match self {
            Self::MongoDb(store) => store.job(id).await,
            Self::Memory(store) => store.job(id).await,
        }
    }

    /// Job postings in ID order, optionally restricted to one page, together
    /// with the total number of postings.
    pub async fn jobs(&self, page: Option<Page>) -> Result<(Vec<JobPosting>, u64)> {
        match self {
            Self::MongoDb(store) => store.jobs(page).await,
            Self::Memory(store) => Ok(store.jobs(page).await),
        }
    }

    /// Release the underlying connection. The handle must not be used afterwards.
    pub async fn close(&self) {
        match self {
            Self::MongoDb(store) => store.close().await,
            Self::Memory(_) => {}
        }
    }
}

#[cfg(test)]
impl Store {
    /// A fresh, empty store for one test: a uniquely named MongoDB database
    /// if [`TEST_DB_URI_VAR`] is set, otherwise an in-memory store.
    pub async fn for_tests() -> Self {
        match std::env::var(TEST_DB_URI_VAR) {
            Ok(uri) => {
                let random: u32 = rand::random();
                let db = format!("test{random}");
                log::info!("Using database {db}");
                let store = MongoStore::connect(&uri, &db)
                    .await
                    .expect("Test database unavailable");
                Self::MongoDb(store)
            }
            Err(_) => Self::memory(),
        }
    }

    /// Delete everything in the store.
    pub async fn clear(&self) -> Result<()> {
        match self {
            Self::MongoDb(store) => store.drop_database().await,
            Self::Memory(store) => {
                store.clear().await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rocket::futures::future::join_all;

    use super::*;

    use crate::error::Error;
    use crate::model::{
        api::pagination::PaginationRequest,
        db::quiz::{Question, QuizCore},
    };

    #[backend_test]
    async fn quiz_round_trip(store: Store) {
        let created = store.create_quiz(QuizCore::example()).await.unwrap();
        assert_eq!(created.quiz, QuizCore::example());

        let fetched = store.quiz(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[backend_test]
    async fn unknown_quiz_is_not_found(store: Store) {
        store.create_quiz(QuizCore::example()).await.unwrap();
        let err = store.quiz(Id::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[backend_test]
    async fn concurrent_creates_get_distinct_ids(store: Store) {
        // Blocking-pool threads, so the creates really run in parallel.
        let runtime = rocket::tokio::runtime::Handle::current();
        let creates = (0..100).map(|_| {
            let store = store.clone();
            let runtime = runtime.clone();
            rocket::tokio::task::spawn_blocking(move || {
                runtime.block_on(store.create_quiz(QuizCore::example()))
            })
        });
        let ids = join_all(creates)
            .await
            .into_iter()
            .map(|quiz| quiz.unwrap().unwrap().id)
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 100);

        let stored = store.quizzes().await.unwrap();
        assert_eq!(stored.len(), 100);
        assert!(stored.iter().all(|outline| ids.contains(&outline.id)));
    }

    #[backend_test]
    async fn quiz_outlines(store: Store) {
        let first = store.create_quiz(QuizCore::example()).await.unwrap();
        let single = QuizCore::new(vec![Question::example2()]).unwrap();
        let second = store.create_quiz(single).await.unwrap();

        let outlines = store.quizzes().await.unwrap();
        assert_eq!(
            outlines,
            vec![
                QuizOutline {
                    id: first.id,
                    question_count: 3,
                },
                QuizOutline {
                    id: second.id,
                    question_count: 1,
                },
            ]
        );
    }

    #[backend_test]
    async fn job_create_and_list(store: Store) {
        let (jobs, total) = store.jobs(None).await.unwrap();
        assert!(jobs.is_empty());
        assert_eq!(total, 0);

        let created = store
            .create_job(NewJobPosting::example1())
            .await
            .unwrap();
        store
            .create_job(NewJobPosting::example2())
            .await
            .unwrap();

        let (jobs, total) = store.jobs(None).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(jobs[0], created);
        assert_eq!(store.job(created.id).await.unwrap(), created);
        assert!(matches!(
            store.job(Id::new()).await,
            Err(Error::NotFound(_))
        ));
    }

    #[backend_test]
    async fn job_pages(store: Store) {
        let mut created = Vec::new();
        for _ in 0..5 {
            created.push(
                store
                    .create_job(NewJobPosting::example1())
                    .await
                    .unwrap()
                    .id,
            );
        }

        let page = |num, size| {
            PaginationRequest::new(Some(num), Some(size))
                .page(100)
                .unwrap()
        };

        let mut seen = Vec::new();
        for num in 1..=3 {
            let (jobs, total) = store.jobs(page(num, 2)).await.unwrap();
            assert_eq!(total, 5);
            assert_eq!(jobs.len(), if num == 3 { 1 } else { 2 });
            seen.extend(jobs.into_iter().map(|job| job.id));
        }
        seen.sort();
        created.sort();
        assert_eq!(seen, created);

        let (jobs, total) = store.jobs(page(4, 2)).await.unwrap();
        assert!(jobs.is_empty());
        assert_eq!(total, 5);
    }
}
