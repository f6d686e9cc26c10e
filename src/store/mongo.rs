use log::{debug, info};
use mongodb::{bson::doc, options::FindOptions, Client, Database};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::{
    api::pagination::Page,
    db::{
        job::{JobPosting, NewJobPosting},
        quiz::{NewQuiz, Quiz, QuizOutline},
    },
    mongodb::{Coll, Id},
};

/// A store backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to the deployment at `uri` and check that it answers.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("Connected to database {db_name}");
        Ok(Self { client, db })
    }

    fn quiz_coll(&self) -> Coll<Quiz> {
        Coll::from_db(&self.db)
    }

    fn job_coll(&self) -> Coll<JobPosting> {
        Coll::from_db(&self.db)
    }

    pub async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        let quiz = Quiz::assign_id(quiz);
        self.quiz_coll().insert_one(&quiz, None).await?;
        debug!("Inserted quiz {}", quiz.id);
        Ok(quiz)
    }

    pub async fn quiz(&self, id: Id) -> Result<Quiz> {
        self.quiz_coll()
            .find_one(id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Quiz {id}")))
    }

    /// Outlines are computed by the server, so question bodies and answer
    /// keys never leave the database.
    pub async fn quizzes(&self) -> Result<Vec<QuizOutline>> {
        let pipeline = [
            doc! { "$sort": { "_id": 1 } },
            doc! { "$project": { "questionCount": { "$size": "$questions" } } },
        ];
        let outlines: Vec<QuizOutline> = self
            .quiz_coll()
            .aggregate(pipeline, None)
            .await?
            .with_type::<QuizOutline>()
            .try_collect()
            .await?;
        Ok(outlines)
    }

    pub async fn create_job(&self, job: NewJobPosting) -> Result<JobPosting> {
        let job = JobPosting::assign_id(job);
        self.job_coll().insert_one(&job, None).await?;
        debug!("Inserted job {}", job.id);
        Ok(job)
    }

    pub async fn job(&self, id: Id) -> Result<JobPosting> {
        self.job_coll()
            .find_one(id.as_doc(), None)
            .await?
            .ok_or_else(|| Error::not_found(format!("Job {id}")))
    }

    pub async fn jobs(&self, page: Option<Page>) -> Result<(Vec<JobPosting>, u64)> {
        let coll = self.job_coll();
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(page.map(|page| page.skip()))
            .limit(page.map(|page| i64::from(page.size())))
            .build();
        let selected: Vec<JobPosting> = coll.find(None, options).await?.try_collect().await?;
        let total = coll.count_documents(None, None).await?;
        Ok((selected, total))
    }

    pub async fn close(&self) {
        info!("Closing database connection");
        self.client.clone().shutdown().await;
    }

    /// Drop the whole database.
    #[cfg(test)]
    pub async fn drop_database(&self) -> Result<()> {
        self.db.drop(None).await?;
        Ok(())
    }
}
