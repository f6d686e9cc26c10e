use rocket::{http::Header, serde::json::Json, Responder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{
    api::id::ApiId,
    db::job::{JobPosting, NewJobPosting},
};

/// Header carrying the total number of postings when listing jobs.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// A job posting specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub company: String,
    pub location: String,
}

impl JobSpec {
    /// Trim every field and check that the required ones are not blank.
    pub fn into_posting(self) -> Result<NewJobPosting> {
        let required = |field: &str, value: String| {
            let value = value.trim().to_string();
            if value.is_empty() {
                Err(Error::validation(format!("{field} must not be blank")))
            } else {
                Ok(value)
            }
        };

        Ok(NewJobPosting {
            title: required("title", self.title)?,
            description: self.description.trim().to_string(),
            company: required("company", self.company)?,
            location: required("location", self.location)?,
        })
    }
}

/// A stored job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    pub id: ApiId,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
}

impl From<JobPosting> for JobDescription {
    fn from(job: JobPosting) -> Self {
        Self {
            id: job.id.into(),
            title: job.posting.title,
            description: job.posting.description,
            company: job.posting.company,
            location: job.posting.location,
        }
    }
}

/// A listing of job postings, alongside the size of the whole collection.
#[derive(Responder)]
pub struct JobList {
    inner: Json<Vec<JobDescription>>,
    total: Header<'static>,
}

impl JobList {
    pub fn new(jobs: Vec<JobPosting>, total: u64) -> Self {
        Self {
            inner: Json(jobs.into_iter().map(Into::into).collect()),
            total: Header::new(TOTAL_COUNT_HEADER, total.to_string()),
        }
    }
}
