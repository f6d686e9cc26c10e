use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::mongodb::Id;

/// Core job posting data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPostingCore {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
}

/// A job posting that has not been stored yet.
pub type NewJobPosting = JobPostingCore;

/// A job posting from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub posting: JobPostingCore,
}

impl JobPosting {
    /// Attach a freshly allocated ID to a new posting.
    pub fn assign_id(posting: NewJobPosting) -> Self {
        Self {
            id: Id::new(),
            posting,
        }
    }
}

impl Deref for JobPosting {
    type Target = JobPostingCore;

    fn deref(&self) -> &Self::Target {
        &self.posting
    }
}
