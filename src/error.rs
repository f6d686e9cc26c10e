use std::fmt::Display;

use log::{debug, error};
use mongodb::error::Error as DbError;
use rocket::{
    http::{Status, StatusClass},
    response::Responder,
    serde::json::{Error as JsonError, Json},
    Request,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::RequestId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Expected {expected} answers but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Error {
    pub fn not_found(what: impl Display) -> Self {
        Self::NotFound(what.to_string())
    }

    pub fn validation(reason: impl Display) -> Self {
        Self::ValidationFailed(reason.to_string())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Db(_) => Status::InternalServerError,
            Self::NotFound(_) => Status::NotFound,
            Self::ValidationFailed(_) | Self::LengthMismatch { .. } => Status::UnprocessableEntity,
        }
    }

    /// Stable machine-readable name of this kind of error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Db(_) => "internal",
            Self::NotFound(_) => "not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::LengthMismatch { .. } => "length_mismatch",
        }
    }
}

impl<'r> From<JsonError<'r>> for Error {
    fn from(err: JsonError<'r>) -> Self {
        Self::validation(err)
    }
}

/// The body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub request_id: usize,
}

impl ErrorBody {
    /// Describe a bare status, for responses that never produced an [`Error`].
    pub fn from_status(status: Status, request_id: RequestId) -> Self {
        let error = match status.code {
            404 => "not_found",
            400 | 422 => "validation_failed",
            500..=599 => "internal",
            _ => "http_error",
        };
        Self {
            error: error.to_string(),
            message: status.reason_lossy().to_string(),
            request_id: request_id.0,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let id = *req.local_cache(RequestId::next);
        let status = self.status();
        let message = if status.class() == StatusClass::ServerError {
            // Don't leak driver internals to the caller.
            error!("rsp{id} failed: {self}");
            "Internal server error".to_string()
        } else {
            debug!("rsp{id} rejected: {self}");
            self.to_string()
        };
        let body = ErrorBody {
            error: self.kind().to_string(),
            message,
            request_id: id.0,
        };
        (status, Json(body)).respond_to(req)
    }
}
