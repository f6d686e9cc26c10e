use rocket::{http::Status, serde::json::Json, Catcher, Request, Route};

use crate::error::{Error, ErrorBody, Result};
use crate::logging::RequestId;
use crate::model::mongodb::Id;

mod job;
mod quiz;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(quiz::routes());
    routes.extend(job::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    catchers![default_catcher]
}

/// Render every framework-level failure (unknown route, unparseable query,
/// panicking handler...) in the same shape as our own errors.
#[catch(default)]
fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let id = *req.local_cache(RequestId::next);
    (status, Json(ErrorBody::from_status(status, id)))
}

/// Parse an ID from a path segment. A malformed ID can never have been
/// issued, so it is reported the same way as an unknown one.
fn parse_id(raw: &str, what: &str) -> Result<Id> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("{what} {raw}")))
}
