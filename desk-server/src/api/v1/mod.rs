use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use desk_core::RecordId;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{auth::Identity, repository::RepositoryError};

use super::repository_failure;

pub mod customers;
pub mod jobs;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("repository error: {0}")]
    #[diagnostic(code(desk::error::repository))]
    Repository(#[from] RepositoryError),
}

pub fn router() -> Router {
    Router::new()
        .route("/api/v1/identity", get(identity_handler))
        .route("/api/v1/customers", get(customers::read_all))
        .route("/api/v1/jobs", get(jobs::read_all))
}

/// The signed-in user, as seen by API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub id: RecordId,
}

async fn identity_handler(identity: Identity) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        id: identity.record_id(),
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Repository(e) => repository_failure(&e),
        }
    }
}
