//! Form action routes.
//!
//! Every action runs the same pipeline: the session is resolved (anonymous
//! callers are redirected before the body is read), the form fields are
//! extracted and validated against the action's schema, exactly one store
//! mutation runs, and the outcome is formatted as JSON and pushed to the
//! user as a toast.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use desk_core::{validation::ValidationFailure, RecordId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    notifier::Notifier,
    repository::{self, RepositoryError},
};

use super::repository_failure;

pub mod customers;
pub mod jobs;

pub const CUSTOMER_NAME_MAX_LENGTH: usize = 120;
pub const JOB_TITLE_MAX_LENGTH: usize = 200;

pub fn router() -> Router {
    Router::new()
        .route("/actions/customers/create", post(customers::create))
        .route("/actions/customers/update", post(customers::update))
        .route("/actions/customers/delete", post(customers::delete))
        .route("/actions/jobs/create", post(jobs::create))
        .route("/actions/jobs/delete", post(jobs::delete))
}

#[derive(Error, Diagnostic, Debug)]
pub enum ActionError {
    #[error("invalid form input: {0}")]
    #[diagnostic(code(desk::error::validation))]
    Validation(#[from] ValidationFailure),
    #[error("repository error: {0}")]
    #[diagnostic(code(desk::error::repository))]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        match self {
            ActionError::Validation(failure) => {
                (StatusCode::BAD_REQUEST, Json(failure)).into_response()
            }
            ActionError::Repository(e) => repository_failure(&e),
        }
    }
}

/// Body of a successful action. Actions that create a record also return
/// its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSuccess {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

impl ActionSuccess {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: impl Into<RecordId>) -> Self {
        Self {
            success: true,
            id: Some(id.into()),
        }
    }
}

/// Tells `recipient` how their mutation went and passes the outcome on.
pub(crate) fn notify_outcome<T>(
    notifier: &Notifier,
    recipient: Uuid,
    result: repository::Result<T>,
    success_message: &str,
) -> Result<T, ActionError> {
    match result {
        Ok(value) => {
            notifier.success(recipient, success_message);
            Ok(value)
        }
        Err(e) => {
            let message = if e.is_not_found() {
                e.to_string()
            } else {
                "Something went wrong, please try again".to_string()
            };
            notifier.error(recipient, message);
            Err(e.into())
        }
    }
}
