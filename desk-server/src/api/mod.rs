use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub mod actions;
pub mod events;
pub mod form;
pub mod v1;

use crate::{
    notifier::Notifier,
    repository::{Repository, RepositoryError},
    ui,
};

pub const HEALTH_URI: &str = "/health";

pub fn build(repository: Repository, notifier: Notifier) -> Router {
    Router::new()
        .route(HEALTH_URI, get(health_handler))
        .route("/", get(ui::dashboard_handler))
        .route(
            &format!("{}/{{*path}}", ui::ASSETS_URI),
            get(ui::static_file_handler),
        )
        .route(events::TOASTS_URI, get(events::toasts))
        .merge(actions::router())
        .merge(v1::router())
        .fallback(not_found_handler)
        .layer(Extension(repository))
        .layer(Extension(notifier))
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> &'static str {
    "UP"
}

async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "result": "failure",
            "message": "not found",
            "uri": uri.to_string()
        })),
    )
}

/// The generic failure body shared by every route.
pub(crate) fn failure_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "result": "failure",
            "message": message.into()
        })),
    )
        .into_response()
}

/// Store failures carry no field-level detail. A missing record is reported
/// as such, anything else is logged and hidden behind a generic message.
pub(crate) fn repository_failure(e: &RepositoryError) -> Response {
    match e {
        RepositoryError::NotFound { .. } => failure_response(StatusCode::NOT_FOUND, e.to_string()),
        _ => {
            tracing::error!(err = format!("{:?}", e), "store operation failed");
            failure_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}
