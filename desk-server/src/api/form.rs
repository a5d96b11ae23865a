use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::Response,
};
use desk_core::validation::FieldMap;

use super::failure_response;

/// Raw url-encoded form fields of a request body.
///
/// Consumes the body. Nothing is validated here and unknown fields are kept;
/// when a field is repeated, its last value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields(pub FieldMap);

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            failure_response(
                StatusCode::BAD_REQUEST,
                format!("failed to read request body: {}", e),
            )
        })?;

        let body = std::str::from_utf8(&body).map_err(|e| {
            failure_response(
                StatusCode::BAD_REQUEST,
                format!("request body is not UTF-8: {}", e),
            )
        })?;

        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body).map_err(|e| {
            failure_response(
                StatusCode::BAD_REQUEST,
                format!("request body is not form data: {}", e),
            )
        })?;

        Ok(Self(pairs.into_iter().collect()))
    }
}
