use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use desk_core::RecordId;
use serde::Serialize;
use uuid::Uuid;

use crate::repository::Repository;

pub const SESSION_COOKIE: &str = "desk_session";
pub const LOGIN_URI: &str = "/login";

/// The signed-in user of a request.
///
/// Extracting an `Identity` resolves the session token before anything else
/// in the request is looked at; handlers taking one never run for anonymous
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn record_id(&self) -> RecordId {
        self.user_id.into()
    }
}

/// Rejection for requests without a valid session.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_URI).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(|| {
            tracing::trace!(uri = parts.uri.to_string(), "no session token");
            AuthRedirect
        })?;

        let repository = parts
            .extensions
            .get::<Repository>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("repository extension missing, cannot resolve session");
                AuthRedirect
            })?;

        match repository.session().resolve(&token).await {
            Ok(Some(user_id)) => Ok(Identity { user_id }),
            Ok(None) => {
                tracing::debug!(uri = parts.uri.to_string(), "unknown or expired session");
                Err(AuthRedirect)
            }
            Err(e) => {
                tracing::error!(err = format!("{:?}", e), "failed to resolve session");
                Err(AuthRedirect)
            }
        }
    }
}

/// Session token from the session cookie, or failing that a bearer token.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
