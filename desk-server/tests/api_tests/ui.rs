use axum::http::{header, StatusCode};

use crate::{TestApp, TestUser};

#[test_log::test(tokio::test)]
pub async fn dashboard_renders_for_signed_in_user() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Member);

    let response = client.get("/").await;

    assert_eq!(StatusCode::OK, response.status);
    let html = response.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(2, html.matches(r#"<section class="card">"#).count());
    assert!(html.contains("/assets/toasts.js"));
}

#[test_log::test(tokio::test)]
pub async fn assets_are_served_with_their_content_type() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Anonymous);

    let response = client.get("/assets/logo.svg").await;
    assert_eq!(StatusCode::OK, response.status);
    assert_eq!(
        Some("image/svg+xml"),
        response
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    );

    let response = client.get("/assets/missing.png").await;
    assert_eq!(StatusCode::NOT_FOUND, response.status);
}
