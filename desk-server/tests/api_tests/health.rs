use axum::http::StatusCode;

use crate::{TestApp, TestUser};

#[test_log::test(tokio::test)]
pub async fn health_check() {
    let (_, client) = TestApp::start_and_connect(TestUser::Anonymous);

    let response = client.get("/health").await;

    assert_eq!(StatusCode::OK, response.status);
    assert_eq!("UP", response.text());
}

#[test_log::test(tokio::test)]
pub async fn unknown_route_is_not_found() {
    let (_, client) = TestApp::start_and_connect(TestUser::Member);

    let response = client.get("/no/such/route").await;

    assert_eq!(StatusCode::NOT_FOUND, response.status);
    let body: serde_json::Value = response.json();
    assert_eq!("failure", body["result"]);
}
