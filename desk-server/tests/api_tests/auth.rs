use axum::http::StatusCode;
use desk_core::RecordId;
use desk_server::auth::LOGIN_URI;

use crate::{TestApp, TestUser};

const ACTION_URIS: &[&str] = &[
    "/actions/customers/create",
    "/actions/customers/update",
    "/actions/customers/delete",
    "/actions/jobs/create",
    "/actions/jobs/delete",
];

#[test_log::test(tokio::test)]
pub async fn anonymous_actions_redirect_without_mutation() {
    let app = TestApp::start();
    let account = app.seed_account("Acme");
    let job = app.seed_job(account.id, "Install");

    let account_id = RecordId::from(account.id).to_string();
    let job_id = RecordId::from(job.id).to_string();

    for user in [TestUser::Anonymous, TestUser::UnknownSession] {
        let client = app.connect(user);
        for uri in ACTION_URIS {
            let id = if uri.contains("/jobs/") { &job_id } else { &account_id };
            let response = client
                .post_form(
                    uri,
                    &[
                        ("id", id.as_str()),
                        ("account_id", account_id.as_str()),
                        ("name", "Renamed"),
                        ("title", "Another"),
                    ],
                )
                .await;

            assert_eq!(StatusCode::SEE_OTHER, response.status, "{}", uri);
            assert_eq!(Some(LOGIN_URI), response.location());
        }
    }

    assert_eq!(vec![account], app.store().accounts());
    assert_eq!(vec![job], app.store().jobs());
}

#[test_log::test(tokio::test)]
pub async fn session_is_checked_before_validation() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Anonymous);

    let response = client.post_form("/actions/customers/delete", &[]).await;

    assert_eq!(StatusCode::SEE_OTHER, response.status);
    assert!(response.body.is_empty());
}

#[test_log::test(tokio::test)]
pub async fn reads_require_a_session() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Anonymous);

    for uri in ["/api/v1/customers", "/api/v1/jobs", "/api/v1/identity", "/"] {
        let response = client.get(uri).await;
        assert_eq!(StatusCode::SEE_OTHER, response.status, "{}", uri);
    }
}

#[test_log::test(tokio::test)]
pub async fn identity_is_the_session_user() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);

    let response = client.get("/api/v1/identity").await;

    assert_eq!(StatusCode::OK, response.status);
    let body: serde_json::Value = response.json();
    assert_eq!(RecordId::from(app.user_id()).to_string(), body["id"]);
}
