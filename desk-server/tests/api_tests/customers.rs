use axum::http::StatusCode;
use desk_core::{validation::ValidationFailure, RecordId};
use desk_server::api::actions::ActionSuccess;
use uuid::Uuid;

use crate::{TestApp, TestUser};

const DELETE_URI: &str = "/actions/customers/delete";

#[test_log::test(tokio::test)]
pub async fn delete_removes_exactly_that_customer() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let doomed = app.seed_account("Doomed Ltd");
    let kept = app.seed_account("Kept Ltd");

    let id = RecordId::from(doomed.id).to_string();
    let response = client.post_form(DELETE_URI, &[("id", id.as_str())]).await;

    assert_eq!(StatusCode::OK, response.status);
    assert_eq!(serde_json::json!({ "success": true }), response.json::<serde_json::Value>());
    assert_eq!(vec![kept], app.store().accounts());
}

#[test_log::test(tokio::test)]
pub async fn delete_without_id_is_a_validation_failure() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    app.seed_account("Acme");

    for fields in [vec![], vec![("id", "")], vec![("name", "Acme")]] {
        let response = client.post_form(DELETE_URI, &fields).await;

        assert_eq!(StatusCode::BAD_REQUEST, response.status);
        let failure: ValidationFailure = response.json();
        assert_eq!(
            vec!["must be a valid identifier".to_string()],
            failure.field_errors["id"]
        );
        assert_eq!(fields.len(), failure.fields.len());
    }

    assert_eq!(1, app.store().accounts().len());
}

#[test_log::test(tokio::test)]
pub async fn delete_with_undecodable_id_is_a_validation_failure() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    app.seed_account("Acme");

    let response = client
        .post_form(DELETE_URI, &[("id", "x9UPS6CO0NnnYRWye5kU")])
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status);
    assert_eq!(
        serde_json::json!({
            "fieldErrors": { "id": ["must be a valid identifier"] },
            "fields": { "id": "x9UPS6CO0NnnYRWye5kU" }
        }),
        response.json::<serde_json::Value>()
    );
    assert_eq!(1, app.store().accounts().len());
}

#[test_log::test(tokio::test)]
pub async fn delete_echoes_raw_input_on_failure() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Member);

    let response = client
        .post_form(DELETE_URI, &[("id", "not an id"), ("extra", "kept")])
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status);
    assert_eq!(
        serde_json::json!({
            "fieldErrors": { "id": ["must be a valid identifier"] },
            "fields": { "extra": "kept", "id": "not an id" }
        }),
        response.json::<serde_json::Value>()
    );
}

#[test_log::test(tokio::test)]
pub async fn delete_of_unknown_customer_fails_and_touches_nothing() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let existing = app.seed_account("Acme");
    app.seed_job(existing.id, "Install router");

    let id = RecordId::from(Uuid::new_v4()).to_string();
    let response = client.post_form(DELETE_URI, &[("id", id.as_str())]).await;

    assert_eq!(StatusCode::NOT_FOUND, response.status);
    let body: serde_json::Value = response.json();
    assert_eq!("failure", body["result"]);
    assert!(body.get("fieldErrors").is_none());

    assert_eq!(vec![existing], app.store().accounts());
    assert_eq!(1, app.store().jobs().len());
}

#[test_log::test(tokio::test)]
pub async fn delete_cascades_to_jobs() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let doomed = app.seed_account("Doomed Ltd");
    let kept = app.seed_account("Kept Ltd");
    app.seed_job(doomed.id, "Doomed job");
    let kept_job = app.seed_job(kept.id, "Kept job");

    let id = RecordId::from(doomed.id).to_string();
    let response = client.post_form(DELETE_URI, &[("id", id.as_str())]).await;

    assert_eq!(StatusCode::OK, response.status);
    assert_eq!(vec![kept_job], app.store().jobs());
}

#[test_log::test(tokio::test)]
pub async fn create_returns_new_identifier() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);

    let response = client
        .post_form(
            "/actions/customers/create",
            &[("name", "  Acme Corp "), ("email", "ops@acme.test")],
        )
        .await;

    assert_eq!(StatusCode::OK, response.status);
    let success: ActionSuccess = response.json();
    assert!(success.success);

    let accounts = app.store().accounts();
    assert_eq!(1, accounts.len());
    assert_eq!(Some(RecordId::from(accounts[0].id)), success.id);
    assert_eq!("Acme Corp", accounts[0].name);
    assert_eq!(Some("ops@acme.test".to_string()), accounts[0].email);
}

#[test_log::test(tokio::test)]
pub async fn create_rejects_invalid_fields() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let long_name = "x".repeat(121);

    let response = client
        .post_form(
            "/actions/customers/create",
            &[("name", long_name.as_str()), ("email", "not-an-email")],
        )
        .await;

    assert_eq!(StatusCode::BAD_REQUEST, response.status);
    let failure: ValidationFailure = response.json();
    assert_eq!(
        vec!["must be at most 120 characters".to_string()],
        failure.field_errors["name"]
    );
    assert_eq!(
        vec!["must be a valid email address".to_string()],
        failure.field_errors["email"]
    );
    assert!(app.store().accounts().is_empty());
}

#[test_log::test(tokio::test)]
pub async fn update_changes_name_and_clears_email() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let account = app.seed_account("Old Name");

    let id = RecordId::from(account.id).to_string();
    let response = client
        .post_form(
            "/actions/customers/update",
            &[("id", id.as_str()), ("name", "New Name"), ("email", "")],
        )
        .await;

    assert_eq!(StatusCode::OK, response.status);
    let accounts = app.store().accounts();
    assert_eq!("New Name", accounts[0].name);
    assert_eq!(None, accounts[0].email);
    assert!(accounts[0].updated_at.is_some());
}

#[test_log::test(tokio::test)]
pub async fn update_of_unknown_customer_is_not_found() {
    let (_app, client) = TestApp::start_and_connect(TestUser::Member);

    let id = RecordId::new().to_string();
    let response = client
        .post_form("/actions/customers/update", &[("id", id.as_str()), ("name", "Name")])
        .await;

    assert_eq!(StatusCode::NOT_FOUND, response.status);
}

#[test_log::test(tokio::test)]
pub async fn customers_are_listed() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let account = app.seed_account("Acme");

    let response = client.get("/api/v1/customers").await;

    assert_eq!(StatusCode::OK, response.status);
    let customers: Vec<desk_server::api::v1::customers::Customer> = response.json();
    assert_eq!(1, customers.len());
    assert_eq!(RecordId::from(account.id), customers[0].id);
    assert_eq!("Acme", customers[0].name);
}
