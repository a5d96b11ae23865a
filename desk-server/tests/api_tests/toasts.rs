use std::time::Duration;

use axum::http::{header, StatusCode};
use desk_core::toast::{ToastVariant, TOAST_DURATION};
use desk_core::RecordId;
use futures::StreamExt;
use uuid::Uuid;

use crate::{TestApp, TestUser};

const WAIT: Duration = Duration::from_secs(1);

#[test_log::test(tokio::test)]
pub async fn successful_action_sends_success_toast() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let account = app.seed_account("Acme");
    let mut toasts = Box::pin(app.notifier().subscribe(app.user_id()));

    let id = RecordId::from(account.id).to_string();
    client
        .post_form("/actions/customers/delete", &[("id", id.as_str())])
        .await;

    let toast = tokio::time::timeout(WAIT, toasts.next())
        .await
        .expect("no toast published")
        .expect("toast stream ended");
    assert_eq!(ToastVariant::Success, toast.variant());
    assert_eq!("Customer deleted", toast.message());
    assert_eq!(TOAST_DURATION, toast.options().duration());
}

#[test_log::test(tokio::test)]
pub async fn failed_action_sends_error_toast() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let mut toasts = Box::pin(app.notifier().subscribe(app.user_id()));

    let id = RecordId::from(Uuid::new_v4()).to_string();
    client
        .post_form("/actions/customers/delete", &[("id", id.as_str())])
        .await;

    let toast = tokio::time::timeout(WAIT, toasts.next())
        .await
        .expect("no toast published")
        .expect("toast stream ended");
    assert_eq!(ToastVariant::Error, toast.variant());
    assert!(toast.message().contains("does not exist"));
}

#[test_log::test(tokio::test)]
pub async fn invalid_form_sends_no_toast() {
    let (app, client) = TestApp::start_and_connect(TestUser::Member);
    let mut toasts = Box::pin(app.notifier().subscribe(app.user_id()));

    client.post_form("/actions/customers/delete", &[]).await;

    assert!(tokio::time::timeout(Duration::from_millis(50), toasts.next())
        .await
        .is_err());
}

#[test_log::test(tokio::test)]
pub async fn toast_events_stream_for_signed_in_users() {
    let app = TestApp::start();

    let (status, headers) = app
        .connect(TestUser::Member)
        .get_head("/events/toasts")
        .await;
    assert_eq!(StatusCode::OK, status);
    assert_eq!(
        Some("text/event-stream"),
        headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    );

    let (status, _) = app
        .connect(TestUser::Anonymous)
        .get_head("/events/toasts")
        .await;
    assert_eq!(StatusCode::SEE_OTHER, status);
}
