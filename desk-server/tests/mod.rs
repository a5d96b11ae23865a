use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use tower::ServiceExt;
use uuid::Uuid;

use desk_server::{
    api,
    auth::SESSION_COOKIE,
    notifier::Notifier,
    repository::{memory::MemoryStore, Account, Job, Repository},
};

const SESSION_TOKEN: &str = "it-session-token";


/// The full router over an in-memory store with one signed-in user.
pub struct TestApp {
    router: Router,
    store: MemoryStore,
    notifier: Notifier,
    user_id: Uuid,
}

pub enum TestUser {
    Anonymous,
    Member,
    UnknownSession,
}

impl TestApp {
    pub fn start() -> Self {
        let store = MemoryStore::new();
        let notifier = Notifier::new();
        let user_id = Uuid::new_v4();
        store.insert_session(SESSION_TOKEN, user_id);

        let router = api::build(Repository::in_memory(store.clone()), notifier.clone());

        Self {
            router,
            store,
            notifier,
            user_id,
        }
    }

    pub fn start_and_connect(user: TestUser) -> (Self, TestClient) {
        let app = Self::start();
        let client = app.connect(user);
        (app, client)
    }

    pub fn connect(&self, user: TestUser) -> TestClient {
        let token = match user {
            TestUser::Anonymous => None,
            TestUser::Member => Some(SESSION_TOKEN),
            TestUser::UnknownSession => Some("no-such-session"),
        };
        TestClient {
            router: self.router.clone(),
            token,
        }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn seed_account(&self, name: &str) -> Account {
        let account = Account {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.store.insert_account(account.clone());
        account
    }

    pub fn seed_job(&self, account_id: Uuid, title: &str) -> Job {
        let job = Job {
            id: Uuid::new_v4(),
            account_id,
            user_id: self.user_id,
            support_person_id: None,
            title: title.to_string(),
            created_at: Utc::now(),
        };
        self.store.insert_job(job.clone());
        job
    }
}

pub struct TestClient {
    router: Router,
    token: Option<&'static str>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is not the expected JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).expect("response body is not UTF-8")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestClient {
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, Body::empty(), None).await
    }

    /// GET returning as soon as the response head arrives, for streaming
    /// endpoints whose body never ends.
    pub async fn get_head(&self, path: &str) -> (StatusCode, HeaderMap) {
        let response = self
            .router
            .clone()
            .oneshot(self.request(Method::GET, path, Body::empty(), None))
            .await
            .expect("router is infallible");
        (response.status(), response.headers().clone())
    }

    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = serde_urlencoded::to_string(fields).expect("failed to encode form");
        self.send(
            Method::POST,
            path,
            Body::from(body),
            Some("application/x-www-form-urlencoded"),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(self.request(method, path, body, content_type))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");

        tracing::debug!(
            status = status.as_u16(),
            body = String::from_utf8_lossy(&body).to_string(),
            "received response"
        );

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = self.token {
            builder = builder.header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(body).expect("failed to build request")
    }
}
