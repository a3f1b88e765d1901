//! Shared fixtures for the HTTP integration tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use jobly::api::{create_router, AppState};
use jobly::infrastructure::auth::JwtConfig;
use jobly::infrastructure::company::CreateCompanyRequest;
use jobly::infrastructure::job::CreateJobRequest;
use jobly::infrastructure::user::{Argon2Hasher, CreateUserRequest};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A router over fresh in-memory storage plus the fixture's tokens and ids
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub u1_token: String,
    pub u2_token: String,
    pub admin_token: String,
    pub job_ids: Vec<i32>,
}

impl TestApp {
    /// Empty storage, no fixture data
    pub fn empty() -> (Router, AppState) {
        let hasher = Argon2Hasher::with_params(1024, 1).unwrap();
        let state = jobly::create_in_memory_state(JwtConfig::new(TEST_SECRET, 1), hasher);
        (create_router(state.clone()), state)
    }

    /// Companies c1..c3, jobs J1..J3 at c1, users u1, u2 and an admin
    pub async fn seeded() -> Self {
        let (router, state) = Self::empty();

        for n in 1..=3 {
            state
                .company_service
                .create(CreateCompanyRequest {
                    handle: format!("c{}", n),
                    name: format!("C{}", n),
                    num_employees: Some(n),
                    description: format!("Desc{}", n),
                    logo_url: Some(format!("http://c{}.img", n)),
                })
                .await
                .unwrap();
        }

        let mut job_ids = Vec::new();
        for (title, salary, equity) in [
            ("J1", Some(1), Some(0.1)),
            ("J2", Some(2), Some(0.2)),
            ("J3", Some(3), None),
        ] {
            let job = state
                .job_service
                .create(CreateJobRequest {
                    title: title.to_string(),
                    salary,
                    equity,
                    company_handle: "c1".to_string(),
                })
                .await
                .unwrap();
            job_ids.push(job.id);
        }

        let u1_token = register(&state, "u1", false).await;
        let u2_token = register(&state, "u2", false).await;
        let admin_token = register(&state, "admin", true).await;

        Self {
            router,
            state,
            u1_token,
            u2_token,
            admin_token,
            job_ids,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, Method::GET, uri, None, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send(&self.router, method, uri, token, body).await
    }
}

async fn register(state: &AppState, username: &str, is_admin: bool) -> String {
    let (_, token) = state
        .auth_service
        .register(CreateUserRequest {
            username: username.to_string(),
            password: format!("password-{}", username),
            first_name: format!("{}F", username.to_uppercase()),
            last_name: format!("{}L", username.to_uppercase()),
            email: format!("{}@user.com", username),
            photo_url: None,
            is_admin,
        })
        .await
        .unwrap();
    token
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
