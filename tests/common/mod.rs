// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use junkstop_client::config::Config;
use junkstop_client::models::User;
use junkstop_client::services::{Gateway, HeaderPolicy, SessionManager};
use junkstop_client::storage::{keys, CredentialStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Email/password accepted by the stub login endpoint.
pub const GOOD_EMAIL: &str = "kim@example.com";
pub const GOOD_PASSWORD: &str = "hunter2";
pub const GOOD_TOKEN: &str = "token-kim";

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct StubState {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let text = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            path: uri.path().to_string(),
            authorization: text(header::AUTHORIZATION),
            content_type: text(header::CONTENT_TYPE),
        });
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

/// Stub JunkStop API bound to an ephemeral local port.
pub struct StubApi {
    pub base_url: String,
    pub state: Arc<StubState>,
}

/// The user the stub returns for a successful login.
#[allow(dead_code)]
pub fn sample_user() -> User {
    User {
        id: 1,
        email: GOOD_EMAIL.to_string(),
        username: "kim".to_string(),
        streak_count: 5,
        best_streak: 12,
    }
}

/// Start the stub server on the current runtime.
pub async fn spawn_stub_api() -> StubApi {
    let state = Arc::new(StubState::default());

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/user/profile", get(profile))
        .route("/api/logs", get(list_logs).post(create_log))
        .route("/api/analytics/weekly", get(weekly))
        .route("/api/streak/increment", post(increment_streak))
        .route("/api/ai/daily-insight", get(daily_insight))
        .route("/api/ai/chat", post(chat))
        .route("/api/echo", get(echo).post(echo))
        .route("/api/always-401", get(always_unauthorized))
        .route("/api/boom", get(boom))
        .route("/api/teapot", get(teapot))
        .route("/api/empty", delete(empty))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub API");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubApi {
        base_url: format!("http://{}", addr),
        state,
    }
}

/// Gateway + session manager over a fresh in-memory store.
#[allow(dead_code)]
pub fn test_client(stub: &StubApi, store: &MemoryStore) -> (Gateway, SessionManager) {
    test_client_with_policy(stub, store, HeaderPolicy::default())
}

#[allow(dead_code)]
pub fn test_client_with_policy(
    stub: &StubApi,
    store: &MemoryStore,
    policy: HeaderPolicy,
) -> (Gateway, SessionManager) {
    let config = Config {
        header_policy: policy,
        ..Config::with_base_url(stub.base_url.clone())
    };
    let store: Arc<dyn CredentialStore> = Arc::new(store.clone());
    let gateway = Gateway::new(&config, store.clone()).expect("gateway");
    let manager = SessionManager::new(gateway.clone(), store);
    (gateway, manager)
}

/// Write a token and user record the way a previous login would have.
#[allow(dead_code)]
pub async fn seed_credentials(store: &MemoryStore, token: &str, user: &User) {
    store.set(keys::AUTH_TOKEN, token).await.unwrap();
    store
        .set(keys::USER_DATA, &serde_json::to_string(user).unwrap())
        .await
        .unwrap();
}

// ─── Stub handlers ───────────────────────────────────────────────────────────

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn authorized(headers: &HeaderMap) -> bool {
    matches!(bearer(headers), Some(token) if token.starts_with("token-") && token != "token-revoked")
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
        .into_response()
}

fn auth_body(token: &str, user: &User) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "id": user.id,
        "email": user.email,
        "username": user.username,
        "streak_count": user.streak_count,
        "best_streak": user.best_streak,
    })
}

async fn login(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers);

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if !email.contains('@') {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid email address"})),
        )
            .into_response();
    }
    if email != GOOD_EMAIL || password != GOOD_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect email or password"})),
        )
            .into_response();
    }

    Json(auth_body(GOOD_TOKEN, &sample_user())).into_response()
}

async fn register(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers);

    let email = body["email"].as_str().unwrap_or_default();
    let username = body["username"].as_str().unwrap_or_default();

    if email == GOOD_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Email already registered"})),
        )
            .into_response();
    }

    let user = User {
        id: 2,
        email: email.to_string(),
        username: username.to_string(),
        streak_count: 0,
        best_streak: 0,
    };
    Json(auth_body(&format!("token-{}", username), &user)).into_response()
}

async fn profile(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 1,
        "email": GOOD_EMAIL,
        "username": "kim",
        "streak_count": 5,
        "best_streak": 12,
        "total_saved": 42.5,
        "avg_guilt_score": 2.4,
        "total_logs": 9,
        "created_at": "2026-01-02T03:04:05"
    }))
    .into_response()
}

async fn list_logs(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        {
            "id": 11, "photo_url": null, "food_type": "burger", "guilt_rating": 4,
            "regret_rating": 5, "estimated_cost": 9.5, "estimated_calories": 850,
            "location": "Drive-thru", "created_at": "2026-10-18T12:00:00"
        },
        {
            "id": 10, "food_type": "candy", "guilt_rating": 2,
            "regretRating": 4, "estimated_cost": 1.25, "estimated_calories": 200,
            "location": null, "created_at": "2026-10-17T20:00:00"
        },
        {
            "id": 9, "food_type": "soda", "guilt_rating": 1,
            "regret_rating": 1, "estimated_cost": 2.0, "estimated_calories": 150,
            "location": null, "created_at": null
        }
    ]))
    .into_response()
}

async fn create_log(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "id": 12, "photo_url": "https://cdn.example/12.jpg", "food_type": "pizza",
        "guilt_rating": 3, "regret_rating": 4, "estimated_cost": 0,
        "estimated_calories": 700, "location": null,
        "created_at": "2026-10-18T13:00:00",
        "ai_motivation": "You can start fresh right now!"
    }))
    .into_response()
}

async fn weekly(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "total_logs": 3,
        "avg_guilt_score": 2.3,
        "avg_regret_score": 3.3,
        "total_cost": 12.75,
        "total_calories": 1200,
        "daily_breakdown": [
            {"date": "2026-10-12", "count": 1, "avg_guilt": 2.0, "avg_regret": 4.0,
             "total_cost": 1.25, "total_calories": 200},
            {"date": "2026-10-16", "count": 2, "avg_guilt": 2.5, "avg_regret": 3.0,
             "total_cost": 11.5, "total_calories": 1000}
        ]
    }))
    .into_response()
}

async fn increment_streak(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"streak_count": 13, "best_streak": 13, "is_new_record": true})).into_response()
}

async fn daily_insight(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"insight": "Evenings are your weak spot.", "generated_at": "2026-10-18T06:00:00"}))
        .into_response()
}

async fn chat(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(&uri, &headers);
    if !authorized(&headers) {
        return unauthorized();
    }
    let Some(message) = body["message"].as_str() else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "message"], "msg": "field required"}]})),
        )
            .into_response();
    };
    let guilt = body["guilt_level"].as_u64().unwrap_or(5);
    let regret = body["regret_level"].as_u64().unwrap_or(5);
    Json(json!({
        "response": format!("guilt {} regret {}: {}", guilt, regret, message),
        "timestamp": "2026-10-18T14:00:00"
    }))
    .into_response()
}

/// Reflect the headers the gateway sent.
async fn echo(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    let text = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
    Json(json!({
        "authorization": text(header::AUTHORIZATION),
        "content_type": text(header::CONTENT_TYPE),
        "client": headers.get("x-junkstop-client").and_then(|v| v.to_str().ok()),
    }))
    .into_response()
}

async fn always_unauthorized(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&uri, &headers);
    unauthorized()
}

async fn boom(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Database exploded"})),
    )
        .into_response()
}

async fn teapot(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    StatusCode::IM_A_TEAPOT.into_response()
}

async fn empty(State(state): State<Arc<StubState>>, uri: Uri, headers: HeaderMap) -> Response {
    state.record(&uri, &headers);
    StatusCode::NO_CONTENT.into_response()
}
