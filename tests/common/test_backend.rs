use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use userform::{
    HttpUserApi,
    models::{NewUser, User, UserId},
};

/// A request as seen by the fake backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// `None` for the collection, `Some(id)` for `/user/{id}`
    pub id: Option<String>,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub users: Vec<User>,
    pub next_id: i64,
    pub requests: Vec<RecordedRequest>,
    /// Answer every request with this status and no body
    pub fail_with: Option<StatusCode>,
    /// Answer the list endpoint with a body that is not `{ data: [...] }`
    pub malformed_list: bool,
    /// Hand-written records served as-is by the read endpoints
    pub raw_users: Option<Vec<Value>>,
}

type SharedState = Arc<Mutex<BackendState>>;

/// In-memory implementation of the user REST contract
///
/// Runs an Axum server on a random port so each test gets its own backend and
/// tests can run in parallel.
pub struct TestBackend {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    state: SharedState,
}

impl TestBackend {
    pub async fn new() -> Self {
        Self::with_users(Vec::new()).await
    }

    /// Start a backend pre-populated with `users`
    ///
    /// # Example
    /// ```rust
    /// let backend = TestBackend::with_users(vec![sample_user(1)]).await;
    /// let api = backend.api();
    /// ```
    pub async fn with_users(users: Vec<User>) -> Self {
        let next_id = users.len() as i64 + 1;
        Self::spawn(BackendState {
            users,
            next_id,
            ..BackendState::default()
        })
        .await
    }

    /// Start a backend whose list and get-one endpoints return `records`
    /// verbatim, bypassing this crate's own serialization
    pub async fn with_raw_users(records: Vec<Value>) -> Self {
        Self::spawn(BackendState {
            raw_users: Some(records),
            ..BackendState::default()
        })
        .await
    }

    async fn spawn(state: BackendState) -> Self {
        let state: SharedState = Arc::new(Mutex::new(state));

        let api_routes = Router::new()
            .route("/user", get(list_users).post(create_user))
            .route(
                "/user/{id}",
                get(get_user).put(update_user).delete(delete_user),
            );

        let app = Router::new()
            .nest("/api/v1", api_routes)
            .with_state(state.clone());

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { address, state }
    }

    /// Base endpoint of the user resource
    pub fn base_url(&self) -> String {
        format!("{}/api/v1/user", self.address)
    }

    /// `HttpUserApi` pointed at this backend
    pub fn api(&self) -> HttpUserApi {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");
        HttpUserApi::with_client(client, &self.base_url()).expect("Invalid base URL")
    }

    pub fn users(&self) -> Vec<User> {
        self.state.lock().unwrap().users.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Number of POST/PUT/DELETE requests received
    pub fn mutation_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != Method::GET)
            .count()
    }

    pub fn list_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == Method::GET && r.id.is_none())
            .count()
    }

    pub fn fail_with(&self, status: StatusCode) {
        self.state.lock().unwrap().fail_with = Some(status);
    }

    pub fn recover(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_with = None;
        state.malformed_list = false;
    }

    pub fn serve_malformed_list(&self) {
        self.state.lock().unwrap().malformed_list = true;
    }
}

/// Record the request and return the injected failure status, if any
fn record(state: &SharedState, method: Method, id: Option<&str>) -> Option<StatusCode> {
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method,
        id: id.map(str::to_string),
    });
    state.fail_with
}

fn raw_id(record: &Value) -> String {
    match &record["id"] {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

async fn list_users(State(state): State<SharedState>) -> Response {
    if let Some(status) = record(&state, Method::GET, None) {
        return status.into_response();
    }

    let state = state.lock().unwrap();
    if state.malformed_list {
        return Json(serde_json::json!({ "users": state.users })).into_response();
    }
    if let Some(raw) = &state.raw_users {
        return Json(serde_json::json!({ "data": raw })).into_response();
    }
    Json(serde_json::json!({ "data": state.users })).into_response()
}

async fn get_user(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    if let Some(status) = record(&state, Method::GET, Some(&id)) {
        return status.into_response();
    }

    let state = state.lock().unwrap();
    if let Some(raw) = &state.raw_users {
        return match raw.iter().find(|record| raw_id(record) == id) {
            Some(record) => Json(record.clone()).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        };
    }
    match state.users.iter().find(|u| u.id.to_string() == id) {
        Some(user) => Json(user.clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn create_user(State(state): State<SharedState>, Json(new_user): Json<NewUser>) -> Response {
    if let Some(status) = record(&state, Method::POST, None) {
        return status.into_response();
    }

    let mut state = state.lock().unwrap();
    let id = UserId::Number(state.next_id);
    state.next_id += 1;
    let user = new_user.with_id(id);
    state.users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(user): Json<User>,
) -> Response {
    if let Some(status) = record(&state, Method::PUT, Some(&id)) {
        return status.into_response();
    }

    let mut state = state.lock().unwrap();
    match state.users.iter_mut().find(|u| u.id.to_string() == id) {
        Some(existing) => {
            *existing = user.clone();
            Json(user).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_user(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    if let Some(status) = record(&state, Method::DELETE, Some(&id)) {
        return status.into_response();
    }

    let mut state = state.lock().unwrap();
    let before = state.users.len();
    state.users.retain(|u| u.id.to_string() != id);
    if state.users.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::OK.into_response()
}
