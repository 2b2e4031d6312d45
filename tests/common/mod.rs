//! Shared test harness: an in-process backend speaking the envelope
//! contract, plus a fully wired [`AppContext`] pointed at it.

// Each integration binary compiles this module and uses its own subset.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use serde_json::{Value, json};
use tempfile::TempDir;

use maktab::AppContext;
use maktab_config::{ApiConfig, Environment, StorageConfig};

pub const VALID_EMAIL: &str = "admin@x.com";
pub const VALID_PASSWORD: &str = "secret1";
pub const ISSUED_TOKEN: &str = "issued-token-1";

/// Mutable backend fixture. Tests reach in to reshape data or inject
/// failures between calls.
pub struct BackendState {
    /// Role stamped onto every admin payload.
    pub role: String,
    /// The token the backend currently accepts; `None` rejects everything.
    pub token: Option<String>,
    /// Every `/auth/profile` request, including failed ones.
    pub profile_hits: u32,
    /// The next N profile requests answer 503 without an envelope.
    pub profile_transient_failures: u32,
    /// When set, every mutation answers HTTP 500 with this envelope error.
    pub fail_mutations_with: Option<String>,
    /// Artificial delay for registration listings, keyed by status filter.
    pub list_delay_ms: HashMap<String, u64>,
    pub classes: Vec<Value>,
    pub teachers: Vec<Value>,
    pub registrations: Vec<Value>,
    next_id: u32,
}

pub type SharedState = Arc<Mutex<BackendState>>;

pub fn admin_payload(role: &str) -> Value {
    json!({
        "id": "a1",
        "username": "sara",
        "email": VALID_EMAIL,
        "role": role,
        "isActive": true
    })
}

pub fn class_payload(id: &str, name: &str, age_min: u8, age_max: u8) -> Value {
    json!({
        "id": id,
        "name": name,
        "startTime": "16:00",
        "endTime": "17:30",
        "ageMin": age_min,
        "ageMax": age_max,
        "maxStudents": 15,
        "currentStudents": 5,
        "availableSpots": 10,
        "isFull": false
    })
}

pub fn teacher_payload(id: &str) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "id": id,
        "name": name,
        "email": email,
        "phone": "+15550101",
        "specialization": "Tajweed",
        "classCount": 1
    })
}

/// A complete registration row. `valid: false` drops the student relation,
/// producing the malformed shape the store must filter out.
pub fn registration_payload(id: &str, status: &str, age: u8, valid: bool) -> Value {
    let student = json!({
        "id": id,
        "parentId": format!("p-{id}"),
        "firstName": format!("Student{id}"),
        "lastName": "Test",
        "dateOfBirth": "2018-03-01T00:00:00Z",
        "age": age,
        "classId": null,
        "registrationStatus": status,
        "createdAt": "2026-01-10T09:00:00Z",
        "updatedAt": "2026-01-10T09:00:00Z"
    });
    let parent = json!({
        "id": format!("p-{id}"),
        "fatherFirstName": "Omar",
        "fatherLastName": "Khan",
        "fatherPhone": "+15550100",
        "fatherEmail": "omar@example.com"
    });
    if valid {
        json!({"student": student, "parent": parent})
    } else {
        json!({"parent": parent})
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            role: "super_admin".to_string(),
            token: None,
            profile_hits: 0,
            profile_transient_failures: 0,
            fail_mutations_with: None,
            list_delay_ms: HashMap::new(),
            classes: vec![
                class_payload("c1", "Qaida Starters", 4, 6),
                class_payload("c2", "Hifz Beginners", 7, 9),
                class_payload("c3", "Tajweed Seniors", 10, 12),
            ],
            teachers: vec![teacher_payload("t1"), teacher_payload("t2")],
            registrations: vec![
                registration_payload("s1", "pending", 8, true),
                registration_payload("s2", "approved", 6, true),
                registration_payload("s3", "pending", 11, true),
            ],
            next_id: 100,
        }
    }
}

impl BackendState {
    fn issue_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

fn ok(data: Value) -> Response {
    Json(json!({"success": true, "data": data})).into_response()
}

fn ok_paginated(data: Value, page: i64, limit: i64, total: i64) -> Response {
    let pages = if total == 0 { 1 } else { (total + limit - 1) / limit };
    Json(json!({
        "success": true,
        "data": data,
        "pagination": {"page": page, "limit": limit, "total": total, "pages": pages}
    }))
    .into_response()
}

fn fail(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({"success": false, "error": error}))).into_response()
}

fn unauthorized() -> Response {
    fail(StatusCode::UNAUTHORIZED, "Unauthorized")
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn authorized(state: &BackendState, headers: &HeaderMap) -> bool {
    match (&state.token, bearer(headers)) {
        (Some(expected), Some(presented)) => expected == presented,
        _ => false,
    }
}

/// Checks the mutation kill switch shared by every write endpoint.
fn mutation_failure(state: &BackendState) -> Option<Response> {
    state
        .fail_mutations_with
        .as_ref()
        .map(|error| fail(StatusCode::INTERNAL_SERVER_ERROR, error))
}

async fn login(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let mut state = state.lock().unwrap();
    if email == VALID_EMAIL && password == VALID_PASSWORD {
        state.token = Some(ISSUED_TOKEN.to_string());
        let admin = admin_payload(&state.role);
        ok(json!({"admin": admin, "token": ISSUED_TOKEN}))
    } else {
        fail(StatusCode::BAD_REQUEST, "Invalid email or password")
    }
}

async fn get_profile(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.profile_hits += 1;
    if state.profile_transient_failures > 0 {
        state.profile_transient_failures -= 1;
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    ok(admin_payload(&state.role))
}

async fn update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let mut admin = admin_payload(&state.role);
    if let Some(username) = body.get("username") {
        admin["username"] = username.clone();
    }
    if let Some(email) = body.get("email") {
        admin["email"] = email.clone();
    }
    ok(admin)
}

async fn list_classes(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    let age: Option<u8> = params.get("age").and_then(|value| value.parse().ok());
    let classes: Vec<Value> = state
        .classes
        .iter()
        .filter(|class| match age {
            Some(age) => {
                let min = class["ageMin"].as_u64().unwrap_or(0) as u8;
                let max = class["ageMax"].as_u64().unwrap_or(0) as u8;
                min <= age && age <= max
            }
            None => true,
        })
        .cloned()
        .collect();
    ok(Value::Array(classes))
}

async fn create_class(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let id = format!("c{}", state.issue_id());
    let max_students = body["maxStudents"].as_u64().unwrap_or(15);
    let mut class = body;
    class["id"] = json!(id);
    class["currentStudents"] = json!(0);
    class["availableSpots"] = json!(max_students);
    class["isFull"] = json!(false);
    state.classes.push(class.clone());
    ok(class)
}

async fn get_class(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state.classes.iter().find(|class| class["id"] == json!(id)) {
        Some(class) => ok(class.clone()),
        None => fail(StatusCode::NOT_FOUND, "Class not found"),
    }
}

async fn update_class(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let Some(class) = state
        .classes
        .iter_mut()
        .find(|class| class["id"] == json!(id))
    else {
        return fail(StatusCode::NOT_FOUND, "Class not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            class[key] = value.clone();
        }
    }
    ok(class.clone())
}

async fn delete_class(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    state.classes.retain(|class| class["id"] != json!(id));
    ok(Value::Null)
}

async fn list_teachers(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    ok(Value::Array(state.teachers.clone()))
}

async fn create_teacher(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let id = format!("t{}", state.issue_id());
    let mut teacher = body;
    teacher["id"] = json!(id);
    teacher["classCount"] = json!(0);
    state.teachers.push(teacher.clone());
    ok(teacher)
}

async fn get_teacher(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state
        .teachers
        .iter()
        .find(|teacher| teacher["id"] == json!(id))
    {
        Some(teacher) => ok(teacher.clone()),
        None => fail(StatusCode::NOT_FOUND, "Teacher not found"),
    }
}

async fn update_teacher(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let Some(teacher) = state
        .teachers
        .iter_mut()
        .find(|teacher| teacher["id"] == json!(id))
    else {
        return fail(StatusCode::NOT_FOUND, "Teacher not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            teacher[key] = value.clone();
        }
    }
    ok(teacher.clone())
}

async fn delete_teacher(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    state.teachers.retain(|teacher| teacher["id"] != json!(id));
    ok(Value::Null)
}

async fn list_registrations(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let status = params.get("status").cloned();
    let delay = {
        let state = state.lock().unwrap();
        if !authorized(&state, &headers) {
            return unauthorized();
        }
        status
            .as_ref()
            .and_then(|status| state.list_delay_ms.get(status).copied())
    };
    if let Some(millis) = delay {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    let state = state.lock().unwrap();
    let rows: Vec<Value> = state
        .registrations
        .iter()
        .filter(|row| match &status {
            Some(status) => row["student"]["registrationStatus"] == json!(status),
            None => true,
        })
        .cloned()
        .collect();

    let page: i64 = params
        .get("page")
        .and_then(|value| value.parse().ok())
        .unwrap_or(1)
        .max(1);
    // Small page cap so aggregation tests exercise multi-page walks.
    let limit: i64 = params
        .get("limit")
        .and_then(|value| value.parse().ok())
        .unwrap_or(10)
        .clamp(1, 10);
    let total = rows.len() as i64;
    let start = ((page - 1) * limit) as usize;
    let slice: Vec<Value> = rows.into_iter().skip(start).take(limit as usize).collect();
    ok_paginated(Value::Array(slice), page, limit, total)
}

async fn create_registration(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let id = state.issue_id();
    let student_id = format!("s{id}");
    let parent_id = format!("p{id}");
    let date = body["student"]["dateOfBirth"].as_str().unwrap_or("2018-01-01");
    let row = json!({
        "student": {
            "id": student_id,
            "parentId": parent_id,
            "firstName": body["student"]["firstName"],
            "lastName": body["student"]["lastName"],
            "dateOfBirth": format!("{date}T00:00:00Z"),
            "age": 7,
            "classId": body["student"]["classId"],
            "registrationStatus": "pending",
            "createdAt": "2026-02-01T09:00:00Z",
            "updatedAt": "2026-02-01T09:00:00Z"
        },
        "parent": {
            "id": parent_id,
            "fatherFirstName": body["parent"]["fatherFirstName"],
            "fatherLastName": body["parent"]["fatherLastName"],
            "fatherPhone": body["parent"]["fatherPhone"],
            "fatherEmail": body["parent"]["fatherEmail"]
        }
    });
    state.registrations.push(row);
    ok(json!({"studentId": student_id, "parentId": parent_id}))
}

async fn get_registration(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    // A well-known id that answers with a row missing its student relation,
    // for exercising the malformed-row path on point lookups.
    if id == "malformed" {
        return ok(registration_payload("zz", "pending", 8, false));
    }
    match state
        .registrations
        .iter()
        .find(|row| row["student"]["id"] == json!(id))
    {
        Some(row) => ok(row.clone()),
        None => fail(StatusCode::NOT_FOUND, "Registration not found"),
    }
}

async fn update_registration_status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let Some(row) = state
        .registrations
        .iter_mut()
        .find(|row| row["student"]["id"] == json!(id))
    else {
        return fail(StatusCode::NOT_FOUND, "Registration not found");
    };
    row["student"]["registrationStatus"] = body["status"].clone();
    ok(Value::Null)
}

async fn update_registration_class(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    if let Some(response) = mutation_failure(&state) {
        return response;
    }
    let Some(row) = state
        .registrations
        .iter_mut()
        .find(|row| row["student"]["id"] == json!(id))
    else {
        return fail(StatusCode::NOT_FOUND, "Registration not found");
    };
    row["student"]["classId"] = body["classId"].clone();
    ok(Value::Null)
}

fn router(state: SharedState) -> axum::Router {
    let api = axum::Router::new()
        .route("/auth/login", post(login))
        .route("/auth/profile", get(get_profile).put(update_profile))
        .route("/registrations", get(list_registrations).post(create_registration))
        .route("/registrations/{id}", get(get_registration))
        .route("/registrations/{id}/status", patch(update_registration_status))
        .route("/registrations/{id}/class", patch(update_registration_class))
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        );
    axum::Router::new().nest("/api", api).with_state(state)
}

/// A wired console context plus handles to the backend fixture.
pub struct TestApp {
    pub ctx: AppContext,
    pub backend: SharedState,
    pub base_url: String,
    pub state_dir: TempDir,
}

impl TestApp {
    /// Builds a second context over the same state directory and backend,
    /// simulating a fresh process observing the persisted session.
    pub fn reopen(&self) -> AppContext {
        AppContext::with_config(
            test_api_config(&self.base_url),
            StorageConfig::new(self.state_dir.path()),
            Environment::Development,
        )
        .unwrap()
    }
}

fn test_api_config(base_url: &str) -> ApiConfig {
    let mut config = ApiConfig::default().with_base_url(base_url);
    // Keep retries fast; count and semantics stay the defaults.
    config.profile_retry_delay = Duration::from_millis(20);
    config
}

pub async fn spawn_backend(state: SharedState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub async fn test_app() -> TestApp {
    test_app_with(BackendState::default()).await
}

pub async fn test_app_with(backend: BackendState) -> TestApp {
    let backend = Arc::new(Mutex::new(backend));
    let base_url = spawn_backend(backend.clone()).await;
    let state_dir = TempDir::new().unwrap();
    let ctx = AppContext::with_config(
        test_api_config(&base_url),
        StorageConfig::new(state_dir.path()),
        Environment::Development,
    )
    .unwrap();
    TestApp {
        ctx,
        backend,
        base_url,
        state_dir,
    }
}
