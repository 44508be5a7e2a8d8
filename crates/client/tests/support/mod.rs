//! In-process mock of the PipeCraft backend: axum routes speaking the
//! `{ success, data, message }` envelope, with switchable failure modes and
//! call counters for the auth flow assertions.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use configs::{ApiConfig, AppConfig, CacheConfig};
use dashmap::DashMap;
use serde_json::{json, Value};

#[derive(Default)]
pub struct BackendState {
    pub contacts: DashMap<String, Value>,
    pub careers: DashMap<String, Value>,
    pub projects: DashMap<String, Value>,
    pub services: DashMap<String, Value>,
    pub applications: DashMap<String, Value>,
    /// Team members, keyed by userId; seeded with the session admin.
    pub users: DashMap<String, Value>,
    /// When set, collection GETs answer 500.
    pub fail_lists: AtomicBool,
    /// Whether the session cookie would currently pass validation.
    pub session_valid: AtomicBool,
    /// Whether `/users/refresh-token` succeeds.
    pub refresh_ok: AtomicBool,
    pub me_calls: AtomicU32,
    pub refresh_calls: AtomicU32,
}

pub struct MockBackend {
    pub state: Arc<BackendState>,
    pub addr: SocketAddr,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        state.refresh_ok.store(true, Ordering::SeqCst);
        state.users.insert("u-1".to_string(), sample_user());

        let app = Router::new()
            .route("/api/contacts", get(list_contacts).post(create_contact))
            .route(
                "/api/contacts/:id",
                put(update_contact).delete(delete_contact),
            )
            .route("/api/careers", get(list_careers).post(create_career))
            .route("/api/careers/:id", put(update_career).delete(delete_career))
            .route("/api/projects", get(list_projects).post(create_project))
            .route("/api/projects/:id", put(update_project))
            .route("/api/services", get(list_services).post(create_service))
            .route(
                "/api/applications",
                get(list_applications).post(create_application),
            )
            .route(
                "/api/applications/:id",
                axum::routing::delete(delete_application),
            )
            .route("/api/applications/career/:id", get(list_career_applications))
            .route("/api/users/login", post(login))
            .route("/api/users/logout", get(logout))
            .route("/api/users/me", get(me))
            .route("/api/users/refresh-token", post(refresh_token))
            .route("/api/users/register", post(register_user))
            .route("/api/users/users", get(list_users))
            .route("/api/users/users/:id", put(update_user))
            .route("/api/users/change-password", post(change_password))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self { state, addr }
    }

    /// Client config pointed at this backend, with the mirror cache rooted
    /// in a unique temp dir.
    pub fn config(&self) -> AppConfig {
        self.config_with_cache_dir(
            std::env::temp_dir()
                .join(format!("pipecraft_test_{}", uuid::Uuid::new_v4()))
                .display()
                .to_string(),
        )
    }

    pub fn config_with_cache_dir(&self, dir: String) -> AppConfig {
        AppConfig {
            api: ApiConfig {
                base_url: format!("http://{}/api", self.addr),
                timeout_secs: 5,
            },
            cache: CacheConfig { dir, enabled: true },
        }
    }
}

fn ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

fn sample_user() -> Value {
    json!({
        "userId": "u-1",
        "name": "Admin",
        "email": "admin@pipecraft.example",
        "role": "admin"
    })
}

/// The session always belongs to u-1; serve its current record so profile
/// updates show up on the next whoami.
fn current_user(state: &BackendState) -> Value {
    state
        .users
        .get("u-1")
        .map(|e| e.value().clone())
        .unwrap_or_else(sample_user)
}

async fn list_contacts(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_lists.load(Ordering::SeqCst) {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let items: Vec<Value> = state.contacts.iter().map(|e| e.value().clone()).collect();
    ok(Value::Array(items))
}

async fn create_contact(
    State(state): State<Arc<BackendState>>,
    Json(mut body): Json<Value>,
) -> Response {
    let id = format!("c-{}", uuid::Uuid::new_v4());
    body["contactId"] = json!(id);
    body["createdAt"] = json!(chrono::Utc::now().to_rfc3339());
    state.contacts.insert(id, body.clone());
    ok(body)
}

async fn update_contact(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Some(mut existing) = state.contacts.get(&id).map(|e| e.value().clone()) else {
        return fail(StatusCode::NOT_FOUND, "contact not found");
    };
    merge(&mut existing, body);
    state.contacts.insert(id, existing.clone());
    ok(existing)
}

async fn delete_contact(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Response {
    if state.contacts.remove(&id).is_none() {
        return fail(StatusCode::NOT_FOUND, "contact not found");
    }
    ok(Value::Null)
}

async fn list_careers(State(state): State<Arc<BackendState>>) -> Response {
    if state.fail_lists.load(Ordering::SeqCst) {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let items: Vec<Value> = state.careers.iter().map(|e| e.value().clone()).collect();
    ok(Value::Array(items))
}

async fn create_career(
    State(state): State<Arc<BackendState>>,
    Json(mut body): Json<Value>,
) -> Response {
    let id = format!("career-{}", uuid::Uuid::new_v4());
    body["careerId"] = json!(id);
    state.careers.insert(id, body.clone());
    ok(body)
}

async fn update_career(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Some(mut existing) = state.careers.get(&id).map(|e| e.value().clone()) else {
        return fail(StatusCode::NOT_FOUND, "job posting not found");
    };
    merge(&mut existing, body);
    state.careers.insert(id, existing.clone());
    ok(existing)
}

async fn delete_career(State(state): State<Arc<BackendState>>, Path(id): Path<String>) -> Response {
    if state.careers.remove(&id).is_none() {
        return fail(StatusCode::NOT_FOUND, "job posting not found");
    }
    ok(Value::Null)
}

/// Split a multipart body into its text fields and the names of any
/// uploaded files. Ages are numeric on the wire.
async fn read_multipart(mut multipart: Multipart) -> (Value, Vec<(String, String)>) {
    let mut fields = json!({});
    let mut files = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if let Some(file_name) = field.file_name().map(str::to_string) {
            files.push((name, file_name));
        } else if let Ok(value) = field.text().await {
            if name == "age" {
                if let Ok(age) = value.parse::<u64>() {
                    fields["age"] = json!(age);
                }
            } else {
                fields[name.as_str()] = json!(value);
            }
        }
    }
    (fields, files)
}

fn file_link(file_name: &str) -> Value {
    json!(format!("https://files.example/{file_name}"))
}

async fn list_projects(State(state): State<Arc<BackendState>>) -> Response {
    let items: Vec<Value> = state.projects.iter().map(|e| e.value().clone()).collect();
    ok(Value::Array(items))
}

async fn create_project(State(state): State<Arc<BackendState>>, multipart: Multipart) -> Response {
    let (mut record, files) = read_multipart(multipart).await;
    for (field, file_name) in files {
        if field == "image" {
            record["image"] = file_link(&file_name);
        }
    }
    let id = format!("p-{}", uuid::Uuid::new_v4());
    record["projectId"] = json!(id);
    state.projects.insert(id, record.clone());
    ok(record)
}

async fn update_project(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let Some(mut existing) = state.projects.get(&id).map(|e| e.value().clone()) else {
        return fail(StatusCode::NOT_FOUND, "project not found");
    };
    let (patch, files) = read_multipart(multipart).await;
    merge(&mut existing, patch);
    for (field, file_name) in files {
        if field == "image" {
            existing["image"] = file_link(&file_name);
        }
    }
    state.projects.insert(id, existing.clone());
    ok(existing)
}

async fn list_services(State(state): State<Arc<BackendState>>) -> Response {
    let items: Vec<Value> = state.services.iter().map(|e| e.value().clone()).collect();
    ok(Value::Array(items))
}

async fn create_service(
    State(state): State<Arc<BackendState>>,
    Json(mut body): Json<Value>,
) -> Response {
    let id = format!("s-{}", uuid::Uuid::new_v4());
    body["serviceId"] = json!(id);
    state.services.insert(id, body.clone());
    ok(body)
}

async fn register_user(State(state): State<Arc<BackendState>>, multipart: Multipart) -> Response {
    let (mut record, files) = read_multipart(multipart).await;
    if let Some(fields) = record.as_object_mut() {
        fields.remove("password");
    }
    for (field, file_name) in files {
        if field == "avatar" {
            record["avatar"] = file_link(&file_name);
        }
    }
    let id = format!("u-{}", uuid::Uuid::new_v4());
    record["userId"] = json!(id);
    state.users.insert(id, record.clone());
    ok(record)
}

async fn list_users(State(state): State<Arc<BackendState>>) -> Response {
    let items: Vec<Value> = state.users.iter().map(|e| e.value().clone()).collect();
    ok(Value::Array(items))
}

async fn update_user(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let Some(mut existing) = state.users.get(&id).map(|e| e.value().clone()) else {
        return fail(StatusCode::NOT_FOUND, "user not found");
    };
    let (patch, files) = read_multipart(multipart).await;
    merge(&mut existing, patch);
    for (field, file_name) in files {
        if field == "avatar" {
            existing["avatar"] = file_link(&file_name);
        }
    }
    state.users.insert(id, existing.clone());
    ok(existing)
}

async fn change_password(
    State(_state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Response {
    if body["currentPassword"] == json!("secret123") {
        ok(Value::Null)
    } else {
        fail(StatusCode::BAD_REQUEST, "current password is incorrect")
    }
}

async fn list_applications(State(state): State<Arc<BackendState>>) -> Response {
    let items: Vec<Value> = state
        .applications
        .iter()
        .map(|e| e.value().clone())
        .collect();
    ok(Value::Array(items))
}

/// The apply form posts multipart: text fields plus the résumé file, which
/// the real backend stores and exposes as `resumeLink`.
async fn create_application(
    State(state): State<Arc<BackendState>>,
    mut multipart: Multipart,
) -> Response {
    let mut record = json!({});
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if name == "resume" {
            let file_name = field.file_name().unwrap_or("resume").to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            if bytes.is_empty() {
                return fail(StatusCode::BAD_REQUEST, "resume is required");
            }
            record["resumeLink"] = json!(format!("https://files.example/{file_name}"));
        } else if let Ok(value) = field.text().await {
            record[name] = json!(value);
        }
    }
    let id = format!("app-{}", uuid::Uuid::new_v4());
    record["applicationId"] = json!(id);
    record["appliedAt"] = json!(chrono::Utc::now().to_rfc3339());
    state.applications.insert(id, record.clone());
    ok(record)
}

async fn list_career_applications(
    State(state): State<Arc<BackendState>>,
    Path(career_id): Path<String>,
) -> Response {
    let items: Vec<Value> = state
        .applications
        .iter()
        .filter(|e| e.value()["careerId"] == json!(career_id))
        .map(|e| e.value().clone())
        .collect();
    ok(Value::Array(items))
}

async fn delete_application(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<String>,
) -> Response {
    if state.applications.remove(&id).is_none() {
        return fail(StatusCode::NOT_FOUND, "application not found");
    }
    ok(Value::Null)
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    if body["password"] == json!("secret123") {
        state.session_valid.store(true, Ordering::SeqCst);
        ok(json!({ "user": current_user(&state) }))
    } else {
        fail(StatusCode::UNAUTHORIZED, "invalid email or password")
    }
}

async fn logout(State(state): State<Arc<BackendState>>) -> Response {
    state.session_valid.store(false, Ordering::SeqCst);
    ok(Value::Null)
}

async fn me(State(state): State<Arc<BackendState>>) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    if state.session_valid.load(Ordering::SeqCst) {
        ok(json!({ "user": current_user(&state) }))
    } else {
        fail(StatusCode::UNAUTHORIZED, "jwt expired")
    }
}

async fn refresh_token(State(state): State<Arc<BackendState>>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if state.refresh_ok.load(Ordering::SeqCst) {
        state.session_valid.store(true, Ordering::SeqCst);
        ok(Value::Null)
    } else {
        fail(StatusCode::UNAUTHORIZED, "refresh token expired")
    }
}

fn merge(target: &mut Value, patch: Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (key, value) in patch {
            target.insert(key, value);
        }
    }
}
