#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use portal::{app, app::AppState, config::Config};

pub const STUB_PDF: &[u8] = b"%PDF-1.4 stub certificate";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "letmein";

/// In-process stand-in for the remote backend. Behavior is toggled per
/// test, and every mutating call is recorded for assertions.
#[derive(Default)]
pub struct StubBackend {
    /// `Some((name, has_submitted))` verifies any email; `None` rejects.
    pub attendee: Mutex<Option<(String, bool)>>,
    pub stats_fails: Mutex<bool>,
    pub feedback_list_fails: Mutex<bool>,
    pub generate_fails: Mutex<bool>,
    pub delete_fails: Mutex<bool>,
    pub records: Mutex<Vec<Value>>,
    pub feedback_bodies: Mutex<Vec<Value>>,
    pub certificate_sends: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn with_attendee(name: &str, has_submitted: bool) -> Arc<Self> {
        let stub = Arc::new(Self::default());
        *stub.attendee.lock().unwrap() = Some((name.to_string(), has_submitted));
        stub
    }
}

pub fn jane_record() -> Value {
    json!({
        "id": 1,
        "name": "Jane Doe",
        "email": "jane@example.com",
        "rating": 4,
        "q1_relevance": 4,
        "q2_confidence": 5,
        "q3_instructor": 4,
        "q4_duration": 3,
        "q5_satisfaction": 4
    })
}

async fn verify_email(State(stub): State<Arc<StubBackend>>, Json(_body): Json<Value>) -> Response {
    match stub.attendee.lock().unwrap().clone() {
        Some((name, has_submitted)) => {
            Json(json!({ "name": name, "has_submitted": has_submitted })).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create_feedback(
    State(stub): State<Arc<StubBackend>>,
    Json(body): Json<Value>,
) -> StatusCode {
    stub.feedback_bodies.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn send_certificate(
    State(stub): State<Arc<StubBackend>>,
    Json(body): Json<Value>,
) -> StatusCode {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    stub.certificate_sends.lock().unwrap().push(email);
    StatusCode::OK
}

async fn generate_certificate(
    State(stub): State<Arc<StubBackend>>,
    Json(_body): Json<Value>,
) -> Response {
    if *stub.generate_fails.lock().unwrap() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        STUB_PDF,
    )
        .into_response()
}

async fn admin_login_route(Json(body): Json<Value>) -> StatusCode {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username == ADMIN_USER && password == ADMIN_PASSWORD {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

async fn admin_stats(State(stub): State<Arc<StubBackend>>) -> Response {
    if *stub.stats_fails.lock().unwrap() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(json!({
        "total_feedback": 42,
        "average_rating": 4.2,
        "rating_counts": { "3": 4, "4": 10, "5": 28 }
    }))
    .into_response()
}

async fn admin_feedback(State(stub): State<Arc<StubBackend>>) -> Response {
    if *stub.feedback_list_fails.lock().unwrap() {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(Value::Array(stub.records.lock().unwrap().clone())).into_response()
}

async fn admin_delete(
    State(stub): State<Arc<StubBackend>>,
    Path(email): Path<String>,
) -> StatusCode {
    if *stub.delete_fails.lock().unwrap() {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    stub.deleted.lock().unwrap().push(email);
    StatusCode::OK
}

/// Serve the stub backend on an ephemeral loopback port.
pub async fn spawn_stub(stub: Arc<StubBackend>) -> SocketAddr {
    let router = Router::new()
        .route("/verify-email", post(verify_email))
        .route("/feedback", post(create_feedback))
        .route("/send-certificate", post(send_certificate))
        .route("/generate-certificate", post(generate_certificate))
        .route("/admin/login", post(admin_login_route))
        .route("/admin/stats", get(admin_stats))
        .route("/admin/feedback", get(admin_feedback))
        .route("/admin/feedback/:email", delete(admin_delete))
        .with_state(stub);

    serve_on_loopback(router).await
}

/// Serve the portal against the given backend address.
pub async fn spawn_portal(backend: SocketAddr) -> SocketAddr {
    let state = AppState::new(Config {
        port: 0,
        backend_url: format!("http://{backend}"),
    });

    serve_on_loopback(app::router(state)).await
}

/// A portal whose backend address refuses every connection.
pub async fn spawn_portal_with_dead_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    spawn_portal(dead).await
}

async fn serve_on_loopback(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// HTTP client that keeps cookies but never follows redirects, so tests
/// can assert on each hop.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap()
}

/// Run the verification step so the client carries identity cookies.
pub async fn verify_as(
    client: &reqwest::Client,
    portal: SocketAddr,
    email: &str,
) -> reqwest::Response {
    client
        .post(format!("http://{portal}/verify"))
        .form(&[("email", email)])
        .send()
        .await
        .unwrap()
}

/// Log the client into the admin console.
pub async fn admin_login(client: &reqwest::Client, portal: SocketAddr) {
    let response = client
        .post(format!("http://{portal}/admin/login"))
        .form(&[("username", ADMIN_USER), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
}
