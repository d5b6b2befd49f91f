use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    app::AppState,
    backend::FeedbackRecord,
    chart,
    error::{AppError, BackendError},
    site,
};

const LOGIN_TEMPLATE: &str = include_str!("./static/admin_login.html");
const DASHBOARD_TEMPLATE: &str = include_str!("./static/admin_dashboard.html");
const KPI_TEMPLATE: &str = include_str!("./static/admin_kpi.html");

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const CONNECTION_FAILED_MESSAGE: &str = "Connection failed";

const SESSION_COOKIE: &str = "admin_session";
const SESSION_DURATION_SECS: u64 = 60 * 60; // 1 hour

/// An authenticated console session.
///
/// Sessions live only in process memory behind a browser-session cookie:
/// nothing is persisted, so a server or browser restart returns staff to
/// the login screen. This gates the console pages of this portal only; the
/// backend's admin endpoints carry no authentication of their own, so this
/// is not a security boundary.
#[derive(Debug, Clone)]
struct AdminSession {
    expires_at: SystemTime,
}

lazy_static! {
    static ref SESSIONS: RwLock<HashMap<String, AdminSession>> = RwLock::new(HashMap::new());
}

fn create_session() -> String {
    let session_id = Uuid::new_v4().to_string();
    let expires_at = SystemTime::now() + Duration::from_secs(SESSION_DURATION_SECS);

    let mut sessions = SESSIONS.write().unwrap();
    sessions.insert(session_id.clone(), AdminSession { expires_at });

    session_id
}

fn session_is_valid(session_id: &str) -> bool {
    let sessions = SESSIONS.read().unwrap();

    sessions
        .get(session_id)
        .map(|session| session.expires_at > SystemTime::now())
        .unwrap_or(false)
}

fn drop_session(session_id: &str) {
    let mut sessions = SESSIONS.write().unwrap();
    sessions.remove(session_id);
}

fn authenticated(jar: &CookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .map(|cookie| session_is_valid(cookie.value()))
        .unwrap_or(false)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub alert: Option<String>,
}

/// Serve the console login page.
pub async fn login_page() -> Html<String> {
    Html(render_login(None))
}

/// Check credentials against the backend and open a console session.
///
/// Rejected credentials and an unreachable backend each get their own
/// inline message, and neither creates a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.backend.admin_login(&form.username, &form.password).await {
        Ok(()) => {
            let mut cookie = Cookie::new(SESSION_COOKIE, create_session());
            cookie.set_path("/admin");
            (jar.add(cookie), Redirect::to("/admin/dashboard")).into_response()
        }
        Err(BackendError::Rejected(_)) => {
            Html(render_login(Some(INVALID_CREDENTIALS_MESSAGE))).into_response()
        }
        Err(error @ BackendError::Unreachable(_)) => {
            warn!(%error, "admin login call failed");
            Html(render_login(Some(CONNECTION_FAILED_MESSAGE))).into_response()
        }
    }
}

/// Close the session and return to the login page. No backend call is made.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        drop_session(cookie.value());
    }

    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/admin");

    (jar.add(cookie), Redirect::to("/admin"))
}

/// Render the dashboard: KPI cards, rating chart, and the feedback table.
///
/// The statistics and the feedback list are fetched concurrently with no
/// ordering between them, and each result is applied on its own - if one
/// fetch fails its section is omitted while the other still renders. The
/// refresh link simply re-requests this page, refetching both.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    if !authenticated(&jar) {
        return Redirect::to("/admin").into_response();
    }

    let (stats, records) = tokio::join!(
        state.backend.fetch_stats(),
        state.backend.fetch_feedback()
    );

    let kpi_section = match stats {
        Ok(stats) => KPI_TEMPLATE
            .replace("{{total_feedback}}", &stats.total_feedback.to_string())
            .replace("{{average_rating}}", &stats.average_rating.to_string()),
        Err(error) => {
            warn!(%error, "stats fetch failed");
            String::new()
        }
    };

    let records = match records {
        Ok(records) => records,
        Err(error) => {
            warn!(%error, "feedback list fetch failed");
            Vec::new()
        }
    };

    let alert_script = match query.alert.as_deref() {
        Some("delete_failed") => r#"<script>alert("Failed to delete");</script>"#,
        _ => "",
    };

    Html(
        DASHBOARD_TEMPLATE
            .replace("{{kpi_section}}", &kpi_section)
            .replace("{{table_rows}}", &render_rows(&records))
            .replace("{{alert_script}}", alert_script)
            .replace("{{year}}", &site::year()),
    )
    .into_response()
}

/// Serve the rating-distribution chart image for the dashboard.
pub async fn chart_png(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    if !authenticated(&jar) {
        return Ok(Redirect::to("/admin").into_response());
    }

    let stats = state.backend.fetch_stats().await?;
    let png = chart::render_distribution_png(&stats)
        .map_err(|error| AppError::Internal(Box::new(error)))?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .body(Body::from(png))
        .unwrap())
}

/// Delete one feedback entry and refetch the dashboard.
///
/// The row's form asks for confirmation (naming the email) before this is
/// ever reached. Success lands back on the dashboard, which refetches
/// everything; failure lands there too with a blocking alert flag.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(email): Path<String>,
) -> Response {
    if !authenticated(&jar) {
        return Redirect::to("/admin").into_response();
    }

    match state.backend.delete_feedback(&email).await {
        Ok(()) => Redirect::to("/admin/dashboard").into_response(),
        Err(error) => {
            warn!(%email, %error, "feedback deletion failed");
            Redirect::to("/admin/dashboard?alert=delete_failed").into_response()
        }
    }
}

fn render_login(error: Option<&str>) -> String {
    LOGIN_TEMPLATE
        .replace("{{error_block}}", &site::error_block(error))
        .replace("{{year}}", &site::year())
}

fn render_rows(records: &[FeedbackRecord]) -> String {
    if records.is_empty() {
        return r#"<tr><td colspan="8" class="empty">No feedback found.</td></tr>"#.to_string();
    }

    records
        .iter()
        .map(|record| {
            let badge = if record.rating >= 4 {
                "rating-high"
            } else if record.rating >= 3 {
                "rating-mid"
            } else {
                "rating-low"
            };

            format!(
                concat!(
                    "<tr>",
                    "<td>{name}<div class=\"sub\">{email}</div></td>",
                    "<td><span class=\"badge {badge}\">{rating} &#9733;</span></td>",
                    "<td>{q1}</td><td>{q2}</td><td>{q3}</td><td>{q4}</td><td>{q5}</td>",
                    "<td class=\"actions\">",
                    "<form method=\"post\" action=\"/admin/feedback/{email_path}/delete\" ",
                    "data-confirm-email=\"{email}\" ",
                    "onsubmit=\"return confirm('Are you sure you want to delete feedback from ' + this.dataset.confirmEmail + '?')\">",
                    "<button type=\"submit\" class=\"link-danger\">Delete</button>",
                    "</form></td></tr>"
                ),
                name = site::escape_html(&record.name),
                email = site::escape_html(&record.email),
                email_path = urlencoding::encode(&record.email),
                badge = badge,
                rating = record.rating,
                q1 = record.q1_relevance,
                q2 = record.q2_confidence,
                q3 = record.q3_instructor,
                q4 = record.q4_duration,
                q5 = record.q5_satisfaction,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
