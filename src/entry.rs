use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::warn;

use crate::{
    app::AppState,
    error::BackendError,
    identity::{self, Identity},
    site,
};

const TEMPLATE: &str = include_str!("./static/entry.html");

const NOT_FOUND_MESSAGE: &str = "Email not found. Please check and try again.";
const CONNECTION_MESSAGE: &str = "Connection error. Is backend running?";

#[derive(Debug, Deserialize)]
pub struct VerifyForm {
    pub email: String,
}

/// Serve the attendance verification page.
pub async fn show() -> Html<String> {
    Html(render("", None))
}

/// Verify the submitted email against the backend.
///
/// On success the identity is persisted and the attendee is routed by
/// submission status: straight to the certificate page when feedback
/// already exists, otherwise to the questionnaire. Rejection and transport
/// failure each re-render the form with their own message; nothing is
/// stored and no redirect happens in either case.
#[axum::debug_handler]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VerifyForm>,
) -> Response {
    match state.backend.verify_email(&form.email).await {
        Ok(attendee) => {
            let identity = Identity {
                email: form.email,
                name: attendee.name,
            };
            let jar = identity::store(jar, &identity);
            let destination = if attendee.has_submitted {
                "/certificate"
            } else {
                "/feedback"
            };
            (jar, Redirect::to(destination)).into_response()
        }
        Err(BackendError::Rejected(_)) => {
            Html(render(&form.email, Some(NOT_FOUND_MESSAGE))).into_response()
        }
        Err(error @ BackendError::Unreachable(_)) => {
            warn!(%error, "email verification call failed");
            Html(render(&form.email, Some(CONNECTION_MESSAGE))).into_response()
        }
    }
}

fn render(email: &str, error: Option<&str>) -> String {
    TEMPLATE
        .replace("{{error_block}}", &site::error_block(error))
        .replace("{{email}}", &site::escape_html(email))
        .replace("{{year}}", &site::year())
}
