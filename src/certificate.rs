use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::{app::AppState, identity, site};

const TEMPLATE: &str = include_str!("./static/certificate.html");

const DOWNLOAD_FAILED_MESSAGE: &str = "Could not generate your certificate. Please try again.";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Deserialize)]
pub struct CertificateQuery {
    /// Fresh-submission marker set by the feedback redirect. Its presence
    /// triggers the one-shot certificate email dispatch.
    #[serde(default)]
    pub new: Option<String>,

    #[serde(default)]
    pub download_failed: Option<String>,
}

/// Serve the certificate page.
///
/// When the navigation carries the fresh-submission marker, the certificate
/// email is dispatched as a detached task: its failure is logged and never
/// shown, and rendering does not wait for it.
pub async fn show(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(query): Query<CertificateQuery>,
) -> Response {
    let Some(identity) = identity::load(&jar) else {
        return Redirect::to("/").into_response();
    };

    if query.new.as_deref() == Some("true") {
        let backend = state.backend.clone();
        let email = identity.email.clone();
        tokio::spawn(async move {
            if let Err(error) = backend.send_certificate(&email).await {
                warn!(%email, %error, "certificate email dispatch failed");
            }
        });
    }

    let error = query
        .download_failed
        .as_deref()
        .filter(|flag| *flag == "true")
        .map(|_| DOWNLOAD_FAILED_MESSAGE);

    Html(render(&identity.name, error)).into_response()
}

/// Generate and stream the certificate document.
///
/// The response is served as an attachment named after the attendee. On
/// failure the attendee lands back on the certificate page with an inline
/// message and can simply try again.
pub async fn download(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(identity) = identity::load(&jar) else {
        return Redirect::to("/").into_response();
    };

    match state.backend.generate_certificate(&identity.email).await {
        Ok(document) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/pdf")
            .header(
                header::CONTENT_DISPOSITION,
                format!(
                    "attachment; filename=\"{}\"",
                    certificate_filename(&identity.name)
                ),
            )
            .body(Body::from(document))
            .unwrap(),
        Err(error) => {
            warn!(email = %identity.email, %error, "certificate download failed");
            Redirect::to("/certificate?download_failed=true").into_response()
        }
    }
}

/// Attachment filename for a certificate: whitespace runs in the name
/// become underscores, and anything unsafe for a header value is dropped.
pub fn certificate_filename(name: &str) -> String {
    let collapsed = WHITESPACE.replace_all(name.trim(), "_");
    let safe: String = collapsed
        .chars()
        .filter(|c| c.is_ascii_graphic() && *c != '"')
        .collect();
    format!("Certificate_{safe}.pdf")
}

fn render(name: &str, error: Option<&str>) -> String {
    TEMPLATE
        .replace("{{error_block}}", &site::error_block(error))
        .replace("{{name}}", &site::escape_html(name))
        .replace("{{year}}", &site::year())
}
