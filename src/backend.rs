use std::collections::HashMap;

use axum::body::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Client for the remote feedback/certificate backend.
///
/// One method per endpoint, all sharing a single connection pool. There is
/// deliberately no retry, de-duplication, or explicit timeout configured:
/// every call maps to exactly one request, failures are reported to the
/// caller, and retries are the user's (manual) decision.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

/// Verification result for an attendee email.
#[derive(Debug, Deserialize)]
pub struct VerifiedAttendee {
    /// Display name registered for the email.
    pub name: String,

    /// Whether this attendee has already submitted feedback.
    pub has_submitted: bool,
}

/// Payload for a completed questionnaire.
#[derive(Debug, Serialize)]
pub struct FeedbackSubmission {
    pub email: String,

    /// Overall rating derived from the five answers.
    pub rating: u8,

    pub q1: u8,
    pub q2: u8,
    pub q3: u8,
    pub q4: u8,
    pub q5: u8,
}

/// One submitted feedback entry, as listed for the admin console.
#[derive(Debug, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub id: Option<i64>,

    pub name: String,
    pub email: String,
    pub rating: u8,
    pub q1_relevance: u8,
    pub q2_confidence: u8,
    pub q3_instructor: u8,
    pub q4_duration: u8,
    pub q5_satisfaction: u8,
}

/// Aggregate statistics for the admin dashboard.
#[derive(Debug, Deserialize)]
pub struct StatsSummary {
    pub total_feedback: u64,
    pub average_rating: f64,

    /// Count of submissions per overall rating (1-5). Missing keys mean no
    /// submissions with that rating.
    pub rating_counts: HashMap<u8, u64>,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Verify an attendee email and learn whether feedback was already
    /// submitted. A non-2xx response means the email is not registered.
    pub async fn verify_email(&self, email: &str) -> Result<VerifiedAttendee, BackendError> {
        let response = self
            .http
            .post(self.url("/verify-email"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        Ok(ensure_ok(response)?.json().await?)
    }

    /// Submit a completed questionnaire. The response body is ignored.
    pub async fn submit_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.url("/feedback"))
            .json(submission)
            .send()
            .await?;

        ensure_ok(response)?;
        Ok(())
    }

    /// Ask the backend to email the attendee their certificate.
    pub async fn send_certificate(&self, email: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.url("/send-certificate"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        ensure_ok(response)?;
        Ok(())
    }

    /// Generate the attendee's certificate and return the document bytes.
    pub async fn generate_certificate(&self, email: &str) -> Result<Bytes, BackendError> {
        let response = self
            .http
            .post(self.url("/generate-certificate"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        Ok(ensure_ok(response)?.bytes().await?)
    }

    /// Check admin credentials. A 2xx response marks success; the body is
    /// ignored.
    pub async fn admin_login(&self, username: &str, password: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.url("/admin/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        ensure_ok(response)?;
        Ok(())
    }

    /// Fetch aggregate rating statistics.
    pub async fn fetch_stats(&self) -> Result<StatsSummary, BackendError> {
        let response = self.http.get(self.url("/admin/stats")).send().await?;

        Ok(ensure_ok(response)?.json().await?)
    }

    /// Fetch the full feedback list.
    pub async fn fetch_feedback(&self) -> Result<Vec<FeedbackRecord>, BackendError> {
        let response = self.http.get(self.url("/admin/feedback")).send().await?;

        Ok(ensure_ok(response)?.json().await?)
    }

    /// Delete one feedback entry, identified by email.
    pub async fn delete_feedback(&self, email: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.url(&format!(
                "/admin/feedback/{}",
                urlencoding::encode(email)
            )))
            .send()
            .await?;

        ensure_ok(response)?;
        Ok(())
    }
}

fn ensure_ok(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(BackendError::Rejected(response.status()))
    }
}
