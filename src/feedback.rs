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
    backend::FeedbackSubmission,
    identity,
    rating::{self, QuestionnaireAnswers},
    site,
};

const TEMPLATE: &str = include_str!("./static/feedback.html");

const INCOMPLETE_MESSAGE: &str = "Please answer all questions before submitting.";
const SUBMIT_FAILED_MESSAGE: &str = "Error occurred. Please try again.";

/// Raw questionnaire form values. Unanswered questions arrive as 0.
#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub q1: u8,
    #[serde(default)]
    pub q2: u8,
    #[serde(default)]
    pub q3: u8,
    #[serde(default)]
    pub q4: u8,
    #[serde(default)]
    pub q5: u8,
}

impl FeedbackForm {
    fn answers(&self) -> QuestionnaireAnswers {
        QuestionnaireAnswers::from_raw([self.q1, self.q2, self.q3, self.q4, self.q5])
    }
}

/// Serve the questionnaire. Attendees without a verified identity are sent
/// back to the entry page before anything else happens.
pub async fn show(jar: CookieJar) -> Response {
    if identity::load(&jar).is_none() {
        return Redirect::to("/").into_response();
    }

    Html(render(&QuestionnaireAnswers::default(), None)).into_response()
}

/// Validate and submit the questionnaire.
///
/// An unanswered question blocks submission before any request is sent; the
/// page re-renders with the selection preserved. A complete questionnaire
/// is submitted with its derived overall rating, then the attendee is sent
/// to the certificate page with the fresh-submission marker. Backend
/// failure re-renders the form for a manual retry.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<FeedbackForm>,
) -> Response {
    let Some(identity) = identity::load(&jar) else {
        return Redirect::to("/").into_response();
    };

    let answers = form.answers();
    let Some(complete) = answers.complete() else {
        return Html(render(&answers, Some(INCOMPLETE_MESSAGE))).into_response();
    };

    let submission = FeedbackSubmission {
        email: identity.email,
        rating: rating::overall_rating(complete).value(),
        q1: complete[0].value(),
        q2: complete[1].value(),
        q3: complete[2].value(),
        q4: complete[3].value(),
        q5: complete[4].value(),
    };

    match state.backend.submit_feedback(&submission).await {
        Ok(()) => Redirect::to("/certificate?new=true").into_response(),
        Err(error) => {
            warn!(%error, "feedback submission failed");
            Html(render(&answers, Some(SUBMIT_FAILED_MESSAGE))).into_response()
        }
    }
}

fn render(answers: &QuestionnaireAnswers, error: Option<&str>) -> String {
    let [q1, q2, q3, q4, q5] = answers.raw();
    TEMPLATE
        .replace("{{error_block}}", &site::error_block(error))
        .replace("{{q1}}", &q1.to_string())
        .replace("{{q2}}", &q2.to_string())
        .replace("{{q3}}", &q3.to_string())
        .replace("{{q4}}", &q4.to_string())
        .replace("{{q5}}", &q5.to_string())
        .replace("{{year}}", &site::year())
}
