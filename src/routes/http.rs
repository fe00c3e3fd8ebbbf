//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; logs include parameters and basic result info.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::{info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

fn not_found(message: String) -> axum::response::Response {
    (StatusCode::NOT_FOUND, Json(ErrorOut { message })).into_response()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.create_session().await;
    info!(target: "drill", id = %session.id, "HTTP session created");
    Json(to_session_out(&session))
}

#[instrument(level = "info", skip(state), fields(exercise = ?q.exercise, session = ?q.session_id))]
pub async fn http_get_exercise(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ExerciseQuery>,
) -> impl IntoResponse {
    let batch = generate_exercise(&state, q.session_id.as_deref(), q.exercise, q.count).await;
    info!(target: "drill", exercise = ?q.exercise, items = batch.len(), "HTTP exercise served");
    Json(to_exercise_out(q.exercise, &batch))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, exercise = ?body.exercise, answers = body.answers.len()))]
pub async fn http_post_submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SubmitIn>,
) -> axum::response::Response {
    match submit_answers(&state, &body.session_id, body.exercise, body.answers).await {
        Ok(out) => {
            info!(target: "drill", session = %body.session_id, correct = out.correct_count, total = out.total, "HTTP submit graded");
            Json(out).into_response()
        }
        Err(message) => not_found(message),
    }
}

#[instrument(level = "info", skip(state), fields(%q.session_id))]
pub async fn http_get_progress(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProgressQuery>,
) -> axum::response::Response {
    match state.get_session(&q.session_id).await {
        Some(session) => Json(to_progress_out(&session.progress)).into_response(),
        None => not_found(format!("Unknown sessionId: {}", q.session_id)),
    }
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_post_feedback(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FeedbackIn>,
) -> axum::response::Response {
    match feedback_text(&state, &body.session_id).await {
        Ok(text) => Json(FeedbackOut { text }).into_response(),
        Err(message) => not_found(message),
    }
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_tutor(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TutorIn>,
) -> impl IntoResponse {
    let text = tutor_reply_text(&state, &body.text).await;
    Json(TutorOut { text })
}
