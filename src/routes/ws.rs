//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    info!(target: "ojala_backend", "WebSocket upgrade requested");
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    info!(target: "ojala_backend", "WebSocket connected");
    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(txt) => {
                // Parse, dispatch, serialize response.
                let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
                    Ok(incoming) => {
                        debug!(target: "ojala_backend", "WS received: {:?}", &incoming);
                        handle_client_ws(incoming, &state).await
                    }
                    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
                };

                let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
                    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
                });

                if let Err(e) = socket.send(Message::Text(out)).await {
                    error!(target: "ojala_backend", error = %e, "WS send error");
                    break;
                }
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    info!(target: "ojala_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
    match msg {
        ClientWsMessage::Ping => ServerWsMessage::Pong,

        ClientWsMessage::NewSession => {
            let session = state.create_session().await;
            tracing::info!(target: "drill", id = %session.id, "WS session created");
            ServerWsMessage::Session { session: to_session_out(&session) }
        }

        ClientWsMessage::GenerateExercise { session_id, exercise, count } => {
            let batch = generate_exercise(state, session_id.as_deref(), exercise, count).await;
            tracing::info!(target: "drill", ?exercise, items = batch.len(), "WS exercise served");
            ServerWsMessage::Exercise { exercise: to_exercise_out(exercise, &batch) }
        }

        ClientWsMessage::SubmitAnswers { session_id, exercise, answers } => {
            match submit_answers(state, &session_id, exercise, answers).await {
                Ok(result) => {
                    tracing::info!(target: "drill", %session_id, correct = result.correct_count, "WS submit graded");
                    ServerWsMessage::SubmitResult { result }
                }
                Err(message) => ServerWsMessage::Error { message },
            }
        }

        ClientWsMessage::Progress { session_id } => match state.get_session(&session_id).await {
            Some(session) => ServerWsMessage::Progress { progress: to_progress_out(&session.progress) },
            None => ServerWsMessage::Error { message: format!("Unknown sessionId: {}", session_id) },
        },

        ClientWsMessage::Feedback { session_id } => {
            match feedback_text(state, &session_id).await {
                Ok(text) => ServerWsMessage::Feedback { text },
                Err(message) => ServerWsMessage::Error { message },
            }
        }

        ClientWsMessage::TutorMessage { text } => {
            let reply = tutor_reply_text(state, &text).await;
            ServerWsMessage::TutorReply { text: reply }
        }
    }
}
