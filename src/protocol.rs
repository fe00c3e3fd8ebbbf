//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::banks::exercise_config;
use crate::domain::{ExerciseId, ExerciseType, GeneratedQuestion};
use crate::scoring::{level_info, Progress, Tally};
use crate::state::Session;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    NewSession,
    GenerateExercise {
        #[serde(rename = "sessionId")]
        session_id: Option<String>,
        exercise: ExerciseId,
        count: Option<usize>,
    },
    SubmitAnswers {
        #[serde(rename = "sessionId")]
        session_id: String,
        exercise: ExerciseId,
        answers: Vec<Option<String>>,
    },
    Progress {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Feedback {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    TutorMessage {
        text: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session { session: SessionOut },
    Exercise { exercise: ExerciseOut },
    SubmitResult { result: SubmitOut },
    Progress { progress: ProgressOut },
    Feedback { text: String },
    TutorReply { text: String },
    Error { message: String },
}

/// Per-item DTO. The correct answer is deliberately absent; it is revealed
/// per item in the submit result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub sentence: Option<String>,
    pub verb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffled_words: Option<Vec<String>>,
}

pub fn to_question_out(q: &GeneratedQuestion) -> QuestionOut {
    QuestionOut {
        sentence: q.sentence.clone(),
        verb: q.verb.clone(),
        options: q.options.clone(),
        shuffled_words: q.shuffled_words.clone(),
    }
}

/// A generated batch plus its exercise metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseOut {
    pub exercise: ExerciseId,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub questions: Vec<QuestionOut>,
}

pub fn to_exercise_out(exercise: ExerciseId, questions: &[GeneratedQuestion]) -> ExerciseOut {
    let cfg = exercise_config(exercise);
    ExerciseOut {
        exercise,
        title: cfg.title,
        description: cfg.description,
        exercise_type: cfg.exercise_type,
        questions: questions.iter().map(to_question_out).collect(),
    }
}

/// Per-item verdict in a submit result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemVerdictOut {
    pub correct: bool,
    pub expected: String,
    pub user_answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOut {
    pub correct_count: u32,
    pub total: u32,
    pub items: Vec<ItemVerdictOut>,
    pub progress: ProgressOut,
}

/// Progress DTO shared by several responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOut {
    pub level: u32,
    pub level_title: Option<&'static str>,
    pub total_correct: u32,
    pub scores: HashMap<ExerciseId, Tally>,
    pub unlocked_exercises: Vec<ExerciseId>,
}

pub fn to_progress_out(progress: &Progress) -> ProgressOut {
    ProgressOut {
        level: progress.level,
        level_title: level_info(progress.level).map(|l| l.title),
        total_correct: progress.total_correct,
        scores: progress.scores.clone(),
        unlocked_exercises: progress.unlocked_exercises().to_vec(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub session_id: String,
    pub progress: ProgressOut,
}

pub fn to_session_out(session: &Session) -> SessionOut {
    SessionOut {
        session_id: session.id.clone(),
        progress: to_progress_out(&session.progress),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub exercise: ExerciseId,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    pub count: Option<usize>,
}

#[derive(Deserialize)]
pub struct SubmitIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub exercise: ExerciseId,
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

#[derive(Deserialize)]
pub struct FeedbackIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
#[derive(Serialize)]
pub struct FeedbackOut {
    pub text: String,
}

#[derive(Deserialize)]
pub struct TutorIn {
    pub text: String,
}
#[derive(Serialize)]
pub struct TutorOut {
    pub text: String,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
