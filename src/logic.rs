//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Generating drill batches (and remembering them per session)
//!   - Grading submissions and advancing session progress
//!   - AI feedback over accumulated errors (OpenAI or local fallback)
//!   - Tutor chat replies (OpenAI or local stub)

use tracing::{error, info, instrument};

use crate::banks::exercise_config;
use crate::domain::{Attempt, ExerciseId, GeneratedQuestion};
use crate::generator::generate_questions;
use crate::protocol::{to_progress_out, ItemVerdictOut, SubmitOut};
use crate::scoring::{apply_submission, NO_ANSWER};
use crate::state::AppState;
use crate::util::now_ms;

/// Batch size used when the client does not ask for a specific count.
pub const QUESTIONS_PER_EXERCISE: usize = 5;

const MAX_BATCH: usize = 10;

/// Errors sent to the AI per feedback request.
const MAX_ERRORS_FOR_FEEDBACK: usize = 10;

/// Generate a batch for an exercise. When a known session id is given, the
/// batch is remembered so a later submission can be graded against it.
#[instrument(level = "info", skip(state), fields(?exercise, count = ?count))]
pub async fn generate_exercise(
    state: &AppState,
    session_id: Option<&str>,
    exercise: ExerciseId,
    count: Option<usize>,
) -> Vec<GeneratedQuestion> {
    let cfg = exercise_config(exercise);
    let count = count.unwrap_or(QUESTIONS_PER_EXERCISE).clamp(1, MAX_BATCH);

    // thread_rng is not Send; keep it out of the await scope.
    let batch = {
        let mut rng = rand::thread_rng();
        generate_questions(
            &state.tables,
            &state.banks,
            cfg.pool,
            count,
            cfg.exercise_type,
            &mut rng,
        )
    };
    info!(target: "drill", ?exercise, pool = ?cfg.pool, generated = batch.len(), "Batch generated");

    if let Some(id) = session_id {
        state.store_batch(id, exercise, batch.clone()).await;
    }
    batch
}

/// Grade a submission against the session's remembered batch.
#[instrument(level = "info", skip(state, answers), fields(%session_id, ?exercise, answers = answers.len()))]
pub async fn submit_answers(
    state: &AppState,
    session_id: &str,
    exercise: ExerciseId,
    answers: Vec<Option<String>>,
) -> Result<SubmitOut, String> {
    let session = state
        .get_session(session_id)
        .await
        .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;
    let batch = session
        .batches
        .get(&exercise)
        .cloned()
        .ok_or_else(|| format!("No generated batch for {:?}; generate first.", exercise))?;

    let cfg = exercise_config(exercise);
    let (next, result) = apply_submission(
        &session.progress,
        exercise,
        cfg.exercise_type,
        &batch,
        &answers,
        now_ms(),
    );

    // The attempts appended by this submission, batch order.
    let items: Vec<ItemVerdictOut> = next.attempts[next.attempts.len() - batch.len()..]
        .iter()
        .map(|a| ItemVerdictOut {
            correct: a.is_correct,
            expected: a.correct_answer.clone(),
            user_answer: a.user_answer.clone(),
        })
        .collect();

    let out = SubmitOut {
        correct_count: result.correct_count,
        total: result.total,
        items,
        progress: to_progress_out(&next),
    };

    info!(
        target: "drill",
        %session_id,
        ?exercise,
        correct = result.correct_count,
        total = result.total,
        level = next.level,
        "Submission graded"
    );
    state.store_progress(session_id, next).await;
    Ok(out)
}

/// AI feedback over the session's incorrect attempts. Falls back to a
/// deterministic local diagnosis when OpenAI is unavailable or fails.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn feedback_text(state: &AppState, session_id: &str) -> Result<String, String> {
    let session = state
        .get_session(session_id)
        .await
        .ok_or_else(|| format!("Unknown sessionId: {}", session_id))?;

    let errors: Vec<&Attempt> = session
        .progress
        .attempts
        .iter()
        .filter(|a| !a.is_correct && a.user_answer != NO_ANSWER)
        .collect();

    if errors.is_empty() {
        return Ok(
            "¡Genial! No hemos detectado errores recientes o no has corregido ningún ejercicio. ¡Sigue practicando!"
                .to_string(),
        );
    }

    let recent: Vec<&Attempt> = errors
        .iter()
        .rev()
        .take(MAX_ERRORS_FOR_FEEDBACK)
        .rev()
        .copied()
        .collect();
    let summary = error_summary(&recent);

    if let Some(oa) = &state.openai {
        match oa.feedback(&state.prompts, recent.len(), &summary).await {
            Ok(text) => return Ok(text),
            Err(e) => {
                error!(target: "drill", %session_id, error = %e, "OpenAI feedback failed; using local diagnosis.");
            }
        }
    }
    Ok(feedback_local(&recent))
}

/// One tutor-chat reply; local stub when OpenAI is unavailable.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn tutor_reply_text(state: &AppState, text: &str) -> String {
    if let Some(oa) = &state.openai {
        match oa.tutor_reply(&state.prompts, text).await {
            Ok(t) => return t,
            Err(e) => {
                error!(target: "drill", error = %e, "OpenAI tutor reply failed; using stub.")
            }
        }
    }
    tutor_stub(text)
}

// -------- Local fallbacks & utilities --------

/// Preformatted error list sent to the model (and used by the local
/// diagnosis). One block per error with the question context.
fn error_summary(errors: &[&Attempt]) -> String {
    let mut out = String::from(
        "Errores detectados en la práctica de Subjuntivo (con conjugaciones y contextos):\n\n",
    );
    for (index, error) in errors.iter().enumerate() {
        out.push_str(&format!(
            "[Error #{}] Ejercicio: {:?} (Pregunta: {})\n",
            index + 1,
            error.exercise,
            if error.question.is_empty() { "N/A" } else { &error.question },
        ));
        out.push_str(&format!("- Tu Respuesta: \"{}\"\n", error.user_answer));
        out.push_str(&format!("- Respuesta Correcta: \"{}\"\n\n", error.correct_answer));
    }
    out
}

/// Deterministic diagnosis: name the exercise with the most errors, show a
/// few corrections, and encourage.
fn feedback_local(errors: &[&Attempt]) -> String {
    let mut counts: Vec<(ExerciseId, usize)> = Vec::new();
    for e in errors {
        match counts.iter_mut().find(|(id, _)| *id == e.exercise) {
            Some((_, n)) => *n += 1,
            None => counts.push((e.exercise, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = String::new();
    if let Some((worst, n)) = counts.first() {
        let cfg = exercise_config(*worst);
        out.push_str(&format!(
            "He revisado tus últimos {} errores. Donde más fallas es en «{}» ({} errores).\n\n",
            errors.len(),
            cfg.title,
            n
        ));
    }

    out.push_str("Fíjate en estas correcciones:\n");
    for e in errors.iter().take(3) {
        out.push_str(&format!("- «{}» → «{}»\n", e.user_answer, e.correct_answer));
    }
    out.push_str(
        "\nRecuerda: tras disparadores de deseo o duda (espero que, ojalá, dudo que) se usa el subjuntivo, y los verbos en -ar toman -e mientras que -er/-ir toman -a. ¡Vas por buen camino, sigue practicando!",
    );
    out
}

/// Tiny tutor fallback that answers the most common subjunctive questions.
fn tutor_stub(text: &str) -> String {
    let t = text.to_lowercase();
    if t.contains("ojalá") || t.contains("ojala") || t.contains("espero") {
        "«Ojalá» y «espero que» son disparadores de deseo: siempre van seguidos de subjuntivo. Ejemplo: Ojalá que vengas mañana.".into()
    } else if t.contains("irregular") {
        "Los irregulares clave del presente de subjuntivo: ser→sea, ir→vaya, haber→haya, saber→sepa, estar→esté, hacer→haga. Salen del ejercicio 1.".into()
    } else if t.contains("indicativo") || t.contains("contraste") {
        "Indicativo para hechos y certezas (creo que viene); subjuntivo para duda, deseo o irrealidad (no creo que venga).".into()
    } else if t.contains("subjuntivo") {
        "El presente de subjuntivo se forma desde la primera persona del indicativo: hablo→hable, como→coma, vivo→viva. Pregunta por un disparador concreto si quieres ejemplos.".into()
    } else {
        "Céntrate en los patrones básicos: disparador + que + subjuntivo. Pregunta por «ojalá», los irregulares o el contraste con el indicativo para una explicación más concreta.".into()
    }
}
