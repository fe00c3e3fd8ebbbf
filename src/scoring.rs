//! Grading and session progress.
//!
//! Progress is an explicit state machine: a submission plus the prior
//! `Progress` yields a fresh `Progress` record. Nothing here mutates shared
//! state or touches a clock; timestamps come in from the caller.

use std::collections::HashMap;

use serde::Serialize;

use crate::banks::LEVELS;
use crate::domain::{Attempt, ExerciseId, ExerciseType, GeneratedQuestion, Level};
use crate::normalize::normalize;

/// Sentinel recorded when the learner left an item unanswered. It runs
/// through the same normalization as a real answer and can never equal a
/// conjugated form.
pub const NO_ANSWER: &str = "No respondió";

/// One submitted answer is correct iff it normalizes to the item's
/// precomputed cleaned answer.
pub fn grade(question: &GeneratedQuestion, raw_user_answer: &str) -> bool {
    normalize(raw_user_answer) == question.cleaned_answer
}

/// Per-exercise running tally.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Tally {
    pub correct: u32,
    pub attempted: u32,
}

/// Outcome of grading one batch.
#[derive(Clone, Debug, Serialize)]
pub struct ExerciseResult {
    pub correct_count: u32,
    pub total: u32,
    /// Per-item verdicts, batch order.
    pub results: Vec<bool>,
}

/// Session-long progress: tallies, attempt log, and the level meter.
#[derive(Clone, Debug, Serialize)]
pub struct Progress {
    pub scores: HashMap<ExerciseId, Tally>,
    pub attempts: Vec<Attempt>,
    pub total_correct: u32,
    pub level: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            attempts: Vec::new(),
            total_correct: 0,
            level: 1,
        }
    }

    /// Exercises available at the current level.
    pub fn unlocked_exercises(&self) -> &'static [ExerciseId] {
        unlocked_at(self.level)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

/// Exercises available at a level; level rows are cumulative.
pub fn unlocked_at(level: u32) -> &'static [ExerciseId] {
    LEVELS
        .iter()
        .rev()
        .find(|l| l.level_number <= level)
        .map(|l| l.available_exercises)
        .unwrap_or(LEVELS[0].available_exercises)
}

/// Grade a submitted batch against the prior progress.
///
/// Missing answers get the [`NO_ANSWER`] sentinel. The returned progress
/// has the tallies bumped, attempts appended, and the level walked forward
/// across every threshold the new total crosses.
pub fn apply_submission(
    prev: &Progress,
    exercise: ExerciseId,
    exercise_type: ExerciseType,
    questions: &[GeneratedQuestion],
    answers: &[Option<String>],
    timestamp_ms: u64,
) -> (Progress, ExerciseResult) {
    let mut results = Vec::with_capacity(questions.len());
    let mut new_attempts = Vec::with_capacity(questions.len());
    let mut correct_count = 0u32;

    for (index, question) in questions.iter().enumerate() {
        let user_answer = answers
            .get(index)
            .and_then(|a| a.clone())
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string());

        let is_correct = grade(question, &user_answer);
        if is_correct {
            correct_count += 1;
        }
        results.push(is_correct);

        new_attempts.push(Attempt {
            exercise,
            exercise_type,
            question: question.display_text(),
            user_answer,
            correct_answer: question.answer.clone(),
            is_correct,
            timestamp_ms,
        });
    }

    let mut next = prev.clone();
    let tally = next.scores.entry(exercise).or_default();
    tally.correct += correct_count;
    tally.attempted += questions.len() as u32;
    next.attempts.extend(new_attempts);
    next.total_correct += correct_count;
    next.level = level_for(next.level, next.total_correct);

    let result = ExerciseResult {
        correct_count,
        total: questions.len() as u32,
        results,
    };
    (next, result)
}

/// Walk the level table forward from `current` for the given total. A
/// single submission may cross several thresholds.
fn level_for(current: u32, total_correct: u32) -> u32 {
    let mut level = current;
    while let Some(next) = LEVELS.iter().find(|l| l.level_number == level + 1) {
        if total_correct >= next.unlock_threshold {
            level += 1;
        } else {
            break;
        }
    }
    level
}

/// Level row for display purposes.
pub fn level_info(level: u32) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.level_number == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            sentence: None,
            verb: None,
            answer: answer.to_string(),
            cleaned_answer: normalize(answer),
            options: None,
            shuffled_words: None,
        }
    }

    #[test]
    fn grading_is_normalized_on_both_sides() {
        let q = question("hagan");
        assert!(grade(&q, "  Hágan!! "));
        assert!(grade(&q, "hagan"));
        assert!(!grade(&q, "hacen"));
    }

    #[test]
    fn missing_answer_is_never_correct() {
        let q = question("hagan");
        let (next, result) = apply_submission(
            &Progress::new(),
            ExerciseId::Ejercicio1,
            ExerciseType::Radio,
            &[q],
            &[None],
            0,
        );
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.results, vec![false]);
        assert_eq!(next.attempts[0].user_answer, NO_ANSWER);
    }

    #[test]
    fn blank_answer_becomes_the_sentinel() {
        let q = question("hagan");
        let (next, _) = apply_submission(
            &Progress::new(),
            ExerciseId::Ejercicio1,
            ExerciseType::Input,
            &[q],
            &[Some("   ".to_string())],
            0,
        );
        assert_eq!(next.attempts[0].user_answer, NO_ANSWER);
    }

    #[test]
    fn submission_updates_tallies_and_attempts() {
        let questions = vec![question("hable"), question("comas"), question("vayan")];
        let answers = vec![
            Some("hable".to_string()),
            Some("comes".to_string()),
            Some("VAYAN".to_string()),
        ];
        let (next, result) = apply_submission(
            &Progress::new(),
            ExerciseId::Ejercicio2,
            ExerciseType::Input,
            &questions,
            &answers,
            1234,
        );
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total, 3);
        assert_eq!(result.results, vec![true, false, true]);
        let tally = next.scores[&ExerciseId::Ejercicio2];
        assert_eq!(tally.correct, 2);
        assert_eq!(tally.attempted, 3);
        assert_eq!(next.total_correct, 2);
        assert_eq!(next.attempts.len(), 3);
        assert_eq!(next.attempts[1].correct_answer, "comas");
        assert!(!next.attempts[1].is_correct);
        assert_eq!(next.attempts[2].timestamp_ms, 1234);
    }

    #[test]
    fn prior_progress_is_untouched() {
        let prev = Progress::new();
        let q = question("sea");
        let _ = apply_submission(
            &prev,
            ExerciseId::Ejercicio1,
            ExerciseType::Radio,
            &[q],
            &[Some("sea".to_string())],
            0,
        );
        assert_eq!(prev.total_correct, 0);
        assert!(prev.attempts.is_empty());
    }

    #[test]
    fn level_walks_across_thresholds() {
        let mut progress = Progress::new();
        progress.total_correct = 9;
        let questions: Vec<GeneratedQuestion> =
            (0..5).map(|_| question("sea")).collect();
        let answers: Vec<Option<String>> =
            (0..5).map(|_| Some("sea".to_string())).collect();
        let (next, _) = apply_submission(
            &progress,
            ExerciseId::Ejercicio1,
            ExerciseType::Radio,
            &questions,
            &answers,
            0,
        );
        // 9 + 5 = 14 correct: past the level-2 threshold (10), short of 25.
        assert_eq!(next.level, 2);
        assert!(next.unlocked_exercises().contains(&ExerciseId::Ejercicio3));
        assert!(!next.unlocked_exercises().contains(&ExerciseId::Ejercicio4));
    }

    #[test]
    fn big_jump_levels_up_repeatedly() {
        assert_eq!(level_for(1, 30), 3);
        assert_eq!(level_for(1, 80), 5);
        assert_eq!(level_for(5, 1000), 5);
        assert_eq!(level_for(1, 0), 1);
    }
}
