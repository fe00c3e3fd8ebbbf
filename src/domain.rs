//! Domain models: exercise catalog, question templates, generated drill
//! items, attempts, and the level table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a generated batch is answered in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Multiple choice.
    Radio,
    /// Free-text input.
    Input,
    /// Reconstruct a sentence from shuffled word tokens.
    Ordering,
}

/// Named question pool. Names match the original content categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolName {
    /// Bare conjugation forms (pure subjunctive morphology).
    FormaPura,
    /// Trigger-phrase sentences that force the subjunctive.
    Disparadores,
    /// Indicative-vs-subjunctive contrast pairs.
    Contraste,
    /// Word-ordering sentences.
    OrdenarFrase,
    /// Spot the correctly-written sentence.
    IdentificarError,
}

/// The seven drill tabs of the trainer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseId {
    Ejercicio1,
    Ejercicio2,
    Ejercicio3,
    Ejercicio4,
    Ejercicio5,
    Ejercicio6,
    Ejercicio7,
}

/// Static per-exercise configuration (title, answer mode, backing pool).
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExerciseConfig {
    pub id: ExerciseId,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub pool: PoolName,
}

/// One row of the progression table.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Level {
    pub level_number: u32,
    pub title: &'static str,
    /// Total correct answers needed to unlock this level.
    pub unlock_threshold: u32,
    pub available_exercises: &'static [ExerciseId],
}

/// Raw question template, one variant per content category. Each variant
/// carries exactly the fields its generation strategy needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum QuestionTemplate {
    /// A verb descriptor like "(ellos, hacer)" — parenthesized,
    /// comma-separated, infinitive last — plus an optional sentence frame
    /// with a blank marker. `answer` is a placeholder until the resolver
    /// computes the person-specific form.
    Conjugation {
        verb: String,
        #[serde(default)]
        sentence: Option<String>,
        answer: String,
    },
    /// A sentence with a blank and two candidate fills, one per mood.
    Contrast {
        sentence: String,
        answer: String,
        other: String,
    },
    /// Candidate sentences of which exactly one is correct.
    SpotError {
        options: Vec<String>,
        answer: String,
    },
    /// Word tokens of a target sentence, in canonical order.
    Ordering { words: Vec<String> },
}

/// A ready-to-render drill item. Created fresh per generation call; the
/// answer pair is overwritten once (conjugation resolution) and never
/// mutated afterwards.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratedQuestion {
    pub sentence: Option<String>,
    pub verb: Option<String>,
    pub answer: String,
    pub cleaned_answer: String,
    /// Shuffled multiple-choice options, present for radio items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Shuffled word tokens, present for ordering items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffled_words: Option<Vec<String>>,
}

impl GeneratedQuestion {
    /// Display text used when logging an attempt against this item.
    pub fn display_text(&self) -> String {
        self.sentence
            .clone()
            .or_else(|| self.verb.clone())
            .unwrap_or_else(|| self.answer.clone())
    }
}

/// Immutable record of one submitted answer.
#[derive(Clone, Debug, Serialize)]
pub struct Attempt {
    pub exercise: ExerciseId,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub timestamp_ms: u64,
}

/// Immutable per-pool collections of raw templates.
pub struct QuestionBanks {
    pools: HashMap<PoolName, Vec<QuestionTemplate>>,
}

impl QuestionBanks {
    pub fn new(pools: HashMap<PoolName, Vec<QuestionTemplate>>) -> Self {
        Self { pools }
    }

    /// Templates for a pool; an unknown/empty pool reads as an empty slice.
    pub fn pool(&self, name: PoolName) -> &[QuestionTemplate] {
        self.pools.get(&name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append an extra template (config-bank items).
    pub fn push(&mut self, name: PoolName, template: QuestionTemplate) {
        self.pools.entry(name).or_default().push(template);
    }

    /// (pool, item count) inventory for the startup log.
    pub fn inventory(&self) -> Vec<(PoolName, usize)> {
        self.pools.iter().map(|(k, v)| (*k, v.len())).collect()
    }
}
