//! Drill batch generation: pool selection, sampling without replacement,
//! and per-type enrichment.
//!
//! Every item degrades independently; a malformed template keeps its pool
//! defaults instead of aborting the batch.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::conjugation::{person_index, ConjugationTables, Mood};
use crate::distractors::build_options;
use crate::domain::{ExerciseType, GeneratedQuestion, PoolName, QuestionBanks, QuestionTemplate};
use crate::normalize::normalize;

/// Subject phrase assumed when a verb descriptor carries no subject token.
const DEFAULT_SUBJECT: &str = "él";

/// Generate up to `count` drill items from a pool.
///
/// The pool is shuffled (uniform permutation) and the first `count`
/// templates are enriched according to the exercise type. An empty pool
/// yields an empty batch, not an error.
pub fn generate_questions<R: Rng>(
    tables: &ConjugationTables,
    banks: &QuestionBanks,
    pool: PoolName,
    count: usize,
    exercise_type: ExerciseType,
    rng: &mut R,
) -> Vec<GeneratedQuestion> {
    let mut templates: Vec<QuestionTemplate> = banks.pool(pool).to_vec();
    templates.shuffle(rng);
    templates.truncate(count);

    templates
        .into_iter()
        .map(|t| build_question(tables, pool, exercise_type, t, rng))
        .collect()
}

/// Split a verb descriptor "(subject, …, infinitive)" into its subject
/// phrase and raw infinitive. The subject defaults to "él" when only one
/// token is present. `None` means the descriptor is malformed.
fn parse_verb_descriptor(descriptor: &str) -> Option<(String, String)> {
    let open = descriptor.find('(')?;
    let close = descriptor[open + 1..].find(')')?;
    let inner = &descriptor[open + 1..open + 1 + close];

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let infinitive = (*parts.last()?).to_string();
    if infinitive.is_empty() {
        return None;
    }
    let subject = if parts.len() > 1 {
        parts[..parts.len() - 1].join(", ")
    } else {
        DEFAULT_SUBJECT.to_string()
    };
    Some((subject, infinitive))
}

fn build_question<R: Rng>(
    tables: &ConjugationTables,
    pool: PoolName,
    exercise_type: ExerciseType,
    template: QuestionTemplate,
    rng: &mut R,
) -> GeneratedQuestion {
    let mut question = match template {
        QuestionTemplate::Conjugation { verb, sentence, answer } => {
            conjugation_question(tables, pool, exercise_type, verb, sentence, answer, rng)
        }
        QuestionTemplate::Contrast { sentence, answer, other } => {
            let options = match exercise_type {
                ExerciseType::Radio => {
                    let mut opts = vec![answer.clone(), other];
                    opts.shuffle(rng);
                    Some(opts)
                }
                _ => None,
            };
            GeneratedQuestion {
                sentence: Some(sentence),
                verb: None,
                answer,
                cleaned_answer: String::new(),
                options,
                shuffled_words: None,
            }
        }
        QuestionTemplate::SpotError { options, answer } => {
            let shuffled = match exercise_type {
                ExerciseType::Radio => {
                    let mut opts = options;
                    opts.shuffle(rng);
                    Some(opts)
                }
                _ => None,
            };
            GeneratedQuestion {
                sentence: None,
                verb: None,
                answer,
                cleaned_answer: String::new(),
                options: shuffled,
                shuffled_words: None,
            }
        }
        QuestionTemplate::Ordering { words } => {
            let answer = words.join(" ");
            let shuffled_words = match exercise_type {
                ExerciseType::Ordering => {
                    let mut tokens = words;
                    tokens.shuffle(rng);
                    Some(tokens)
                }
                _ => None,
            };
            GeneratedQuestion {
                sentence: None,
                verb: None,
                answer,
                cleaned_answer: String::new(),
                options: None,
                shuffled_words,
            }
        }
    };

    // Computed last, after any answer overwrite.
    question.cleaned_answer = normalize(&question.answer);
    question
}

/// Enrichment for conjugation templates: resolve the person-specific
/// subjunctive form and, for radio items, synthesize distractors.
fn conjugation_question<R: Rng>(
    tables: &ConjugationTables,
    pool: PoolName,
    exercise_type: ExerciseType,
    verb: String,
    sentence: Option<String>,
    default_answer: String,
    rng: &mut R,
) -> GeneratedQuestion {
    let parsed = parse_verb_descriptor(&verb);
    let (subject, raw_infinitive) = match parsed {
        Some(p) => p,
        None => {
            debug!(target: "drill", descriptor = %verb, "Malformed verb descriptor; keeping pool defaults");
            let options = matches!(exercise_type, ExerciseType::Radio).then(Vec::new);
            return GeneratedQuestion {
                sentence,
                verb: Some(verb),
                cleaned_answer: String::new(),
                answer: default_answer,
                options,
                shuffled_words: None,
            };
        }
    };

    let person = person_index(&subject);
    let answer = match tables.conjugate(&raw_infinitive, person, Mood::Subjunctive) {
        Some(form) => form,
        None => {
            // Unresolvable verb class: the pool's stated answer stands in.
            debug!(target: "drill", infinitive = %raw_infinitive, "No conjugation available; using pool answer");
            default_answer
        }
    };

    let options = match exercise_type {
        ExerciseType::Radio => Some(build_options(
            tables,
            &answer,
            &raw_infinitive,
            person,
            pool == PoolName::Disparadores,
            rng,
        )),
        _ => None,
    };

    GeneratedQuestion {
        sentence,
        verb: Some(verb),
        answer,
        cleaned_answer: String::new(),
        options,
        shuffled_words: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::{conjugation_tables, question_banks};
    use crate::scoring::grade;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn single_pool(pool: PoolName, templates: Vec<QuestionTemplate>) -> QuestionBanks {
        QuestionBanks::new(HashMap::from_iter([(pool, templates)]))
    }

    #[test]
    fn batch_is_clamped_to_pool_size() {
        let tables = conjugation_tables();
        let banks = question_banks();
        let mut rng = StdRng::seed_from_u64(1);

        let batch = generate_questions(
            &tables, &banks, PoolName::Contraste, 3, ExerciseType::Radio, &mut rng,
        );
        assert_eq!(batch.len(), 3);

        let all = generate_questions(
            &tables, &banks, PoolName::Contraste, 999, ExerciseType::Radio, &mut rng,
        );
        assert_eq!(all.len(), banks.pool(PoolName::Contraste).len());
    }

    #[test]
    fn empty_pool_yields_empty_batch() {
        let tables = conjugation_tables();
        let banks = single_pool(PoolName::FormaPura, Vec::new());
        let mut rng = StdRng::seed_from_u64(1);
        let batch = generate_questions(
            &tables, &banks, PoolName::FormaPura, 5, ExerciseType::Radio, &mut rng,
        );
        assert!(batch.is_empty());
        // A pool name with no entry at all behaves the same.
        let batch = generate_questions(
            &tables, &banks, PoolName::Contraste, 5, ExerciseType::Radio, &mut rng,
        );
        assert!(batch.is_empty());
    }

    #[test]
    fn trigger_scenario_resolves_person_specific_answer() {
        let tables = conjugation_tables();
        let banks = single_pool(
            PoolName::Disparadores,
            vec![QuestionTemplate::Conjugation {
                verb: "(ellos, hacer)".into(),
                sentence: Some("Espero que __________ (hacer, ellos) una fiesta.".into()),
                answer: "placeholder".into(),
            }],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let batch = generate_questions(
            &tables, &banks, PoolName::Disparadores, 1, ExerciseType::Radio, &mut rng,
        );
        assert_eq!(batch.len(), 1);
        let q = &batch[0];
        assert_eq!(q.answer, "hagan");
        assert_eq!(q.cleaned_answer, "hagan");

        let options = q.options.as_ref().unwrap();
        assert_eq!(options.len(), 4);
        let normalized: Vec<String> = options.iter().map(|o| normalize(o)).collect();
        let mut unique = normalized.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), options.len());
        assert_eq!(normalized.iter().filter(|n| n.as_str() == "hagan").count(), 1);
    }

    #[test]
    fn input_type_resolves_answer_without_options() {
        let tables = conjugation_tables();
        let banks = single_pool(
            PoolName::FormaPura,
            vec![QuestionTemplate::Conjugation {
                verb: "(nosotros, hablar)".into(),
                sentence: None,
                answer: "placeholder".into(),
            }],
        );
        let mut rng = StdRng::seed_from_u64(2);
        let batch = generate_questions(
            &tables, &banks, PoolName::FormaPura, 1, ExerciseType::Input, &mut rng,
        );
        assert_eq!(batch[0].answer, "hablemos");
        assert!(batch[0].options.is_none());
    }

    #[test]
    fn descriptor_without_subject_defaults_to_third_singular() {
        let tables = conjugation_tables();
        let banks = single_pool(
            PoolName::Disparadores,
            vec![QuestionTemplate::Conjugation {
                verb: "(llover)".into(),
                sentence: Some("Ojalá que __________ (llover) mañana.".into()),
                answer: "placeholder".into(),
            }],
        );
        let mut rng = StdRng::seed_from_u64(4);
        let batch = generate_questions(
            &tables, &banks, PoolName::Disparadores, 1, ExerciseType::Input, &mut rng,
        );
        assert_eq!(batch[0].answer, "llueva");
    }

    #[test]
    fn malformed_descriptor_keeps_pool_defaults() {
        let tables = conjugation_tables();
        let banks = single_pool(
            PoolName::FormaPura,
            vec![QuestionTemplate::Conjugation {
                verb: "hablar yo".into(),
                sentence: None,
                answer: "hable".into(),
            }],
        );
        let mut rng = StdRng::seed_from_u64(4);
        let batch = generate_questions(
            &tables, &banks, PoolName::FormaPura, 1, ExerciseType::Radio, &mut rng,
        );
        assert_eq!(batch[0].answer, "hable");
        assert_eq!(batch[0].cleaned_answer, "hable");
        assert_eq!(batch[0].options.as_deref(), Some(&[][..]));
    }

    #[test]
    fn contrast_options_are_the_candidate_pair() {
        let tables = conjugation_tables();
        let banks = question_banks();
        let mut rng = StdRng::seed_from_u64(6);
        let batch = generate_questions(
            &tables, &banks, PoolName::Contraste, 8, ExerciseType::Radio, &mut rng,
        );
        for q in &batch {
            let options = q.options.as_ref().unwrap();
            assert_eq!(options.len(), 2);
            assert!(options.contains(&q.answer));
        }
    }

    #[test]
    fn ordering_words_are_a_permutation_of_the_answer() {
        let tables = conjugation_tables();
        let banks = question_banks();
        let mut rng = StdRng::seed_from_u64(8);
        let batch = generate_questions(
            &tables, &banks, PoolName::OrdenarFrase, 8, ExerciseType::Ordering, &mut rng,
        );
        assert!(!batch.is_empty());
        for q in &batch {
            let mut shuffled = q.shuffled_words.clone().unwrap();
            let mut original: Vec<String> =
                q.answer.split(' ').map(str::to_string).collect();
            shuffled.sort();
            original.sort();
            assert_eq!(shuffled, original);
        }
    }

    #[test]
    fn every_generated_answer_grades_as_correct() {
        let tables = conjugation_tables();
        let banks = question_banks();
        let mut rng = StdRng::seed_from_u64(10);
        for cfg in crate::banks::EXERCISE_CATALOG.iter() {
            let batch = generate_questions(
                &tables, &banks, cfg.pool, 5, cfg.exercise_type, &mut rng,
            );
            assert!(!batch.is_empty());
            for q in &batch {
                assert!(grade(q, &q.answer), "self-consistency failed for {:?}", q.answer);
            }
        }
    }

    #[test]
    fn descriptor_parsing() {
        assert_eq!(
            parse_verb_descriptor("(ellos, hacer)"),
            Some(("ellos".into(), "hacer".into()))
        );
        assert_eq!(
            parse_verb_descriptor("(el tren, salir)"),
            Some(("el tren".into(), "salir".into()))
        );
        assert_eq!(
            parse_verb_descriptor("(llover)"),
            Some(("él".into(), "llover".into()))
        );
        assert_eq!(parse_verb_descriptor("hablar"), None);
        assert_eq!(parse_verb_descriptor("()"), None);
    }
}
