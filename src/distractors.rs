//! Multiple-choice distractor synthesis for conjugation items.
//!
//! The option set always contains the correct answer exactly once; every
//! other entry is a plausible wrong form of the same verb, topped up from
//! other verbs when the target verb has too few distinguishable forms.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::conjugation::{strip_reflexive, ConjugationTables, Mood};
use crate::normalize::normalize;

/// Options per multiple-choice item.
pub const OPTION_TARGET: usize = 4;

/// Generic filler forms gathered before backfilling a sparse option set.
const FILLER_POOL_TARGET: usize = 20;

/// Build up to four normalized-unique options for a conjugation item.
///
/// `seed_infinitive` marks trigger-phrase pools, where the bare infinitive
/// is a classic learner error and therefore a priority distractor. The
/// same-person indicative form (same person, wrong mood) is always seeded
/// first when it exists and differs from the correct answer.
pub fn build_options<R: Rng>(
    tables: &ConjugationTables,
    correct: &str,
    raw_infinitive: &str,
    person: usize,
    seed_infinitive: bool,
    rng: &mut R,
) -> Vec<String> {
    let infinitive = strip_reflexive(raw_infinitive).to_string();
    let correct_norm = normalize(correct);

    // Union of both moods' forms, minus anything that reads as the correct
    // answer once normalized.
    let mut pool: Vec<String> = Vec::new();
    for form in tables
        .all_forms(&infinitive, Mood::Indicative)
        .into_iter()
        .chain(tables.all_forms(&infinitive, Mood::Subjunctive))
    {
        if normalize(&form) != correct_norm && !pool.contains(&form) {
            pool.push(form);
        }
    }

    // Priority seeds keep their slot at the front; only the rest shuffles.
    let mut seeds: Vec<String> = Vec::new();
    if let Some(same_person) = tables.conjugate(raw_infinitive, person, Mood::Indicative) {
        if normalize(&same_person) != correct_norm {
            let norm = normalize(&same_person);
            pool.retain(|f| normalize(f) != norm);
            seeds.push(same_person);
        }
    }
    if seed_infinitive {
        let inf_norm = normalize(&infinitive);
        if inf_norm != correct_norm
            && !seeds.iter().chain(pool.iter()).any(|f| normalize(f) == inf_norm)
        {
            seeds.insert(0, infinitive.clone());
        }
    }

    pool.shuffle(rng);

    let mut options: Vec<String> = vec![correct.to_string()];
    for candidate in seeds.into_iter().chain(pool) {
        if options.len() >= OPTION_TARGET {
            break;
        }
        if !options.iter().any(|o| normalize(o) == normalize(&candidate)) {
            options.push(candidate);
        }
    }

    if options.len() < OPTION_TARGET {
        backfill_generic(tables, &infinitive, &mut options, rng);
    }

    options.truncate(OPTION_TARGET);
    options.shuffle(rng);
    options
}

/// Top up a sparse option set with forms of other verbs, sampled at random
/// from the irregular table until enough filler is gathered or the material
/// runs out.
fn backfill_generic<R: Rng>(
    tables: &ConjugationTables,
    infinitive: &str,
    options: &mut Vec<String>,
    rng: &mut R,
) {
    let others: Vec<&str> = tables
        .known_verbs()
        .into_iter()
        .filter(|v| *v != infinitive)
        .collect();
    if others.is_empty() {
        return;
    }

    let mut filler: Vec<String> = Vec::new();
    let mut rounds = 0;
    while filler.len() < FILLER_POOL_TARGET && rounds < others.len() {
        rounds += 1;
        let verb = match others.choose(rng) {
            Some(v) => *v,
            None => break,
        };
        for form in tables
            .all_forms(verb, Mood::Subjunctive)
            .into_iter()
            .chain(tables.all_forms(verb, Mood::Indicative))
        {
            if !filler.contains(&form) {
                filler.push(form);
            }
        }
    }

    filler.shuffle(rng);
    for candidate in filler {
        if options.len() >= OPTION_TARGET {
            break;
        }
        if !options.iter().any(|o| normalize(o) == normalize(&candidate)) {
            options.push(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::conjugation_tables;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_valid_options(options: &[String], correct: &str) {
        assert!(options.len() <= OPTION_TARGET);
        let normalized: Vec<String> = options.iter().map(|o| normalize(o)).collect();
        let mut deduped = normalized.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), normalized.len(), "duplicate options: {:?}", options);
        let hits = normalized.iter().filter(|n| **n == normalize(correct)).count();
        assert_eq!(hits, 1, "correct answer must appear exactly once: {:?}", options);
    }

    #[test]
    fn four_unique_options_with_correct_exactly_once() {
        let tables = conjugation_tables();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let options = build_options(&tables, "hagan", "hacer", 5, false, &mut rng);
            assert_eq!(options.len(), OPTION_TARGET);
            assert_valid_options(&options, "hagan");
        }
    }

    #[test]
    fn infinitive_seeded_for_trigger_pools() {
        let tables = conjugation_tables();
        let mut rng = StdRng::seed_from_u64(3);
        // Priority seeds fill slots before the shuffled pool, so the
        // infinitive must survive into the option set.
        let options = build_options(&tables, "hagan", "hacer", 5, true, &mut rng);
        assert!(
            options.iter().any(|o| normalize(o) == normalize("hacer")),
            "expected bare infinitive among {:?}",
            options
        );
        assert_valid_options(&options, "hagan");
    }

    #[test]
    fn same_person_indicative_always_present() {
        let tables = conjugation_tables();
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let options = build_options(&tables, "hagan", "hacer", 5, false, &mut rng);
            assert!(
                options.iter().any(|o| normalize(o) == normalize("hacen")),
                "same-person indicative missing from {:?}",
                options
            );
        }
    }

    #[test]
    fn reflexive_verbs_resolve_to_base_forms() {
        let tables = conjugation_tables();
        let mut rng = StdRng::seed_from_u64(11);
        let options = build_options(&tables, "levante", "levantarse", 0, false, &mut rng);
        assert_valid_options(&options, "levante");
        assert_eq!(options.len(), OPTION_TARGET);
    }

    #[test]
    fn sparse_material_backfills_from_other_verbs() {
        let tables = conjugation_tables();
        let mut rng = StdRng::seed_from_u64(5);
        // "llover" has a single distinguishable form per mood, so nearly all
        // options must come from the cross-verb filler pool.
        let options = build_options(&tables, "llueva", "llover", 2, false, &mut rng);
        assert_eq!(options.len(), OPTION_TARGET);
        assert_valid_options(&options, "llueva");
    }

    #[test]
    fn unresolvable_verb_still_yields_backfilled_options() {
        let tables = conjugation_tables();
        let mut rng = StdRng::seed_from_u64(9);
        let options = build_options(&tables, "zzz", "zzz", 0, false, &mut rng);
        assert_valid_options(&options, "zzz");
        assert_eq!(options.len(), OPTION_TARGET);
    }
}
