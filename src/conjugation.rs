//! Present-tense conjugation: irregular table lookup with a regular-suffix
//! fallback, plus grammatical-person classification of subject phrases.
//!
//! Persons are indexed 0..=5: yo, tú, él/ella/usted, nosotros, vosotros,
//! ellos/ustedes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of grammatical persons in one conjugation row.
pub const PERSON_COUNT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Subjunctive,
    Indicative,
}

/// Irregular/high-frequency verbs, one row of six forms per infinitive.
/// Any verb absent from both maps falls back to the regular suffix rules.
pub struct ConjugationTables {
    pub subjunctive: HashMap<&'static str, [&'static str; PERSON_COUNT]>,
    pub indicative: HashMap<&'static str, [&'static str; PERSON_COUNT]>,
}

impl ConjugationTables {
    fn table(&self, mood: Mood) -> &HashMap<&'static str, [&'static str; PERSON_COUNT]> {
        match mood {
            Mood::Subjunctive => &self.subjunctive,
            Mood::Indicative => &self.indicative,
        }
    }

    /// Conjugate `verb` for a person index in the given mood.
    ///
    /// Lookup order: irregular table with the verb as given, then with the
    /// reflexive marker stripped, then the regular rules. `None` means no
    /// conjugation is available (verb class outside ar/er/ir); callers fall
    /// back to whatever default answer the question bank supplies.
    pub fn conjugate(&self, verb: &str, person: usize, mood: Mood) -> Option<String> {
        let map = self.table(mood);
        let verb = verb.trim();
        if let Some(forms) = map.get(verb) {
            return forms.get(person).map(|f| f.to_string());
        }
        let base = strip_reflexive(verb);
        if let Some(forms) = map.get(base) {
            return forms.get(person).map(|f| f.to_string());
        }
        regular_conjugation(base, person, mood)
    }

    /// All known forms of `verb` in one mood: the irregular row if present,
    /// otherwise whatever the regular rules produce. Used as distractor
    /// material; may be shorter than six entries for unresolvable verbs.
    pub fn all_forms(&self, verb: &str, mood: Mood) -> Vec<String> {
        let map = self.table(mood);
        let verb = verb.trim();
        let base = strip_reflexive(verb);
        if let Some(forms) = map.get(verb).or_else(|| map.get(base)) {
            return forms.iter().map(|f| f.to_string()).collect();
        }
        (0..PERSON_COUNT)
            .filter_map(|i| regular_conjugation(base, i, mood))
            .collect()
    }

    /// Infinitives covered by the subjunctive table, for cross-verb
    /// distractor backfill.
    pub fn known_verbs(&self) -> Vec<&'static str> {
        self.subjunctive.keys().copied().collect()
    }
}

/// Strip the trailing reflexive marker: "levantarse" -> "levantar".
pub fn strip_reflexive(verb: &str) -> &str {
    let verb = verb.trim();
    verb.strip_suffix("se").unwrap_or(verb)
}

/// Regular present-tense conjugation from the verb class (final two
/// characters) and a mood-specific ending set.
fn regular_conjugation(verb: &str, person: usize, mood: Mood) -> Option<String> {
    let chars: Vec<char> = verb.chars().collect();
    if chars.len() < 3 {
        return None;
    }
    let stem: String = chars[..chars.len() - 2].iter().collect();
    let class: String = chars[chars.len() - 2..].iter().collect();

    let endings: [&str; PERSON_COUNT] = match (class.as_str(), mood) {
        ("ar", Mood::Subjunctive) => ["e", "es", "e", "emos", "éis", "en"],
        ("er", Mood::Subjunctive) | ("ir", Mood::Subjunctive) => {
            ["a", "as", "a", "amos", "áis", "an"]
        }
        ("ar", Mood::Indicative) => ["o", "as", "a", "amos", "áis", "an"],
        ("er", Mood::Indicative) => ["o", "es", "e", "emos", "éis", "en"],
        ("ir", Mood::Indicative) => ["o", "es", "e", "imos", "ís", "en"],
        _ => return None,
    };

    endings.get(person).map(|e| format!("{}{}", stem, e))
}

/// Classify a free-text subject phrase into a person index.
///
/// Substring containment, first match wins. Plural third person is tested
/// before singular so "ustedes" never falls into the "usted" branch.
/// Impersonal subjects (weather "llover", "el tren") and anything unmatched
/// read as third-person singular.
pub fn person_index(subject: &str) -> usize {
    let p = subject.trim().to_lowercase();
    if p.contains("yo") {
        return 0;
    }
    if p.contains("tú") {
        return 1;
    }
    if p.contains("ellos") || p.contains("ellas") || p.contains("ustedes") {
        return 5;
    }
    if p.contains("él") || p.contains("ella") || p.contains("usted")
        || p.contains("llover") || p.contains("tren")
    {
        return 2;
    }
    if p.contains("nosotros") {
        return 3;
    }
    if p.contains("vosotros") {
        return 4;
    }
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::conjugation_tables;

    #[test]
    fn regular_subjunctive_forms() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("hablar", 0, Mood::Subjunctive).as_deref(), Some("hable"));
        assert_eq!(t.conjugate("hablar", 3, Mood::Subjunctive).as_deref(), Some("hablemos"));
        assert_eq!(t.conjugate("vivir", 5, Mood::Subjunctive).as_deref(), Some("vivan"));
        assert_eq!(t.conjugate("hablar", 4, Mood::Subjunctive).as_deref(), Some("habléis"));
    }

    #[test]
    fn regular_indicative_forms() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("comer", 1, Mood::Indicative).as_deref(), Some("comes"));
        assert_eq!(t.conjugate("hablar", 0, Mood::Indicative).as_deref(), Some("hablo"));
        assert_eq!(t.conjugate("vivir", 3, Mood::Indicative).as_deref(), Some("vivimos"));
    }

    #[test]
    fn irregular_table_wins_over_rules() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("hacer", 5, Mood::Subjunctive).as_deref(), Some("hagan"));
        assert_eq!(t.conjugate("ser", 0, Mood::Subjunctive).as_deref(), Some("sea"));
        assert_eq!(t.conjugate("ir", 2, Mood::Indicative).as_deref(), Some("va"));
        // The rules alone would give "haca"/"sea"/"ie"-less forms.
        assert_ne!(t.conjugate("hacer", 0, Mood::Indicative).as_deref(), Some("haco"));
    }

    #[test]
    fn reflexive_marker_is_stripped_before_lookup() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("levantarse", 0, Mood::Subjunctive).as_deref(), Some("levante"));
        assert_eq!(t.conjugate("ponerse", 1, Mood::Subjunctive).as_deref(), Some("pongas"));
        assert_eq!(strip_reflexive("ducharse"), "duchar");
        assert_eq!(strip_reflexive("comer"), "comer");
    }

    #[test]
    fn unresolvable_verb_class_yields_none() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("zzz", 0, Mood::Subjunctive), None);
        assert_eq!(t.conjugate("estornudous", 2, Mood::Indicative), None);
        assert_eq!(t.conjugate("", 0, Mood::Subjunctive), None);
    }

    #[test]
    fn out_of_range_person_yields_none() {
        let t = conjugation_tables();
        assert_eq!(t.conjugate("hablar", 6, Mood::Subjunctive), None);
        assert_eq!(t.conjugate("ser", 6, Mood::Subjunctive), None);
    }

    #[test]
    fn all_forms_covers_both_paths() {
        let t = conjugation_tables();
        let irregular = t.all_forms("tener", Mood::Subjunctive);
        assert_eq!(irregular.len(), PERSON_COUNT);
        assert!(irregular.contains(&"tengamos".to_string()));

        let regular = t.all_forms("bailar", Mood::Indicative);
        assert_eq!(regular.len(), PERSON_COUNT);
        assert!(regular.contains(&"bailáis".to_string()));

        assert!(t.all_forms("zzz", Mood::Subjunctive).is_empty());
    }

    #[test]
    fn person_classification() {
        assert_eq!(person_index("yo"), 0);
        assert_eq!(person_index("Tú"), 1);
        assert_eq!(person_index("nosotros"), 3);
        assert_eq!(person_index("vosotros"), 4);
        assert_eq!(person_index("ellos"), 5);
        assert_eq!(person_index("ellas"), 5);
        assert_eq!(person_index("él"), 2);
        assert_eq!(person_index("ella"), 2);
        assert_eq!(person_index("el tren"), 2);
        assert_eq!(person_index("llover"), 2);
        assert_eq!(person_index("la profesora"), 2);
    }

    #[test]
    fn plural_usted_wins_over_singular() {
        // "ustedes" contains "usted"; the plural branch must be tested first.
        assert_eq!(person_index("ustedes"), 5);
        assert_eq!(person_index("usted"), 2);
    }
}
