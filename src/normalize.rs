//! Free-text answer canonicalization.
//!
//! Two answers count as equal iff their normalized forms are identical
//! strings. Normalization must be lenient on accents, casing, punctuation
//! and spacing while still being strict on the actual letters: "hable" and
//! "hables" never match.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize a raw answer for comparison.
///
/// Lowercases, NFD-decomposes, then keeps only alphanumeric characters.
/// Combining marks, punctuation (including `¡` / `¿`) and all whitespace
/// fall out of the alphanumeric filter, so the result is a contiguous
/// lowercase letter/digit sequence. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .nfd()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent() {
        for s in ["¡SALGA!", "  Hágan!! ", "coma ", "", "¿Cómo estás?", "año 42"] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }

    #[test]
    fn case_accent_punctuation_whitespace_insensitive() {
        assert_eq!(normalize("¡SALGA!"), normalize("salga"));
        assert_eq!(normalize("coma "), normalize("coma"));
        assert_eq!(normalize("  Hágan!! "), "hagan");
        assert_eq!(normalize("esté"), "este");
    }

    #[test]
    fn whitespace_removed_entirely() {
        assert_eq!(normalize("se levante temprano"), "selevantetemprano");
        assert_eq!(normalize("se  levante   temprano"), normalize("se levante temprano"));
    }

    #[test]
    fn ene_decomposes_to_n() {
        assert_eq!(normalize("niño"), "nino");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("¡¿?!"), "");
    }

    #[test]
    fn different_forms_do_not_collapse() {
        assert_ne!(normalize("hable"), normalize("hables"));
        assert_ne!(normalize("coma"), normalize("come"));
    }
}
