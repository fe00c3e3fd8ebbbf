//! Small utility helpers used across modules.

use std::time::{SystemTime, UNIX_EPOCH};

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = tpl.to_string();
    for (k, v) in pairs {
        let needle = format!("{{{}}}", k);
        out = out.replace(&needle, v);
    }
    out
}

/// Wall-clock milliseconds since the Unix epoch, for attempt timestamps.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}… ({} bytes total)", head, s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_fills_all_keys() {
        let out = fill_template(
            "Analiza {count} errores de {name}.",
            &[("count", "3"), ("name", "Ana")],
        );
        assert_eq!(out, "Analiza 3 errores de Ana.");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(trunc_for_log("corto", 10), "corto");
        let long = "ándale".repeat(20);
        let out = trunc_for_log(&long, 8);
        assert!(out.starts_with("ándaleán"));
    }
}
