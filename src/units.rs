//! Unit canonicalization.
//!
//! The table below is intentionally small: it only folds the tablespoon and
//! teaspoon abbreviation variants the tagger actually emits. Anything else
//! (`g`, `cups`, `ml`, ...) passes through unchanged apart from lowercasing,
//! so `g` stays `g` rather than becoming `grams`.

/// Canonicalize a unit token: lowercase, strip one trailing period, fold
/// known abbreviation variants. Idempotent.
pub fn normalize_unit(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let stripped = lowered.strip_suffix('.').unwrap_or(&lowered);
    match stripped {
        "tbs" | "tb" | "tbl" | "tbls" => "tbsp".to_string(),
        "teas" | "ts" => "tsp".to_string(),
        other => other.to_string(),
    }
}
