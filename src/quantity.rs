//! Quantity token parsing.
//!
//! Two entry points with different failure behavior:
//! - [`parse_quantity_strict`] yields a number or nothing.
//! - [`parse_quantity_lenient`] additionally keeps the raw token as a display
//!   fallback when it cannot be read numerically, and captures a trailing
//!   unit-like token as a hint.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::QuantityValue;

/// Unicode vulgar fraction glyphs and their ASCII equivalents.
const FRACTION_MAP: &[(char, &str)] = &[
    ('½', "1/2"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Anchored pattern for a whole quantity token: an optional leading whole
/// number, a number or fraction (or a lone vulgar glyph), and an optional
/// trailing unit-like run of letters.
static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<num>(?:\d+\s+)?\d+(?:[\./]\d+)?|[¼½¾⅓⅔⅛⅜⅝⅞])\s*(?P<unit>[a-zA-Zµ%]+)?$")
        .expect("quantity pattern is valid")
});

/// Parse a quantity token into a number.
///
/// Accepts decimals (`1.5`), fractions (`1/2`), unicode vulgar fractions
/// (`¾`), and mixed numbers (`1 1/2`). Interior `-`/`+` are treated as
/// separators so ranges and compounds degrade to a mixed-number read.
/// Returns `None` for anything else; a zero denominator is unparseable,
/// not a panic.
pub fn parse_number(text: &str) -> Option<f64> {
    let mut cleaned = text.trim().to_string();
    if cleaned.is_empty() {
        return None;
    }
    for (glyph, ascii) in FRACTION_MAP {
        cleaned = cleaned.replace(*glyph, ascii);
    }
    let cleaned = cleaned.replace(['-', '+'], " ");
    let cleaned = cleaned.trim();

    if let Ok(value) = cleaned.parse::<f64>() {
        return Some(value);
    }
    if cleaned.matches('/').count() == 1 {
        if let Some(value) = parse_fraction(cleaned) {
            return Some(value);
        }
    }
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    if parts.len() == 2 {
        let whole = parts[0].parse::<f64>().ok()?;
        let frac = parse_number(parts[1])?;
        return Some(whole + frac);
    }
    None
}

fn parse_fraction(text: &str) -> Option<f64> {
    let (numerator, denominator) = text.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Numeric-only variant: a finite value or `None`.
pub fn parse_quantity_strict(text: &str) -> Option<f64> {
    parse_number(text)
}

/// Lenient variant used by the grouper.
///
/// On a clean numeric match returns the value plus a lowercased unit hint
/// when one trailed the number. Otherwise the trimmed original token is kept
/// as a textual fallback so callers still have something to display. Empty
/// input yields `(None, None)`.
pub fn parse_quantity_lenient(text: &str) -> (Option<QuantityValue>, Option<String>) {
    let candidate = text.trim();
    if candidate.is_empty() {
        return (None, None);
    }
    if let Some(caps) = QUANTITY_RE.captures(candidate) {
        if let Some(value) = parse_number(&caps["num"]) {
            let hint = caps.name("unit").map(|m| m.as_str().to_lowercase());
            return (Some(QuantityValue::Number(value)), hint);
        }
    }
    (Some(QuantityValue::Text(candidate.to_string())), None)
}
