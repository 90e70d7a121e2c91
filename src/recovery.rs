//! Fallback quantity/unit recovery.
//!
//! The tagger sometimes emits an INGREDIENT span with no usable QTY/UNIT next
//! to it. For records still missing data after grouping, this pass re-scans a
//! bounded token window of the raw text around the ingredient mention and
//! backfills from the closest quantity-shaped match.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{IngredientRecord, QuantityValue};
use crate::quantity::parse_quantity_strict;
use crate::units::normalize_unit;

/// Tokens either side of the ingredient mention that stay in scope.
const WINDOW_RADIUS: usize = 12;

/// Tolerance below which an existing numeric quantity is considered equal to
/// the window match and left alone.
const QTY_TOLERANCE: f64 = 1e-6;

/// Loose quantity+unit pattern for free-text scanning (unanchored, unlike the
/// quantity parser's token pattern).
static WINDOW_QTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<num>(?:\d+[\d/.\-]*|\d*\s*\d+/\d+|[¼½¾⅓⅔⅛⅜⅝⅞]))\s*(?P<unit>[a-zA-Zµ]+\.?)?")
        .expect("window quantity pattern is valid")
});

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("token pattern is valid"));

/// Patch quantity/unit gaps in place.
///
/// `ingredient_spans` are the (start, end) offsets of the INGREDIENT spans, in
/// the same order as `ingredients`. Records that already carry both a quantity
/// and a unit are never touched. A window match overwrites a numeric quantity
/// that differs beyond [`QTY_TOLERANCE`] and overwrites the unit even when a
/// different one is present; at this stage the text-proximity match is treated
/// as more authoritative than the partial data that triggered recovery.
pub fn recover_missing(
    text: &str,
    ingredient_spans: &[(usize, usize)],
    ingredients: &mut [IngredientRecord],
) {
    if ingredients.is_empty() || ingredient_spans.is_empty() {
        return;
    }
    let tokens: Vec<(usize, usize)> = TOKEN_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    if tokens.is_empty() {
        return;
    }

    let count = ingredients.len().min(ingredient_spans.len());
    for idx in 0..count {
        let item = &mut ingredients[idx];
        let has_unit = item.unit.as_deref().is_some_and(|u| !u.is_empty());
        if item.quantity.is_some() && has_unit {
            continue;
        }
        let (span_start, _) = ingredient_spans[idx];
        let Some(token_index) = tokens
            .iter()
            .position(|&(start, end)| start <= span_start && span_start < end)
        else {
            continue;
        };

        let start_idx = token_index.saturating_sub(WINDOW_RADIUS);
        let end_idx = (token_index + WINDOW_RADIUS + 1).min(tokens.len());
        let window_start = tokens[start_idx].0;
        let window_end = tokens[end_idx - 1].1;
        let window_text = &text[window_start..window_end];

        // closest match to the ingredient mention wins over distant noise
        let best = WINDOW_QTY_RE
            .captures_iter(window_text)
            .min_by_key(|caps| {
                let match_start = window_start + caps.get(0).map_or(0, |m| m.start());
                match_start.abs_diff(span_start)
            });
        let Some(best) = best else {
            continue;
        };

        if let Some(qty_val) = parse_quantity_strict(&best["num"]) {
            let replace = match &item.quantity {
                None => true,
                Some(QuantityValue::Number(existing)) => (existing - qty_val).abs() > QTY_TOLERANCE,
                // a textual residual is kept as-is
                Some(QuantityValue::Text(_)) => false,
            };
            if replace {
                debug!("recovered quantity {qty_val} for {:?}", item.name);
                item.quantity = Some(QuantityValue::Number(qty_val));
            }
        }
        if let Some(unit_match) = best.name("unit") {
            let normalized = normalize_unit(unit_match.as_str());
            if !normalized.is_empty() {
                // last-match-wins here, unlike the grouper
                item.unit = Some(normalized);
            }
        }
    }
}
