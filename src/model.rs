use serde::{Deserialize, Serialize};

/// Entity categories produced by the token classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Ingredient,
    Qty,
    Unit,
    Form,
}

impl EntityLabel {
    /// Parse the `<TYPE>` part of a BIO tag (`B-QTY` -> `Qty`).
    pub fn from_tag_type(ty: &str) -> Option<Self> {
        match ty {
            "INGREDIENT" => Some(EntityLabel::Ingredient),
            "QTY" => Some(EntityLabel::Qty),
            "UNIT" => Some(EntityLabel::Unit),
            "FORM" => Some(EntityLabel::Form),
            _ => None,
        }
    }
}

/// One element of the raw tagger output: a BIO tag (`O`, `B-QTY`, `I-QTY`, ...)
/// over a byte-offset range of the source text. Entries with `start == end`
/// are placeholder positions (special tokens) and are skipped by the merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTag {
    pub start: usize,
    pub end: usize,
    pub tag: String,
}

impl TokenTag {
    pub fn new(start: usize, end: usize, tag: impl Into<String>) -> Self {
        Self {
            start,
            end,
            tag: tag.into(),
        }
    }
}

/// A contiguous, typed character range of the source text.
///
/// Spans coming out of the merger are non-overlapping, sorted by `start`, and
/// satisfy `start < end <= text.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// A parsed quantity: either a finite numeric value or, when the token could
/// not be read as a number, the original text kept as a display fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuantityValue {
    Number(f64),
    Text(String),
}

impl QuantityValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            QuantityValue::Number(n) => Some(*n),
            QuantityValue::Text(_) => None,
        }
    }
}

/// One structured ingredient. `name` is always non-empty; the other fields
/// stay `None` when neither the tagger nor fallback recovery could fill them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRecord {
    pub name: String,
    pub quantity: Option<QuantityValue>,
    pub unit: Option<String>,
    pub form: Option<String>,
}

impl IngredientRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit: None,
            form: None,
        }
    }
}

/// Final pipeline output.
///
/// `meal_time` is an RFC 3339 instant, a plain `YYYY-MM-DD` date for the
/// weekly bucket, or `None` when the urgency carries no default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRequest {
    pub ingredients: Vec<IngredientRecord>,
    pub urgency: String,
    pub meal_time: Option<String>,
}
