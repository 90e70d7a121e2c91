//! External model boundaries.
//!
//! The token tagger and the urgency classifier are opaque collaborators: text
//! in, labels out. The pipeline only depends on these traits; production code
//! talks to a model-serving endpoint through the remote implementations,
//! tests inject deterministic stubs.

mod remote;

pub use remote::{RemoteClassifier, RemoteTagger};

use crate::error::ExtractError;
use crate::model::TokenTag;

/// Per-character BIO tagging over the label types INGREDIENT, QTY, UNIT, FORM.
pub trait EntityTagger {
    /// Tag `text`, returning byte-offset BIO labels covering the whole input.
    fn tag(&self, text: &str) -> Result<Vec<TokenTag>, ExtractError>;
}

/// Urgency classification over a closed label set (`tonight`, `this_week`,
/// `flexible` at the time of writing).
pub trait UrgencyClassifier {
    fn classify(&self, text: &str) -> Result<String, ExtractError>;
}
