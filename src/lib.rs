//! Structured ingredient and meal-time extraction from free-form recipe and
//! shopping-request text.
//!
//! The heavy lifting happens after the models have run: noisy per-character
//! BIO tags from an external token classifier are merged into entity spans,
//! grouped into ingredient records, patched from the raw text where the
//! tagger missed quantities or units, and combined with an urgency label into
//! a resolved meal time.
//!
//! ```no_run
//! use recipe_extract::{parse_tagged, TokenTag};
//!
//! let text = "need 200 g penne tonight";
//! let tags = vec![
//!     TokenTag::new(5, 8, "B-QTY"),
//!     TokenTag::new(9, 10, "B-UNIT"),
//!     TokenTag::new(11, 16, "B-INGREDIENT"),
//! ];
//! let result = parse_tagged(text, &tags, "tonight", "America/New_York")?;
//! assert_eq!(result.ingredients[0].name, "penne");
//! # Ok::<(), recipe_extract::ExtractError>(())
//! ```

pub mod config;
pub mod error;
pub mod grouper;
pub mod model;
pub mod pipeline;
pub mod quantity;
pub mod recovery;
pub mod spans;
pub mod taggers;
pub mod temporal;
pub mod units;

use chrono_tz::Tz;

pub use config::ParserConfig;
pub use error::ExtractError;
pub use model::{
    EntityLabel, EntitySpan, IngredientRecord, ParsedRequest, QuantityValue, TokenTag,
};
pub use pipeline::{run_pipeline, run_pipeline_at, RequestParser, RequestParserBuilder};
pub use taggers::{EntityTagger, RemoteClassifier, RemoteTagger, UrgencyClassifier};

/// Run the normalization core over pre-computed model outputs.
///
/// This is the pure-function surface of the crate:
/// (text, tagger output, classifier output, timezone identifier) -> result.
pub fn parse_tagged(
    text: &str,
    tags: &[TokenTag],
    urgency: &str,
    timezone: &str,
) -> Result<ParsedRequest, ExtractError> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ExtractError::InvalidTimezone(timezone.to_string()))?;
    pipeline::run_pipeline(text, tags, urgency, tz)
}
