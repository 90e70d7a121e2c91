//! Pipeline orchestration.
//!
//! [`run_pipeline`] is the pure core: it takes the source text together with
//! the already-obtained model outputs and produces the structured result.
//! [`RequestParser`] wraps it with the external tagger/classifier calls.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;

use crate::error::ExtractError;
use crate::grouper::group_ingredients;
use crate::model::{EntityLabel, ParsedRequest, TokenTag};
use crate::recovery::recover_missing;
use crate::spans::merge_tags;
use crate::taggers::{EntityTagger, UrgencyClassifier};
use crate::temporal::resolve_meal_time_at;

/// Run the normalization core over pre-computed model outputs.
///
/// Pure function of (text, tags, urgency, timezone): merge the BIO tags into
/// spans, group spans into ingredient records, backfill missing quantities
/// and units from the raw text, and resolve the meal time. Empty or
/// whitespace-only text is refused.
pub fn run_pipeline(
    text: &str,
    tags: &[TokenTag],
    urgency: &str,
    tz: Tz,
) -> Result<ParsedRequest, ExtractError> {
    run_pipeline_at(Utc::now().with_timezone(&tz), text, tags, urgency)
}

/// Clock-injected variant of [`run_pipeline`] for deterministic callers.
pub fn run_pipeline_at(
    now: DateTime<Tz>,
    text: &str,
    tags: &[TokenTag],
    urgency: &str,
) -> Result<ParsedRequest, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let spans = merge_tags(text, tags);
    let mut ingredients = group_ingredients(&spans);
    let ingredient_spans: Vec<(usize, usize)> = spans
        .iter()
        .filter(|span| span.label == EntityLabel::Ingredient)
        .map(|span| (span.start, span.end))
        .collect();
    recover_missing(text, &ingredient_spans, &mut ingredients);
    let meal_time = resolve_meal_time_at(now, urgency, text, None);

    debug!(
        "parsed {} ingredients, urgency {urgency:?}, meal_time {meal_time:?}",
        ingredients.len()
    );
    Ok(ParsedRequest {
        ingredients,
        urgency: urgency.to_string(),
        meal_time,
    })
}

/// A configured parser holding the external model boundaries.
pub struct RequestParser {
    tagger: Box<dyn EntityTagger>,
    classifier: Box<dyn UrgencyClassifier>,
    tz: Tz,
}

impl RequestParser {
    pub fn builder() -> RequestParserBuilder {
        RequestParserBuilder::default()
    }

    /// Tag and classify `text`, then run the normalization core.
    pub fn parse(&self, text: &str) -> Result<ParsedRequest, ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        let tags = self.tagger.tag(text)?;
        let urgency = self.classifier.classify(text)?;
        run_pipeline(text, &tags, &urgency, self.tz)
    }
}

/// Builder for [`RequestParser`]
#[derive(Default)]
pub struct RequestParserBuilder {
    tagger: Option<Box<dyn EntityTagger>>,
    classifier: Option<Box<dyn UrgencyClassifier>>,
    timezone: Option<String>,
}

impl RequestParserBuilder {
    /// Set the entity tagger boundary
    pub fn tagger(mut self, tagger: impl EntityTagger + 'static) -> Self {
        self.tagger = Some(Box::new(tagger));
        self
    }

    /// Set the urgency classifier boundary
    pub fn classifier(mut self, classifier: impl UrgencyClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Set the target IANA timezone (defaults to America/New_York)
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn build(self) -> Result<RequestParser, ExtractError> {
        let tagger = self
            .tagger
            .ok_or_else(|| ExtractError::Builder("no entity tagger configured".into()))?;
        let classifier = self
            .classifier
            .ok_or_else(|| ExtractError::Builder("no urgency classifier configured".into()))?;
        let timezone = self
            .timezone
            .unwrap_or_else(|| "America/New_York".to_string());
        let tz: Tz = timezone
            .parse()
            .map_err(|_| ExtractError::InvalidTimezone(timezone))?;
        Ok(RequestParser {
            tagger,
            classifier,
            tz,
        })
    }
}
