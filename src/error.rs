use thiserror::Error;

/// Errors that can occur while parsing a request
///
/// Quantity parse failures and unresolvable time phrases are deliberately not
/// represented here: those degrade to `None` inside the pipeline and never
/// abort a parse.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input text was empty or whitespace-only
    #[error("Input text must be a non-empty string")]
    EmptyInput,

    /// The entity tagger returned an unusable response
    #[error("Tagger error: {0}")]
    Tagger(String),

    /// The urgency classifier returned an unusable response
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Unknown IANA timezone identifier
    #[error("Invalid timezone identifier: {0}")]
    InvalidTimezone(String),

    /// Parser construction error
    #[error("Builder error: {0}")]
    Builder(String),

    /// Transport failure talking to a model-serving endpoint
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
