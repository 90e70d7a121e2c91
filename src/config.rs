use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Parser configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ParserConfig {
    /// IANA timezone the request is fulfilled in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Base URL of the model-serving endpoint (`/tag` and `/classify`)
    pub model_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            model_url: None,
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ParserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXTRACT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXTRACT__MODEL_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_EXTRACT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
