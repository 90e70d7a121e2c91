use std::env;
use std::time::Duration;

use log::debug;

use recipe_extract::{ParserConfig, RemoteClassifier, RemoteTagger, RequestParser};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let text = args
        .get(1)
        .ok_or("Please provide the request text as an argument")?;

    let config = ParserConfig::load()?;
    debug!("loaded config: {config:?}");
    let model_url = config.model_url.as_deref().ok_or(
        "No model endpoint configured. Set RECIPE_EXTRACT__MODEL_URL or model_url in config.toml",
    )?;
    let timeout = Duration::from_secs(config.timeout);

    let parser = RequestParser::builder()
        .tagger(RemoteTagger::new(model_url, timeout)?)
        .classifier(RemoteClassifier::new(model_url, timeout)?)
        .timezone(config.timezone.as_str())
        .build()?;

    let result = parser.parse(text)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
