//! HTTP clients for the model-serving endpoints.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::model::TokenTag;
use crate::taggers::{EntityTagger, UrgencyClassifier};

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct TagResponse {
    tags: Vec<TokenTag>,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    label: String,
}

/// Blocking client for a `POST {base_url}/tag` endpoint returning
/// `{"tags": [{"start": .., "end": .., "tag": ".."}]}`.
pub struct RemoteTagger {
    client: Client,
    endpoint: String,
}

impl RemoteTagger {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/tag", base_url.trim_end_matches('/')),
        })
    }
}

impl EntityTagger for RemoteTagger {
    fn tag(&self, text: &str) -> Result<Vec<TokenTag>, ExtractError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TextRequest { text })
            .send()?;
        if !response.status().is_success() {
            return Err(ExtractError::Tagger(format!(
                "tagging request failed with status {}",
                response.status()
            )));
        }
        let body: TagResponse = response.json()?;
        debug!("tagger returned {} tags", body.tags.len());
        Ok(body.tags)
    }
}

/// Blocking client for a `POST {base_url}/classify` endpoint returning
/// `{"label": ".."}`.
pub struct RemoteClassifier {
    client: Client,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/classify", base_url.trim_end_matches('/')),
        })
    }
}

impl UrgencyClassifier for RemoteClassifier {
    fn classify(&self, text: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TextRequest { text })
            .send()?;
        if !response.status().is_success() {
            return Err(ExtractError::Classifier(format!(
                "classification request failed with status {}",
                response.status()
            )));
        }
        let body: ClassifyResponse = response.json()?;
        Ok(body.label)
    }
}
