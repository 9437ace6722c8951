use std::sync::Arc;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};
use bg_core::{Error, Result};
use bg_core::config::DEFAULT_SUGGEST_URL;
use super::{user_agent, KeywordSource};

/// Google's autocomplete endpoint. The `chrome` output format answers with
/// `[term, [suggestions...], ...]`.
pub struct SuggestClient {
    client: Client,
    base_url: String,
}

impl SuggestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn parse_suggestions(body: &str) -> Result<Vec<String>> {
        let value: Value = serde_json::from_str(body)?;
        let suggestions = value
            .get(1)
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Discovery("suggestion response has no suggestion list".to_string()))?;

        Ok(suggestions
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }
}

impl Default for SuggestClient {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGEST_URL)
    }
}

#[async_trait]
impl KeywordSource for SuggestClient {
    fn source(&self) -> &str {
        "Google Suggest"
    }

    async fn suggestions(&self, term: &str) -> Result<Vec<String>> {
        let body = self.client
            .get(&self.base_url)
            .query(&[("output", "chrome"), ("hl", "en"), ("gl", "us"), ("q", term)])
            .header(USER_AGENT, user_agent::random_chrome())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::parse_suggestions(&body)
    }
}

/// First pipeline stage: search term to keywords. Failures degrade to an empty list.
pub struct KeywordDiscovery {
    source: Arc<dyn KeywordSource>,
}

impl KeywordDiscovery {
    pub fn new(source: Arc<dyn KeywordSource>) -> Self {
        Self { source }
    }

    pub async fn discover(&self, term: &str) -> Vec<String> {
        match self.source.suggestions(term).await {
            Ok(keywords) => {
                info!("🔑 {} returned {} keywords for '{}'", self.source.source(), keywords.len(), term);
                keywords
            }
            Err(e) => {
                warn!("Keyword lookup for '{}' failed: {}", term, e);
                Vec::new()
            }
        }
    }
}
