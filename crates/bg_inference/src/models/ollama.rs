use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use bg_core::{Error, Generation, Result, TextGenerator};
use bg_core::config::DEFAULT_OLLAMA_URL;
use crate::InferenceConfig;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: usize,
    seed: u64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Text generation through an Ollama server's `/api/generate` endpoint.
pub struct OllamaModel {
    client: Arc<Client>,
    base_url: Url,
    model_name: String,
    seed: u64,
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .field("model_name", &self.model_name)
            .field("seed", &self.seed)
            .finish()
    }
}

impl OllamaModel {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let raw_url = config.model_url.unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let mut base_url = Url::parse(&raw_url)
            .map_err(|e| Error::Inference(format!("Invalid model URL '{}': {}", raw_url, e)))?;
        // `join` replaces the last segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Arc::new(Client::new()),
            base_url,
            model_name: config.model_name.unwrap_or_else(|| "gpt2".to_string()),
            seed: config.seed,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join("api/generate")
            .map_err(|e| Error::Inference(format!("Invalid model URL: {}", e)))
    }
}

#[async_trait]
impl TextGenerator for OllamaModel {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn generate(&self, prompt: &str, max_length: usize, num_sequences: usize) -> Result<Vec<Generation>> {
        let endpoint = self.endpoint()?;
        let mut generations = Vec::with_capacity(num_sequences);

        // Ollama returns one completion per request, so each sequence gets its own seed.
        for i in 0..num_sequences {
            let request = GenerateRequest {
                model: &self.model_name,
                prompt,
                stream: false,
                options: GenerateOptions {
                    num_predict: max_length,
                    seed: self.seed.wrapping_add(i as u64),
                },
            };

            let response = self.client
                .post(endpoint.clone())
                .json(&request)
                .send()
                .await?
                .error_for_status()?
                .json::<GenerateResponse>()
                .await?;

            tracing::debug!("Ollama returned {} chars for sequence {}", response.response.len(), i + 1);
            generations.push(Generation {
                generated_text: format!("{}{}", prompt, response.response),
            });
        }

        Ok(generations)
    }
}
