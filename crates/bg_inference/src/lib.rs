use bg_core::config::ModelSettings;

pub mod models;
pub mod synthesizer;

/// Settings handed to a text generation backend.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model_url: Option<String>,
    pub model_name: Option<String>,
    pub seed: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_url: None,
            model_name: None,
            seed: 42,
        }
    }
}

impl InferenceConfig {
    pub fn from_settings(settings: &ModelSettings, seed: u64) -> Self {
        Self {
            model_url: Some(settings.url.clone()),
            model_name: Some(settings.name.clone()),
            seed,
        }
    }
}

pub mod prelude {
    pub use super::InferenceConfig;
    pub use super::models::create_model;
    pub use super::synthesizer::{ArticleSynthesizer, Synthesis};
    pub use bg_core::{Article, Error, Generation, Result, TextGenerator};
}

pub use models::create_model;
pub use synthesizer::{ArticleSynthesizer, Synthesis};
