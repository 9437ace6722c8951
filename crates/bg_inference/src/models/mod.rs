use std::sync::Arc;
use bg_core::{Error, Result, TextGenerator};
use crate::InferenceConfig;

pub mod dummy;
pub mod ollama;

pub use dummy::DummyModel;
pub use ollama::OllamaModel;

pub const AVAILABLE_MODELS: &[&str] = &["ollama", "dummy"];

/// Builds the text generator named by `kind`.
pub async fn create_model(kind: &str, config: InferenceConfig) -> Result<Arc<dyn TextGenerator>> {
    match kind {
        "ollama" => Ok(Arc::new(OllamaModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new(Some(config)).await?)),
        other => Err(Error::Inference(format!(
            "Unknown model '{}'. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
