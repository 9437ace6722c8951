use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A single completion. `generated_text` starts with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub generated_text: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Continue `prompt`, producing `num_sequences` independent completions of at most
    /// `max_length` tokens.
    async fn generate(&self, prompt: &str, max_length: usize, num_sequences: usize) -> Result<Vec<Generation>>;
}
