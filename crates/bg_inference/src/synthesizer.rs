use std::fmt;
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use bg_core::text::{is_long_enough, strip_markup, truncate_to_sentence};
use bg_core::{Article, ProgressReporter, Severity, TextGenerator};

/// Completions requested per question. Only the first is used.
const SEQUENCES_PER_PROMPT: usize = 2;

/// Articles accepted in one run, plus the questions that were never tried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    pub articles: Vec<Article>,
    pub remaining: Vec<String>,
}

/// Turns candidate questions into articles with a text generation model.
pub struct ArticleSynthesizer {
    model: Arc<dyn TextGenerator>,
    seed: u64,
}

impl fmt::Debug for ArticleSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleSynthesizer")
            .field("model", &self.model.name())
            .field("seed", &self.seed)
            .finish()
    }
}

impl ArticleSynthesizer {
    pub fn new(model: Arc<dyn TextGenerator>, seed: u64) -> Self {
        Self { model, seed }
    }

    /// Draws questions at random until `min_articles` articles were accepted or every
    /// candidate was tried once. Content that is too short after cleanup is dropped.
    pub async fn synthesize(
        &self,
        candidates: &[String],
        min_articles: usize,
        max_length: usize,
        reporter: &dyn ProgressReporter,
    ) -> Synthesis {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pool = candidates.to_vec();
        let mut articles = Vec::new();

        reporter.report("**Generate articles...**", Severity::Warning);
        info!("🤖 Generating up to {} articles from {} questions with {}", min_articles, pool.len(), self.model.name());

        while articles.len() < min_articles && !pool.is_empty() {
            let title = pool.swap_remove(rng.gen_range(0..pool.len()));

            let content = match self.generate_content(&title, max_length).await {
                Ok(content) => content,
                Err(e) => {
                    warn!("Generation failed for '{}': {}", title, e);
                    continue;
                }
            };

            if !is_long_enough(&content) {
                debug!("Discarded '{}': {} chars after cleanup", title, content.chars().count());
                continue;
            }

            reporter.report(&format!("new article : *{}*", title), Severity::Info);
            articles.push(Article { title, content });
        }

        info!("✨ Accepted {} articles, {} questions untried", articles.len(), pool.len());
        Synthesis { articles, remaining: pool }
    }

    async fn generate_content(&self, prompt: &str, max_length: usize) -> bg_core::Result<String> {
        let generations = self.model.generate(prompt, max_length, SEQUENCES_PER_PROMPT).await?;
        let first = generations
            .into_iter()
            .next()
            .ok_or_else(|| bg_core::Error::Inference("model returned no sequences".to_string()))?;

        let body = first
            .generated_text
            .strip_prefix(prompt)
            .unwrap_or(&first.generated_text);
        let cleaned = strip_markup(body);
        Ok(truncate_to_sentence(&cleaned).to_string())
    }
}
