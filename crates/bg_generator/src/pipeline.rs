//! Blog generation: search term → keywords → questions → articles → store.
//!
//! Every stage takes the blog by value and hands back a new one, so a halted run
//! never leaves a half-built blog behind. Nothing is written until the last stage.

use std::fmt;
use std::sync::Arc;
use tracing::info;
use bg_core::{Blog, BlogStore, GeneratorConfig, ProgressReporter, Result, Severity};
use bg_inference::ArticleSynthesizer;
use crate::discovery::{KeywordDiscovery, QuestionDiscovery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    KeywordDiscovery,
    QuestionDiscovery,
    ArticleSynthesis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::KeywordDiscovery => "keyword discovery",
            Stage::QuestionDiscovery => "question discovery",
            Stage::ArticleSynthesis => "article synthesis",
        };
        f.write_str(name)
    }
}

/// Whether a run inserted a new blog or regenerated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePath {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Persisted { blog: Blog, path: PipelinePath },
    /// `stage` produced nothing; no write happened.
    Halted { stage: Stage },
}

pub struct BlogPipeline {
    keywords: KeywordDiscovery,
    questions: QuestionDiscovery,
    synthesizer: ArticleSynthesizer,
    store: Arc<dyn BlogStore>,
    reporter: Arc<dyn ProgressReporter>,
    min_articles: usize,
    max_length: usize,
    selection: Option<String>,
}

impl BlogPipeline {
    pub fn new(
        keywords: KeywordDiscovery,
        questions: QuestionDiscovery,
        synthesizer: ArticleSynthesizer,
        store: Arc<dyn BlogStore>,
        reporter: Arc<dyn ProgressReporter>,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            keywords,
            questions,
            synthesizer,
            store,
            reporter,
            min_articles: config.min_articles,
            max_length: config.max_length,
            selection: None,
        }
    }

    /// Search term of the blog most recently written by this pipeline.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// Regenerates the articles of the blog stored under `search`, or builds a new
    /// blog when there is none.
    pub async fn generate(&mut self, search: &str) -> Result<PipelineOutcome> {
        match self.store.get(search).await? {
            Some(existing) => {
                self.reporter.report("Blog found! skip paa", Severity::Info);
                self.update(existing).await
            }
            None => self.create(search).await,
        }
    }

    /// Runs every stage for a new search term and inserts the result.
    pub async fn create(&mut self, search: &str) -> Result<PipelineOutcome> {
        info!("📝 Creating blog for '{}'", search);
        let blog = Blog::new(search);

        let Some(blog) = self.discover_keywords(blog).await else {
            return Ok(self.halt(Stage::KeywordDiscovery));
        };
        self.completed(Stage::KeywordDiscovery);

        let Some(blog) = self.discover_questions(blog).await else {
            return Ok(self.halt(Stage::QuestionDiscovery));
        };
        self.completed(Stage::QuestionDiscovery);

        let Some(blog) = self.synthesize_articles(blog).await else {
            return Ok(self.halt(Stage::ArticleSynthesis));
        };
        self.completed(Stage::ArticleSynthesis);

        self.store.insert(&blog).await?;
        self.reporter.report("**Blog saved!**", Severity::Success);
        Ok(self.persisted(blog, PipelinePath::Created))
    }

    /// Drops the existing articles and writes new ones from the stored questions.
    /// Keywords and questions are kept as they are.
    pub async fn update(&mut self, existing: Blog) -> Result<PipelineOutcome> {
        info!("♻️ Regenerating articles for '{}'", existing.search);
        let blog = existing.cleared();

        let blog = match self.synthesize_articles(blog.clone()).await {
            Some(blog) => {
                self.completed(Stage::ArticleSynthesis);
                blog
            }
            None => {
                self.reporter.report(
                    &format!("{} produced no articles", Stage::ArticleSynthesis),
                    Severity::Warning,
                );
                blog
            }
        };

        self.store.update(&blog, &blog.search).await?;
        self.reporter.report("**Blog updated!**", Severity::Success);
        Ok(self.persisted(blog, PipelinePath::Updated))
    }

    async fn discover_keywords(&self, blog: Blog) -> Option<Blog> {
        let keywords = self.keywords.discover(&blog.search).await;
        if keywords.is_empty() {
            return None;
        }
        self.reporter.report(&format!("**keywords**: {}", keywords.join(", ")), Severity::Info);
        Some(blog.with_keywords(keywords))
    }

    async fn discover_questions(&self, blog: Blog) -> Option<Blog> {
        let questions = self.questions.discover(&blog.keywords, self.reporter.as_ref()).await;
        if questions.is_empty() {
            return None;
        }
        Some(blog.with_related_questions(questions))
    }

    async fn synthesize_articles(&self, blog: Blog) -> Option<Blog> {
        let synthesis = self
            .synthesizer
            .synthesize(&blog.related_questions, self.min_articles, self.max_length, self.reporter.as_ref())
            .await;
        if synthesis.articles.is_empty() {
            return None;
        }
        Some(blog.with_articles(synthesis.articles))
    }

    fn completed(&self, stage: Stage) {
        self.reporter.report(&format!("**{} completed!**", stage), Severity::Success);
    }

    fn halt(&self, stage: Stage) -> PipelineOutcome {
        info!("🛑 Pipeline halted at {}", stage);
        self.reporter.report(&format!("{} did not complete", stage), Severity::Error);
        PipelineOutcome::Halted { stage }
    }

    fn persisted(&mut self, blog: Blog, path: PipelinePath) -> PipelineOutcome {
        info!("✅ Blog '{}' stored with {} articles", blog.search, blog.articles.len());
        self.selection = Some(blog.search.clone());
        PipelineOutcome::Persisted { blog, path }
    }
}
