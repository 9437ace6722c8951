use std::sync::Arc;
use anyhow::anyhow;
use clap::Subcommand;
use bg_core::{Blog, BlogStore, Error, GeneratorConfig, ProgressReporter, Result};
use bg_inference::{create_model, ArticleSynthesizer, InferenceConfig};
use crate::discovery::{GoogleQuestions, KeywordDiscovery, QuestionDiscovery, SuggestClient};
use crate::pipeline::{BlogPipeline, PipelineOutcome, PipelinePath};

#[derive(Subcommand, Debug, Clone)]
pub enum BlogCommands {
    /// Generate a blog for a search term, or regenerate its articles if it exists
    Generate {
        /// The search term the blog is about
        search: String,
        /// Number of articles to aim for
        #[arg(long)]
        min_articles: Option<usize>,
        /// Maximum generated length per article, in tokens
        #[arg(long)]
        max_length: Option<usize>,
        /// Seed for question picking and text generation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List stored blogs
    List,
    /// Print the articles of a stored blog
    Show {
        search: String,
    },
    /// Delete every stored blog
    Reset,
}

/// Wires the HTTP discovery clients, the configured model and `store` into a pipeline.
pub async fn build_pipeline(
    config: &GeneratorConfig,
    store: Arc<dyn BlogStore>,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BlogPipeline> {
    let model = create_model(&config.model.kind, InferenceConfig::from_settings(&config.model, config.seed)).await?;
    tracing::info!("🧠 Text generation model initialized (using {})", model.name());

    Ok(BlogPipeline::new(
        KeywordDiscovery::new(Arc::new(SuggestClient::new(config.suggest_url.clone()))),
        QuestionDiscovery::new(Arc::new(GoogleQuestions::new(config.search_url.clone())), config.question_pause()),
        ArticleSynthesizer::new(model, config.seed),
        store,
        reporter,
        config,
    ))
}

pub fn render_blog(blog: &Blog) -> String {
    let mut out = format!("# {}\n\n", blog.search);
    for article in &blog.articles {
        out.push_str(&format!("## {}\n\n{}\n\n<hr>\n\n", article.title, article.content));
    }
    out
}

pub fn render_listing(blogs: &[Blog]) -> String {
    blogs
        .iter()
        .map(|blog| {
            format!(
                "{}\t{} articles\t{}",
                blog.search,
                blog.articles.len(),
                blog.created_at.format("%Y-%m-%d %H:%M")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle_command(
    command: BlogCommands,
    mut config: GeneratorConfig,
    store: Arc<dyn BlogStore>,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<()> {
    match command {
        BlogCommands::Generate { search, min_articles, max_length, seed } => {
            if let Some(min_articles) = min_articles {
                config.min_articles = min_articles;
            }
            if let Some(max_length) = max_length {
                config.max_length = max_length;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            config.validate()?;

            let mut pipeline = build_pipeline(&config, store, reporter).await?;
            match pipeline.generate(&search).await? {
                PipelineOutcome::Persisted { blog, path } => {
                    let verb = match path {
                        PipelinePath::Created => "Created",
                        PipelinePath::Updated => "Updated",
                    };
                    println!("{} blog '{}' ({} articles)\n", verb, blog.search, blog.articles.len());
                    print!("{}", render_blog(&blog));
                }
                PipelineOutcome::Halted { stage } => {
                    return Err(Error::External(anyhow!(
                        "Blog generation for '{}' stopped: {} did not complete",
                        search,
                        stage
                    )));
                }
            }
        }
        BlogCommands::List => {
            let blogs = store.list().await?;
            if blogs.is_empty() {
                println!("No blogs yet. Create one with `generate <search>`.");
            } else {
                println!("{}", render_listing(&blogs));
            }
        }
        BlogCommands::Show { search } => {
            let blog = store
                .get(&search)
                .await?
                .ok_or_else(|| Error::Storage(format!("No blog stored for: {}", search)))?;
            print!("{}", render_blog(&blog));
        }
        BlogCommands::Reset => {
            store.clear().await?;
            println!("All blogs deleted");
        }
    }
    Ok(())
}
