use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Parser;
use tracing::{info, Level};
use bg_core::{GeneratorConfig, ProgressReporter, Result};
use bg_generator::logging::{init_logging, ConsoleReporter, TracingReporter};
use bg_generator::{handle_command, BlogCommands};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate question-and-answer blogs from a search term", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "BLOGEN_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "BLOGEN_STORAGE", help = "Storage backend: json (default), memory, sqlite")]
    storage: Option<String>,
    /// Database file used by the json and sqlite backends
    #[arg(long, env = "BLOGEN_DB_PATH")]
    db_path: Option<PathBuf>,
    #[arg(long, env = "BLOGEN_MODEL", help = "Model to use for text generation. Available models: ollama (default), dummy")]
    model: Option<String>,
    #[arg(long, env = "BLOGEN_MODEL_URL")]
    model_url: Option<String>,
    #[arg(long, env = "BLOGEN_MODEL_NAME")]
    model_name: Option<String>,
    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
    /// Send progress messages to the log instead of the terminal
    #[arg(long)]
    log_progress: bool,
    #[command(subcommand)]
    command: BlogCommands,
}

impl Cli {
    fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(self.config.as_deref())?;
        if let Some(storage) = &self.storage {
            config.storage.kind = storage.clone();
        }
        if let Some(db_path) = &self.db_path {
            config.storage.path = db_path.display().to_string();
        }
        if let Some(model) = &self.model {
            config.model.kind = model.clone();
        }
        if let Some(model_url) = &self.model_url {
            config.model.url = model_url.clone();
        }
        if let Some(model_name) = &self.model_name {
            config.model.name = model_name.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match (cli.verbose, cli.log_progress) {
        (true, _) => Level::DEBUG,
        (false, true) => Level::INFO,
        (false, false) => Level::WARN,
    };
    init_logging(level);

    let config = cli.resolve_config()?;
    let store = bg_storage::create_storage(&config.storage.kind, Path::new(&config.storage.path)).await?;
    info!("💾 Storage initialized (using {} at {})", config.storage.kind, config.storage.path);

    let reporter: Arc<dyn ProgressReporter> = if cli.log_progress {
        Arc::new(TracingReporter::new().with_prefix("[blogen]".to_string()))
    } else {
        Arc::new(ConsoleReporter)
    };
    handle_command(cli.command, config, store, reporter).await
}
