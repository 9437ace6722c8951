pub mod cli;
pub mod discovery;
pub mod logging;
pub mod pipeline;

pub use cli::{handle_command, BlogCommands};
pub use discovery::{KeywordDiscovery, KeywordSource, QuestionDiscovery, QuestionSource};
pub use pipeline::{BlogPipeline, PipelineOutcome, PipelinePath, Stage};

pub mod prelude {
    pub use super::discovery::{KeywordSource, QuestionSource};
    pub use super::pipeline::{BlogPipeline, PipelineOutcome};
    pub use bg_core::{Blog, Error, Result};
}
