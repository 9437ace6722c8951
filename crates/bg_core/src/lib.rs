pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod storage;
pub mod text;
pub mod types;

pub use config::GeneratorConfig;
pub use error::Error;
pub use models::{Generation, TextGenerator};
pub use progress::{ProgressReporter, Severity, SilentReporter};
pub use storage::BlogStore;
pub use types::{Article, Blog};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{Article, Blog, BlogStore, Error, ProgressReporter, Result, Severity, TextGenerator};
}
