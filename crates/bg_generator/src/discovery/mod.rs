use async_trait::async_trait;
use bg_core::Result;

pub mod keywords;
pub mod questions;
pub mod user_agent;

pub use keywords::{KeywordDiscovery, SuggestClient};
pub use questions::{GoogleQuestions, QuestionDiscovery};

/// Autocomplete-style service turning a search term into related keywords.
#[async_trait]
pub trait KeywordSource: Send + Sync {
    /// Returns the name of the service
    fn source(&self) -> &str;

    /// Suggestions for `term`, in provider order
    async fn suggestions(&self, term: &str) -> Result<Vec<String>>;
}

/// "People also ask"-style service returning questions related to a keyword.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Returns the name of the service
    fn source(&self) -> &str;

    /// Raw question strings, possibly followed by page boilerplate
    async fn related_questions(&self, keyword: &str) -> Result<Vec<String>>;
}
