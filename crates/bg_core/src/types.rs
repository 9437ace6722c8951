use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One generated question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Generated content for a single search term. `search` is the storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub search: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub related_questions: Vec<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Blog {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            created_at: Utc::now(),
            keywords: Vec::new(),
            related_questions: Vec::new(),
            articles: Vec::new(),
        }
    }

    pub fn with_keywords(self, keywords: Vec<String>) -> Self {
        Self { keywords, ..self }
    }

    pub fn with_related_questions(self, related_questions: Vec<String>) -> Self {
        Self { related_questions, ..self }
    }

    pub fn with_articles(self, articles: Vec<Article>) -> Self {
        Self { articles, ..self }
    }

    /// Drops the generated articles, keeping keywords and questions for regeneration.
    pub fn cleared(self) -> Self {
        self.with_articles(Vec::new())
    }
}
