use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use bg_core::config::DEFAULT_SEARCH_URL;
use bg_core::text::extract_question;
use bg_core::{ProgressReporter, Result, Severity};
use super::{user_agent, QuestionSource};

/// Scrapes the "People also ask" block of a Google results page.
pub struct GoogleQuestions {
    client: Client,
    base_url: String,
}

impl GoogleQuestions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn parse_questions(html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let (Ok(pair_selector), Ok(span_selector)) = (
            Selector::parse("div.related-question-pair"),
            Selector::parse("span"),
        ) else {
            return Vec::new();
        };

        document
            .select(&pair_selector)
            .filter_map(|pair| {
                let question = match pair.value().attr("data-q") {
                    Some(q) => q.to_string(),
                    None => pair
                        .select(&span_selector)
                        .map(|span| span.text().collect::<String>())
                        .find(|text| !text.trim().is_empty())?,
                };
                let question = question.trim().to_string();
                (!question.is_empty()).then_some(question)
            })
            .collect()
    }
}

impl Default for GoogleQuestions {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

#[async_trait]
impl QuestionSource for GoogleQuestions {
    fn source(&self) -> &str {
        "Google People Also Ask"
    }

    async fn related_questions(&self, keyword: &str) -> Result<Vec<String>> {
        let html = self.client
            .get(&self.base_url)
            .query(&[("q", keyword), ("hl", "en"), ("gl", "us")])
            .header(USER_AGENT, user_agent::random_chrome())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(Self::parse_questions(&html))
    }
}

/// Second pipeline stage: keywords to a deduplicated list of questions.
pub struct QuestionDiscovery {
    source: Arc<dyn QuestionSource>,
    pause: Duration,
}

impl QuestionDiscovery {
    /// `pause` is waited after every question added, to stay under the question
    /// service's abuse detection.
    pub fn new(source: Arc<dyn QuestionSource>, pause: Duration) -> Self {
        Self { source, pause }
    }

    pub async fn discover(&self, keywords: &[String], reporter: &dyn ProgressReporter) -> Vec<String> {
        let mut questions = Vec::new();
        let mut seen = HashSet::new();

        for keyword in keywords {
            let asked = match self.source.related_questions(keyword).await {
                Ok(asked) => asked,
                Err(e) => {
                    warn!("Question lookup for '{}' failed: {}", keyword, e);
                    continue;
                }
            };
            if asked.is_empty() {
                continue;
            }

            reporter.report(&format!("Generate questions for **{}**...", keyword), Severity::Warning);
            for (i, raw) in asked.iter().enumerate() {
                let question = match extract_question(raw) {
                    Ok(question) => question,
                    Err(e) => {
                        debug!("Skipping '{}': {}", raw, e);
                        continue;
                    }
                };
                if !seen.insert(question.to_string()) {
                    continue;
                }

                reporter.report(&format!("{}. *{}*", i + 1, question), Severity::Info);
                questions.push(question.to_string());
                if !self.pause.is_zero() {
                    tokio::time::sleep(self.pause).await;
                }
            }
        }

        info!("❓ Collected {} questions from {} keywords", questions.len(), keywords.len());
        questions
    }
}
