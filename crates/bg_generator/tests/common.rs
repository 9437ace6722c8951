#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use bg_core::{Blog, BlogStore, Error, Generation, GeneratorConfig, ProgressReporter, Result, Severity, TextGenerator};
use bg_generator::discovery::{KeywordDiscovery, KeywordSource, QuestionDiscovery, QuestionSource};
use bg_generator::BlogPipeline;
use bg_inference::ArticleSynthesizer;
use bg_storage::MemoryStorage;

pub struct FakeKeywords {
    pub keywords: Vec<String>,
    pub calls: AtomicUsize,
}

impl FakeKeywords {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl KeywordSource for FakeKeywords {
    fn source(&self) -> &str {
        "fake keywords"
    }

    async fn suggestions(&self, _term: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.keywords.clone())
    }
}

pub struct FakeQuestions {
    pub answers: HashMap<String, Vec<String>>,
    pub calls: AtomicUsize,
}

impl FakeQuestions {
    pub fn new(answers: Vec<(&str, Vec<&str>)>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(k, qs)| (k.to_string(), qs.into_iter().map(str::to_string).collect()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuestionSource for FakeQuestions {
    fn source(&self) -> &str {
        "fake questions"
    }

    async fn related_questions(&self, keyword: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answers.get(keyword).cloned().unwrap_or_default())
    }
}

/// Echoes the prompt followed by `body_len` letters.
#[derive(Debug)]
pub struct FakeModel {
    pub body_len: usize,
    pub calls: AtomicUsize,
}

impl FakeModel {
    pub fn new(body_len: usize) -> Self {
        Self { body_len, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl TextGenerator for FakeModel {
    fn name(&self) -> &str {
        "fake"
    }

    async fn generate(&self, prompt: &str, _max_length: usize, num_sequences: usize) -> Result<Vec<Generation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((0..num_sequences)
            .map(|_| Generation { generated_text: format!("{}{}", prompt, "x".repeat(self.body_len)) })
            .collect())
    }
}

/// Memory store that counts writes.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStorage,
    pub inserts: AtomicUsize,
    pub updates: AtomicUsize,
}

#[async_trait]
impl BlogStore for RecordingStore {
    async fn get(&self, search: &str) -> Result<Option<Blog>> {
        self.inner.get(search).await
    }

    async fn insert(&self, blog: &Blog) -> Result<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(blog).await
    }

    async fn update(&self, blog: &Blog, search: &str) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(blog, search).await
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        self.inner.list().await
    }

    async fn clear(&self) -> Result<()> {
        Err(Error::Storage("not used in tests".to_string()))
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingReporter {
    pub fn with_severity(&self, severity: Severity) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, s)| *s == severity)
            .map(|(m, _)| m.clone())
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str, severity: Severity) {
        self.messages.lock().unwrap().push((message.to_string(), severity));
    }
}

pub struct Harness {
    pub keywords: Arc<FakeKeywords>,
    pub questions: Arc<FakeQuestions>,
    pub model: Arc<FakeModel>,
    pub store: Arc<RecordingStore>,
    pub reporter: Arc<RecordingReporter>,
}

impl Harness {
    pub fn new(keywords: FakeKeywords, questions: FakeQuestions, model: FakeModel) -> Self {
        Self {
            keywords: Arc::new(keywords),
            questions: Arc::new(questions),
            model: Arc::new(model),
            store: Arc::new(RecordingStore::default()),
            reporter: Arc::new(RecordingReporter::default()),
        }
    }

    pub fn pipeline(&self, min_articles: usize) -> BlogPipeline {
        let config = GeneratorConfig {
            min_articles,
            ..GeneratorConfig::default()
        };
        BlogPipeline::new(
            KeywordDiscovery::new(self.keywords.clone()),
            QuestionDiscovery::new(self.questions.clone(), Duration::ZERO),
            ArticleSynthesizer::new(self.model.clone(), config.seed),
            self.store.clone(),
            self.reporter.clone(),
            &config,
        )
    }

    pub fn inserts(&self) -> usize {
        self.store.inserts.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.store.updates.load(Ordering::SeqCst)
    }
}
