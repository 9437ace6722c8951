use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::{Error, Result};

pub const DEFAULT_SUGGEST_URL: &str = "https://suggestqueries.google.com/complete/search";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Settings for a generation run. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_articles: usize,
    pub max_length: usize,
    pub question_pause_ms: u64,
    pub seed: u64,
    pub suggest_url: String,
    pub search_url: String,
    pub model: ModelSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// `ollama` or `dummy`
    pub kind: String,
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `json`, `memory` or `sqlite`
    pub kind: String,
    pub path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_articles: 4,
            max_length: 500,
            question_pause_ms: 500,
            seed: 42,
            suggest_url: DEFAULT_SUGGEST_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            model: ModelSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            kind: "ollama".to_string(),
            url: DEFAULT_OLLAMA_URL.to_string(),
            name: "gpt2".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            kind: "json".to_string(),
            path: "db.json".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Reads `path` when given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_articles == 0 {
            return Err(Error::Config("min_articles must be at least 1".to_string()));
        }
        if self.max_length == 0 {
            return Err(Error::Config("max_length must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn question_pause(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.question_pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.min_articles, 4);
        assert_eq!(config.max_length, 500);
        assert_eq!(config.question_pause().as_millis(), 500);
        assert_eq!(config.seed, 42);
        assert_eq!(config.storage.path, "db.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            min_articles = 2

            [model]
            kind = "dummy"
            "#,
        )
        .unwrap();
        assert_eq!(config.min_articles, 2);
        assert_eq!(config.max_length, 500);
        assert_eq!(config.model.kind, "dummy");
        assert_eq!(config.model.url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.storage.kind, "json");
    }

    #[test]
    fn test_rejects_zero_articles() {
        let result = GeneratorConfig::from_toml_str("min_articles = 0");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_length = 120\nseed = 7").unwrap();

        let config = GeneratorConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.max_length, 120);
        assert_eq!(config.seed, 7);

        let config = GeneratorConfig::load(None).unwrap();
        assert_eq!(config.max_length, 500);
    }
}
