use std::collections::HashMap;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use bg_core::{Blog, BlogStore, Result};
use crate::backends::memory::MemoryStore;
use crate::StorageBackend;

/// On-disk layout: one JSON document holding every blog as `{"blogs": [...]}`.
#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    blogs: Table,
}

/// The `blogs` table is written as a list. Files kept by a TinyDB store hold an
/// id-keyed map (`{"1": {...}}`) instead, which is read in id order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Table {
    List(Vec<Blog>),
    Keyed(HashMap<String, Blog>),
}

impl Default for Table {
    fn default() -> Self {
        Table::List(Vec::new())
    }
}

impl Table {
    fn into_blogs(self) -> Vec<Blog> {
        match self {
            Table::List(blogs) => blogs,
            Table::Keyed(map) => {
                let mut entries: Vec<(String, Blog)> = map.into_iter().collect();
                entries.sort_by(|(a, _), (b, _)| {
                    match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(x), Ok(y)) => x.cmp(&y),
                        _ => a.cmp(b),
                    }
                });
                entries.into_iter().map(|(_, blog)| blog).collect()
            }
        }
    }
}

/// Keeps all blogs in a single JSON file, rewritten after every change.
pub struct JsonFileStorage {
    path: PathBuf,
    store: RwLock<MemoryStore>,
}

impl JsonFileStorage {
    pub async fn new_with_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let blogs = match tokio::fs::read_to_string(path).await {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str::<Document>(&raw)?.blogs.into_blogs(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded {} blogs from {}", blogs.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            store: RwLock::new(MemoryStore::from_blogs(blogs)),
        })
    }

    async fn flush(&self, store: &MemoryStore) -> Result<()> {
        let document = serde_json::json!({ "blogs": store.blogs() });
        let raw = serde_json::to_string_pretty(&document)?;

        // Write next to the target and rename, so a crash never leaves half a file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    fn get_error_message() -> &'static str {
        "JSON database file should be readable and writable"
    }

    async fn open(path: &Path) -> Result<Self> {
        Self::new_with_path(path).await
    }
}

#[async_trait]
impl BlogStore for JsonFileStorage {
    async fn get(&self, search: &str) -> Result<Option<Blog>> {
        Ok(self.store.read().await.get(search))
    }

    async fn insert(&self, blog: &Blog) -> Result<()> {
        let mut store = self.store.write().await;
        let mut next = store.clone();
        next.insert(blog)?;
        // Memory only changes once the file has been written.
        self.flush(&next).await?;
        *store = next;
        Ok(())
    }

    async fn update(&self, blog: &Blog, search: &str) -> Result<()> {
        let mut store = self.store.write().await;
        let mut next = store.clone();
        next.update(blog, search)?;
        self.flush(&next).await?;
        *store = next;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        Ok(self.store.read().await.blogs().to_vec())
    }

    async fn clear(&self) -> Result<()> {
        let mut store = self.store.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        store.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bg_core::Article;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_json_storage_persists() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("blogs").join("db.json");

        let storage = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        let blog = Blog::new("tesla")
            .with_keywords(vec!["tesla model 3".to_string()])
            .with_related_questions(vec!["What is tesla model 3?".to_string()])
            .with_articles(vec![Article {
                title: "What is tesla model 3?".to_string(),
                content: "An electric car.".to_string(),
            }]);
        storage.insert(&blog).await.unwrap();
        drop(storage);

        let reopened = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        assert_eq!(reopened.get("tesla").await.unwrap(), Some(blog.clone()));

        reopened.update(&blog.clone().cleared(), "tesla").await.unwrap();
        let raw = std::fs::read_to_string(&db_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["blogs"][0]["search"], "tesla");
        assert!(value["blogs"][0]["articles"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_storage_clear_removes_file() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("db.json");

        let storage = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        storage.insert(&Blog::new("rust")).await.unwrap();
        assert!(db_path.exists());

        storage.clear().await.unwrap();
        assert!(!db_path.exists());
        assert!(storage.list().await.unwrap().is_empty());

        // Clearing twice is fine
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("db.json");
        let storage = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        storage.insert(&Blog::new("rust")).await.unwrap();

        // A directory in place of the temp file makes every write fail
        let tmp_path = db_path.with_extension("json.tmp");
        std::fs::create_dir(&tmp_path).unwrap();

        assert!(storage.insert(&Blog::new("tesla")).await.is_err());
        assert!(storage.get("tesla").await.unwrap().is_none());
        assert_eq!(storage.list().await.unwrap().len(), 1);

        let updated = Blog::new("rust").with_keywords(vec!["rust book".to_string()]);
        assert!(storage.update(&updated, "rust").await.is_err());
        assert!(storage.get("rust").await.unwrap().unwrap().keywords.is_empty());

        std::fs::remove_dir(&tmp_path).unwrap();
        storage.insert(&Blog::new("tesla")).await.unwrap();
        let reopened = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        assert!(reopened.get("tesla").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reads_id_keyed_table() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("db.json");
        let blog = |search: &str| serde_json::json!({
            "search": search,
            "created_at": "2024-01-01T00:00:00Z",
            "keywords": [],
            "related_questions": [],
            "articles": []
        });
        let raw = serde_json::json!({
            "blogs": { "10": blog("coffee"), "2": blog("rust"), "1": blog("tesla") }
        });
        std::fs::write(&db_path, raw.to_string()).unwrap();

        let storage = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        let searches: Vec<String> = storage.list().await.unwrap().into_iter().map(|b| b.search).collect();
        assert_eq!(searches, vec!["tesla", "rust", "coffee"]);

        // Rewritten in list form on the next change
        storage.insert(&Blog::new("tea")).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&db_path).unwrap()).unwrap();
        assert_eq!(value["blogs"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_json_storage_empty_file() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("db.json");
        std::fs::write(&db_path, "").unwrap();

        let storage = JsonFileStorage::new_with_path(&db_path).await.unwrap();
        assert!(storage.list().await.unwrap().is_empty());
    }
}
