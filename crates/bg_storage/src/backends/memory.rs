use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use bg_core::{Blog, BlogStore, Error, Result};
use crate::StorageBackend;

/// Blog list shared by the memory and JSON file backends.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blogs: Vec<Blog>,
}

impl MemoryStore {
    pub fn from_blogs(blogs: Vec<Blog>) -> Self {
        Self { blogs }
    }

    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    pub fn get(&self, search: &str) -> Option<Blog> {
        self.blogs.iter().find(|b| b.search == search).cloned()
    }

    pub fn insert(&mut self, blog: &Blog) -> Result<()> {
        if self.blogs.iter().any(|b| b.search == blog.search) {
            return Err(Error::Storage(format!("Blog already exists: {}", blog.search)));
        }
        self.blogs.push(blog.clone());
        Ok(())
    }

    pub fn update(&mut self, blog: &Blog, search: &str) -> Result<()> {
        let existing = self.blogs
            .iter_mut()
            .find(|b| b.search == search)
            .ok_or_else(|| Error::Storage(format!("No blog stored for: {}", search)))?;
        *existing = blog.clone();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.blogs.clear();
    }
}

pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::default())),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn open(_path: &Path) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl BlogStore for MemoryStorage {
    async fn get(&self, search: &str) -> Result<Option<Blog>> {
        Ok(self.store.read().await.get(search))
    }

    async fn insert(&self, blog: &Blog) -> Result<()> {
        self.store.write().await.insert(blog)
    }

    async fn update(&self, blog: &Blog, search: &str) -> Result<()> {
        self.store.write().await.update(blog, search)
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        Ok(self.store.read().await.blogs().to_vec())
    }

    async fn clear(&self) -> Result<()> {
        self.store.write().await.clear();
        Ok(())
    }
}
