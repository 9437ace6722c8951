use async_trait::async_trait;
use crate::types::Blog;
use crate::Result;

/// Document store for blogs, keyed by `Blog::search`.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Fetch the blog stored under `search`, if any
    async fn get(&self, search: &str) -> Result<Option<Blog>>;

    /// Store a new blog
    async fn insert(&self, blog: &Blog) -> Result<()>;

    /// Replace the blog stored under `search`
    async fn update(&self, blog: &Blog, search: &str) -> Result<()>;

    /// All blogs in insertion order
    async fn list(&self) -> Result<Vec<Blog>>;

    /// Remove every blog
    async fn clear(&self) -> Result<()>;
}
