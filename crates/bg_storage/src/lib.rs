use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use bg_core::{BlogStore, Error, Result};

pub mod backends;

pub use backends::*;

/// A store that can be opened from a location string.
#[async_trait]
pub trait StorageBackend: BlogStore + Sized {
    fn get_error_message() -> &'static str;
    async fn open(path: &Path) -> Result<Self>;
}

#[cfg(feature = "sqlite")]
pub const AVAILABLE_BACKENDS: &[&str] = &["json", "memory", "sqlite"];
#[cfg(not(feature = "sqlite"))]
pub const AVAILABLE_BACKENDS: &[&str] = &["json", "memory"];

async fn open_backend<T: StorageBackend + 'static>(path: &Path) -> Result<Arc<dyn BlogStore>> {
    match T::open(path).await {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) => {
            tracing::error!("{}: {}", T::get_error_message(), e);
            Err(e)
        }
    }
}

/// Opens the backend named by `kind`. `path` is ignored by the memory backend.
pub async fn create_storage(kind: &str, path: &Path) -> Result<Arc<dyn BlogStore>> {
    match kind {
        "memory" => open_backend::<MemoryStorage>(path).await,
        "json" => open_backend::<JsonFileStorage>(path).await,
        #[cfg(feature = "sqlite")]
        "sqlite" => open_backend::<SQLiteStorage>(path).await,
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available backends: {}",
            other,
            AVAILABLE_BACKENDS.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageBackend};
    pub use bg_core::BlogStore;
}
