use std::sync::Arc;

use ce_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use backends::sqlite::SqliteStorage;

/// Build a storage backend by name. `url` overrides the backend's
/// default connection string where one applies.
pub async fn create_store(backend: &str, url: Option<&str>) -> Result<Arc<dyn ArticleStore>> {
    match backend {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let url = url.unwrap_or(backends::sqlite::DEFAULT_DATABASE_URL);
            Ok(Arc::new(SqliteStorage::connect(url).await?))
        }
        other => {
            let _ = url;
            Err(Error::Database(format!("Unknown storage backend: {}", other)))
        }
    }
}
