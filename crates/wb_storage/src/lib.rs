use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use wb_core::{ArticleStorage, Result};

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn get_error_message() -> &'static str;
    async fn open(config: &StorageConfig) -> Result<Self>
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    Memory,
    #[default]
    SQLite,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::SQLite),
            other => Err(format!(
                "Unknown storage backend: {} (expected memory or sqlite)",
                other
            )),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::SQLite => f.write_str("sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    /// Database file, ignored by the memory backend
    pub path: PathBuf,
    /// Wipe all stored articles when the store is opened
    pub reset: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            path: PathBuf::from("articles.db"),
            reset: false,
        }
    }
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            kind: StorageKind::Memory,
            ..Self::default()
        }
    }

    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: StorageKind::SQLite,
            path: path.into(),
            reset: false,
        }
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }
}

/// Opens the backend named by the config.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn ArticleStorage>> {
    let storage: Arc<dyn ArticleStorage> = match config.kind {
        StorageKind::Memory => Arc::new(InMemoryStorage::open(config).await?),
        #[cfg(feature = "sqlite")]
        StorageKind::SQLite => Arc::new(SQLiteStorage::open(config).await.map_err(|e| {
            tracing::error!(error = %e, "{}", SQLiteStorage::get_error_message());
            e
        })?),
        #[cfg(not(feature = "sqlite"))]
        StorageKind::SQLite => {
            return Err(wb_core::Error::Database(
                "SQLite support was not compiled in".to_string(),
            ))
        }
    };
    info!(backend = %config.kind, reset = config.reset, "💾 Storage opened");
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageBackend, StorageConfig, StorageKind};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_kind_from_str() {
        assert_eq!("memory".parse::<StorageKind>(), Ok(StorageKind::Memory));
        assert_eq!("SQLite".parse::<StorageKind>(), Ok(StorageKind::SQLite));
        assert!("qdrant".parse::<StorageKind>().is_err());
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage(&StorageConfig::memory()).await.unwrap();
        assert!(storage.list_all().await.unwrap().is_empty());
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_create_sqlite_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::sqlite(temp_dir.path().join("articles.db"));
        let storage = create_storage(&config).await.unwrap();
        assert!(!storage.exists("https://example.com").await.unwrap());
    }
}
