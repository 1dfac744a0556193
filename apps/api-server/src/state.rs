//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::BlogPages;
use blog_core::ports::MediaStorage;
use blog_infra::{InMemoryBlogStore, LocalMediaStorage};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresPostRepository, PostgresTagRepository, database};

use crate::config::AppConfig;

/// Where page data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pages: BlogPages,
    pub storage: StorageBackend,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(&config.media_url));

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    Self {
                        pages: BlogPages::new(
                            Arc::new(PostgresPostRepository::new(conn.clone())),
                            Arc::new(PostgresTagRepository::new(conn)),
                            media,
                        ),
                        storage: StorageBackend::Postgres,
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(Arc::new(InMemoryBlogStore::new()), media)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(Arc::new(InMemoryBlogStore::new()), media)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory(Arc::new(InMemoryBlogStore::new()), media)
        };

        tracing::info!(storage = state.storage.as_str(), "Application state initialized");
        state
    }

    /// State backed by an in-memory store.
    pub fn in_memory(store: Arc<InMemoryBlogStore>, media: Arc<dyn MediaStorage>) -> Self {
        Self {
            pages: BlogPages::new(store.clone(), store, media),
            storage: StorageBackend::Memory,
        }
    }
}
