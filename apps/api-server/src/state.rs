//! Application state - shared across all handlers.

use std::sync::Arc;

use lingua_core::ports::{CategoryRepository, Clock, PostRepository, TranslationRepository};
use lingua_core::{CategoryService, PostService};
use lingua_infra::{DatabaseConfig, InMemoryBlogStore, SystemClock};

#[cfg(feature = "postgres")]
use lingua_infra::{
    PostgresCategoryRepository, PostgresPostRepository, PostgresTranslationRepository,
    database::connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub categories: Arc<CategoryService>,
    /// `"postgres"` or `"memory"`, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match connect(config).await {
                    Ok(db) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::with_repositories(
                            Arc::new(PostgresPostRepository::new(db.clone())),
                            Arc::new(PostgresTranslationRepository::new(db.clone())),
                            Arc::new(PostgresCategoryRepository::new(db)),
                            Arc::new(SystemClock),
                            "postgres",
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
        }

        tracing::info!("Application state initialized (memory)");
        Self::in_memory(Arc::new(SystemClock))
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        Self::with_repositories(store.clone(), store.clone(), store, clock, "memory")
    }

    fn with_repositories(
        posts: Arc<dyn PostRepository>,
        translations: Arc<dyn TranslationRepository>,
        categories: Arc<dyn CategoryRepository>,
        clock: Arc<dyn Clock>,
        storage: &'static str,
    ) -> Self {
        Self {
            posts: Arc::new(PostService::new(posts, translations, clock)),
            categories: Arc::new(CategoryService::new(categories)),
            storage,
        }
    }
}
