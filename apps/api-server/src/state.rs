//! Application state - shared across all handlers.

use std::sync::Arc;

use storywave_core::PostService;
use storywave_core::domain::{Role, User};
use storywave_core::ports::TransactionManager;
use storywave_infra::{DatabaseConfig, InMemoryStore};

#[cfg(feature = "postgres")]
use storywave_infra::PostgresTransactionManager;

/// Id of the administrator seeded into the in-memory store.
pub const SEED_ADMIN_ID: &str = "admin";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with the appropriate store.
    ///
    /// Falls back to the in-memory store when no database is configured or
    /// the connection cannot be established.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(config) = db_config {
                match storywave_infra::database::connect(config).await {
                    Ok(conn) => {
                        tracing::info!("Application state initialized (postgres)");
                        let tx = Arc::new(PostgresTransactionManager::new(conn));
                        return Self::with_transactions(tx);
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
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
        }

        let state = Self::in_memory().await;
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// In-memory state seeded with one administrator account.
    pub async fn in_memory() -> Self {
        let store = InMemoryStore::new();
        store
            .put_user(
                User::new(SEED_ADMIN_ID, "Administrator", "admin@storywave.local")
                    .with_role(Role::Admin),
            )
            .await;

        Self::with_transactions(Arc::new(store))
    }

    pub fn with_transactions(tx: Arc<dyn TransactionManager>) -> Self {
        Self {
            posts: PostService::new(tx),
        }
    }
}
