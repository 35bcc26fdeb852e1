use crate::config::AppConfig;
use crate::store::{DocumentStore, MemoryStore, PgDocumentStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Builds the store client once for the process lifetime.
    ///
    /// Connection and migration failures are logged, not returned: the
    /// listener still comes up and requests fail with store errors until
    /// the database is reachable.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        let pg = PgDocumentStore::connect_lazy(
            &config.database_url,
            config.max_connections,
            config.acquire_timeout,
        )?;

        match pg.ping().await {
            Ok(()) => {
                info!("connected to document store");
                if let Err(e) = pg.migrate().await {
                    warn!(error = ?e, "migration failed; continuing");
                }
            }
            Err(e) => error!(error = %e, "document store connection error"),
        }

        Ok(Self {
            store: Arc::new(pg) as Arc<dyn DocumentStore>,
            config,
        })
    }

    pub fn from_parts(store: Arc<dyn DocumentStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "memory://".into(),
            host: "127.0.0.1".into(),
            port: 5000,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(1),
        });
        let store = Arc::new(MemoryStore::new()) as Arc<dyn DocumentStore>;
        Self { store, config }
    }
}
