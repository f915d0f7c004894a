use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::app::error::{Result, TidingsError};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::normalizer::Normalizer;
use crate::notify::ConsoleSink;
use crate::scheduler::{CheckScheduler, CheckSettings};
use crate::store::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub sink: Arc<ConsoleSink>,
    pub scheduler: CheckScheduler,
}

impl AppContext {
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match &config.database_path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };
        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        Self::with_store(config, store)
    }

    fn with_store(config: Config, store: Arc<SqliteStore>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| TidingsError::Other(e.to_string()))?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.feed)?);
        let parser = Arc::new(Normalizer::new(config.feed.url.clone()));
        let sink = Arc::new(ConsoleSink::new());

        let scheduler = CheckScheduler::new(
            CheckSettings::from(&config.feed),
            store.clone(),
            fetcher,
            parser,
            sink.clone(),
            runtime,
        );

        Ok(Self {
            config,
            store,
            sink,
            scheduler,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TidingsError::Config("Could not find data directory".into()))?;
        let tidings_dir = data_dir.join("tidings");
        std::fs::create_dir_all(&tidings_dir)?;
        Ok(tidings_dir.join("tidings.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[tokio::test]
    async fn test_in_memory_context() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        assert_eq!(ctx.scheduler.options().unwrap().id, "updateRss");
        assert!(ctx.store.last_check().unwrap().is_none());
    }

    #[test]
    fn test_needs_runtime() {
        assert!(AppContext::in_memory(Config::default()).is_err());
    }

    #[tokio::test]
    async fn test_configured_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: Some(dir.path().join("options.db")),
            ..Config::default()
        };
        AppContext::new(config).unwrap();
        assert!(dir.path().join("options.db").exists());
    }
}
