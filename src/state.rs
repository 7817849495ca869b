use crate::config::settings::AppConfig;
use crate::infrastructure::db::pool::{connect_to_db, run_migrations};
use crate::infrastructure::youtube::client::YoutubeClient;
use crate::modules::content::repository::{ContentStore, InMemoryContentStore, PgContentRepository};
use crate::modules::learning_path::repository::{
    InMemoryLearningPathStore, LearningPathStore, PgLearningPathRepository,
};
use crate::modules::video::service::VideoService;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub contents: Arc<dyn ContentStore>,
    pub learning_paths: Arc<dyn LearningPathStore>,
    pub videos: VideoService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        contents: Arc<dyn ContentStore>,
        learning_paths: Arc<dyn LearningPathStore>,
        videos: VideoService,
    ) -> Self {
        Self {
            config,
            contents,
            learning_paths,
            videos,
        }
    }

    /// State backed by process-local stores.
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        let client = YoutubeClient::new(config.youtube.clone())
            .context("Failed to build YouTube client")?;

        Ok(Self::new(
            config,
            Arc::new(InMemoryContentStore::new()),
            Arc::new(InMemoryLearningPathStore::new()),
            VideoService::new(client),
        ))
    }

    /// Connects to PostgreSQL when a database URL is configured, otherwise
    /// falls back to in-memory stores.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let Some(database_url) = config.database_url.clone() else {
            warn!("DATABASE_URL not set, records will only live in memory");
            return Self::in_memory(config);
        };

        let pool = connect_to_db(&database_url)
            .await
            .context("Failed to connect to database")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let client = YoutubeClient::new(config.youtube.clone())
            .context("Failed to build YouTube client")?;
        info!("Using PostgreSQL-backed stores");

        Ok(Self::new(
            config,
            Arc::new(PgContentRepository::new(pool.clone())),
            Arc::new(PgLearningPathRepository::new(pool)),
            VideoService::new(client),
        ))
    }
}
