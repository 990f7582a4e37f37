//! Shared application state

use anyhow::Result;

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::SqliteRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub repository: SqliteRepository,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = SqliteRepository::connect(&config.database_url).await?;
        Ok(Self { config, repository })
    }
}
