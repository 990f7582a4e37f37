//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Deployment environment; controls how much detail error responses leak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn is_development(self) -> bool {
        self == AppEnv::Development
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string
    pub database_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Deployment environment
    pub env: AppEnv,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let env_name = env::var("APP_ENV").unwrap_or_default();
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://charsheet.db".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            // Unset or unrecognized values stay in production mode
            env: if env_name.eq_ignore_ascii_case("development") {
                AppEnv::Development
            } else {
                AppEnv::Production
            },
        })
    }
}
