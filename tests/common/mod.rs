#![allow(dead_code)]

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use vistara::config::Settings;

/// One connection, so every query sees the same in-memory database.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    vistara::db::migrate(&pool).await?;

    Ok(pool)
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "integration-test-secret".to_string();
    settings.uploads.max_file_bytes = 1024;
    settings
}
