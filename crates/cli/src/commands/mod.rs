pub mod config;
pub mod demo;
pub mod doctor;
pub mod recommend;
pub mod seed;

use shopmate_core::{AppConfig, LoadOptions};
use shopmate_db::DbPool;

pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

impl CommandResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self { exit_code: 1, output: output.into() }
    }
}

/// Load config and open the configured database with migrations applied.
pub(crate) async fn open_store() -> Result<(AppConfig, DbPool), String> {
    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| format!("config error: {error}"))?;
    let pool = shopmate_db::connect(&config.database)
        .await
        .map_err(|error| format!("database error: {error}"))?;
    shopmate_db::migrations::run_pending(&pool)
        .await
        .map_err(|error| format!("migration error: {error}"))?;
    Ok((config, pool))
}
