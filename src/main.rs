// src/main.rs
//
// Bootstrap: configuration, logging, storage, wiring.
// The transport layer attaches to the resulting AppState.

use std::sync::Arc;

use anyhow::Context;
use qa::application::AppState;
use qa::config::QaConfig;
use qa::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity,
};

fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config = QaConfig::load().context("failed to load configuration")?;

    // 2. LOGGING (RUST_LOG wins over the configured level)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    // 3. STORAGE
    let pool = Arc::new(
        create_connection_pool(&config.database).context("failed to open database")?,
    );

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn).context("failed to initialize schema")?;
        verify_database_integrity(&conn)?;

        let stats = get_database_stats(&conn)?;
        log::info!(
            "Database ready: {} bytes, {} questions, {} answers, {} comments, {} profiles",
            stats.size_bytes,
            stats.question_count,
            stats.answer_count,
            stats.comment_count,
            stats.profile_count
        );
    }

    // 4. APPLICATION STATE
    let _state = AppState::new(pool);
    log::info!("Application state ready");

    Ok(())
}
