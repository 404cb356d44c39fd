//! Database Module
//!
//! Handles the SQLite connection pools and migrations

pub mod models;
pub mod repository;

use shared::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database service — owns the SQLite connection pools
///
/// Uses WAL mode with separate read/write pools. The write pool is capped at
/// a single connection so write transactions queue instead of racing into
/// `SQLITE_BUSY` lock upgrades; combined with conditional `UPDATE`s this is
/// what keeps stock from being oversold under concurrent order placement.
#[derive(Clone, Debug)]
pub struct DbService {
    read_pool: SqlitePool,
    write_pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database at `db_path` and run migrations
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .pragma("foreign_keys", "ON");

        let write_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let read_pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&write_pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            read_pool,
            write_pool,
        })
    }

    /// Pool for read-only statements
    pub fn read(&self) -> &SqlitePool {
        &self.read_pool
    }

    /// Pool for statements and transactions that mutate state
    pub fn write(&self) -> &SqlitePool {
        &self.write_pool
    }
}
