use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::config::Config;

pub mod transaction_store;

pub type DbPool = Pool<Sqlite>;

/// Initialize the database connection pool
///
/// The pool is lazy: no connection is opened until the first query, so an
/// unreachable database shows up as per-request errors rather than a failed
/// startup.
pub fn init_db_pool(config: &Config) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid database url `{}`", config.database_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy_with(options);

    Ok(pool)
}

/// Set up the database schema
///
/// Safe to run any number of times; an existing table and its rows are left
/// untouched.
pub async fn setup_database(pool: &DbPool) -> crate::error::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL,
            image TEXT NOT NULL,
            category TEXT NOT NULL,
            sold INTEGER NOT NULL,
            dateOfSale TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
