//! Loads transactions from a JSON file into the database.
//!
//! The server itself never writes rows; this is how a fresh database gets
//! its data.

use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;

use transaction_stats_server::{
    config::Config,
    db::{init_db_pool, setup_database, transaction_store::insert_transaction},
    models::NewTransaction,
};

/// Seed the transactions table from a JSON array of records.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a JSON file holding an array of transactions.
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database to seed. Defaults to the server's `DATABASE_URL`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("could not read {}", args.file.display()))?;
    let transactions: Vec<NewTransaction> = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse {}", args.file.display()))?;

    let pool = init_db_pool(&config)?;
    setup_database(&pool)
        .await
        .context("could not create the transactions table")?;

    let mut tx = pool.begin().await?;
    for transaction in &transactions {
        insert_transaction(&mut *tx, transaction)
            .await
            .with_context(|| format!("could not insert `{}`", transaction.title))?;
    }
    tx.commit().await?;

    tracing::info!(
        "Inserted {} transactions into {}",
        transactions.len(),
        config.database_url
    );

    pool.close().await;
    Ok(())
}
