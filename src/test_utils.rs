//! Helpers shared by the unit and end-to-end tests.

use crate::{
    config::Config,
    db::{DbPool, init_db_pool, setup_database, transaction_store::TransactionStore},
    models::{NewTransaction, transaction::parse_sale_date},
};

/// A fresh in-memory database with the schema in place.
///
/// One connection only, so every query in a test sees the same database.
pub async fn memory_pool() -> DbPool {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        ..Config::default()
    };
    let pool = init_db_pool(&config).expect("Failed to create pool");
    setup_database(&pool).await.expect("Failed to create schema");
    pool
}

pub async fn memory_store() -> TransactionStore {
    TransactionStore::new(memory_pool().await)
}

/// An unsold electronics item described as "A fine <title>".
pub fn new_transaction(title: &str, price: f64, date_of_sale: &str) -> NewTransaction {
    NewTransaction {
        title: title.to_string(),
        price,
        description: format!("A fine {title}"),
        image: format!("https://example.com/{}.jpg", title.to_lowercase().replace(' ', "-")),
        category: "electronics".to_string(),
        sold: false,
        date_of_sale: parse_sale_date(date_of_sale).expect("Invalid test date"),
    }
}
