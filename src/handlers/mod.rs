pub mod reports;
pub mod transactions;

use crate::{db::transaction_store::TransactionStore, services::ReportService};

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub transaction_store: TransactionStore,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(transaction_store: TransactionStore) -> Self {
        let report_service = ReportService::new(transaction_store.clone());

        Self {
            transaction_store,
            report_service,
        }
    }
}

/// Liveness check
pub async fn health() -> &'static str {
    "Transaction statistics server is running."
}
