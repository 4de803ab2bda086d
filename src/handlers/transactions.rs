use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Result,
    handlers::AppState,
    models::{ApiResponse, ListParams, TransactionPage, TransactionQuery},
};

/// List transactions handler
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> Result<impl IntoResponse> {
    let params = ListParams::from(query);
    let transactions = state.transaction_store.list(&params).await?;

    tracing::debug!(?params, returned = transactions.len(), "listed transactions");

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(TransactionPage { transactions })),
    ))
}
