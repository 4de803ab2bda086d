use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::Result,
    handlers::AppState,
    models::{ApiResponse, BarChartData, MonthFilter, MonthQuery, PieChartData},
};

/// Monthly statistics handler
pub async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let stats = state.report_service.statistics(MonthFilter::from(query)).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(stats))))
}

/// Price histogram handler
pub async fn bar_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let bar_chart_data = state
        .report_service
        .price_histogram(MonthFilter::from(query))
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(BarChartData { bar_chart_data })),
    ))
}

/// Category breakdown handler
pub async fn pie_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let pie_chart_data = state
        .report_service
        .category_breakdown(MonthFilter::from(query))
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(PieChartData { pie_chart_data })),
    ))
}

/// Combined statistics, histogram and breakdown handler
pub async fn combined_data(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse> {
    let report = state.report_service.combined(MonthFilter::from(query)).await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(report))))
}
