use serde::{Deserialize, Serialize};

use crate::{
    aggregation::{CategoryBreakdown, PriceHistogram},
    models::transaction::Transaction,
};

/// Success envelope shared by every endpoint.
///
/// The payload's fields are flattened next to `success`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One page of `/transactions`
#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
}

/// Sales totals for a month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sale: f64,
    pub total_count: i64,
    pub sold_count: i64,
    pub unsold_count: i64,
}

impl Statistics {
    pub fn new(total_sale: f64, total_count: i64, sold_count: i64) -> Self {
        Self {
            total_sale,
            total_count,
            sold_count,
            unsold_count: total_count - sold_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartData {
    pub bar_chart_data: PriceHistogram,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartData {
    pub pie_chart_data: CategoryBreakdown,
}

/// Statistics, price histogram and category breakdown for one month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub stats_data: Statistics,
    pub bar_chart_data: PriceHistogram,
    pub pie_chart_data: CategoryBreakdown,
}
