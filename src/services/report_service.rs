use crate::{
    aggregation::{CategoryBreakdown, PriceHistogram},
    db::transaction_store::TransactionStore,
    error::Result,
    models::{CombinedReport, MonthFilter, Statistics},
};

/// Builds the monthly reports on top of the transaction store.
#[derive(Clone)]
pub struct ReportService {
    store: TransactionStore,
}

impl ReportService {
    pub fn new(store: TransactionStore) -> Self {
        Self { store }
    }

    pub async fn statistics(&self, month: MonthFilter) -> Result<Statistics> {
        self.store.statistics(month).await
    }

    pub async fn price_histogram(&self, month: MonthFilter) -> Result<PriceHistogram> {
        let prices = self.store.prices(month).await?;
        Ok(PriceHistogram::from_prices(prices))
    }

    pub async fn category_breakdown(&self, month: MonthFilter) -> Result<CategoryBreakdown> {
        let categories = self.store.categories(month).await?;
        Ok(CategoryBreakdown::from_categories(categories))
    }

    /// Run all three reports concurrently.
    ///
    /// The first failure aborts the others and fails the whole report.
    pub async fn combined(&self, month: MonthFilter) -> Result<CombinedReport> {
        let (stats_data, bar_chart_data, pie_chart_data) = futures::try_join!(
            self.statistics(month),
            self.price_histogram(month),
            self.category_breakdown(month),
        )?;

        tracing::debug!(?month, total = stats_data.total_count, "built combined report");

        Ok(CombinedReport {
            stats_data,
            bar_chart_data,
            pie_chart_data,
        })
    }
}
