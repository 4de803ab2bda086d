use sqlx::{Executor, Sqlite};

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::{ListParams, MonthFilter, NewTransaction, Statistics, Transaction},
};

/// Matches every row when the bound month is 0.
const MONTH_PREDICATE: &str = "(? = 0 OR CAST(strftime('%m', dateOfSale) AS INTEGER) = ?)";

/// Transaction store for database operations
#[derive(Clone)]
pub struct TransactionStore {
    pool: DbPool,
}

impl TransactionStore {
    /// Create a new TransactionStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get one page of transactions for a month, filtered by a search term
    ///
    /// The search term is matched literally against the title, the
    /// description and the price's text form. Rows come back in id order.
    ///
    /// Rows whose `dateOfSale` SQLite cannot read as a date are left out of
    /// the listing instead of failing the whole page.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Transaction>> {
        let sql = format!(
            r#"
            SELECT id, title, price, description, image, category, sold,
                   date(dateOfSale) AS dateOfSale
            FROM transactions
            WHERE date(dateOfSale) IS NOT NULL
              AND {MONTH_PREDICATE}
              AND (title LIKE ? ESCAPE '\'
                   OR description LIKE ? ESCAPE '\'
                   OR CAST(price AS TEXT) LIKE ? ESCAPE '\')
            ORDER BY id
            LIMIT ? OFFSET ?
            "#
        );
        let pattern = format!("%{}%", escape_like(&params.search));
        let month = params.month.as_sql_param();

        let transactions = sqlx::query_as::<_, Transaction>(&sql)
            .bind(month)
            .bind(month)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(i64::from(params.limit))
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(transactions)
    }

    /// Get the sale total and sold/unsold counts for a month
    ///
    /// A month without sales yields zeros, not nulls.
    pub async fn statistics(&self, month: MonthFilter) -> Result<Statistics> {
        let sql = format!(
            r#"
            SELECT TOTAL(price), COUNT(*), COALESCE(SUM(sold), 0)
            FROM transactions
            WHERE {MONTH_PREDICATE}
            "#
        );
        let month = month.as_sql_param();

        let (total_sale, total_count, sold_count): (f64, i64, i64) = sqlx::query_as(&sql)
            .bind(month)
            .bind(month)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(Statistics::new(total_sale, total_count, sold_count))
    }

    /// Get the price of every transaction in a month
    pub async fn prices(&self, month: MonthFilter) -> Result<Vec<f64>> {
        let sql = format!("SELECT price FROM transactions WHERE {MONTH_PREDICATE} ORDER BY id");
        let month = month.as_sql_param();

        let prices = sqlx::query_scalar::<_, f64>(&sql)
            .bind(month)
            .bind(month)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(prices)
    }

    /// Get the category of every transaction in a month
    pub async fn categories(&self, month: MonthFilter) -> Result<Vec<String>> {
        let sql = format!("SELECT category FROM transactions WHERE {MONTH_PREDICATE} ORDER BY id");
        let month = month.as_sql_param();

        let categories = sqlx::query_scalar::<_, String>(&sql)
            .bind(month)
            .bind(month)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(categories)
    }

    /// Insert a transaction and return its new id
    pub async fn insert(&self, transaction: &NewTransaction) -> Result<i64> {
        insert_transaction(&self.pool, transaction).await
    }
}

/// Insert a transaction through any executor, e.g. an open database transaction
pub async fn insert_transaction<'e, E>(executor: E, transaction: &NewTransaction) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO transactions (title, price, description, image, category, sold, dateOfSale)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&transaction.title)
    .bind(transaction.price)
    .bind(&transaction.description)
    .bind(&transaction.image)
    .bind(&transaction.category)
    .bind(transaction.sold)
    .bind(transaction.date_of_sale)
    .execute(executor)
    .await
    .map_err(AppError::Database)?;

    Ok(result.last_insert_rowid())
}

/// Escape LIKE wildcards so the search term matches as a literal substring.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{memory_store, new_transaction};

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[tokio::test]
    async fn test_list_filters_by_month_and_orders_by_id() {
        let store = memory_store().await;
        let march = store
            .insert(&new_transaction("Jacket", 56.99, "2022-03-10"))
            .await
            .unwrap();
        store.insert(&new_transaction("Ring", 695.0, "2022-04-01")).await.unwrap();
        let march_again = store
            .insert(&new_transaction("Monitor", 999.99, "2021-03-27"))
            .await
            .unwrap();

        let listed = store.list(&ListParams::default()).await.unwrap();

        let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![march, march_again]);
    }

    #[tokio::test]
    async fn test_list_all_months() {
        let store = memory_store().await;
        store.insert(&new_transaction("Jacket", 56.99, "2022-03-10")).await.unwrap();
        store.insert(&new_transaction("Ring", 695.0, "2022-04-01")).await.unwrap();

        let params = ListParams {
            month: MonthFilter::All,
            ..ListParams::default()
        };
        let listed = store.list(&params).await.unwrap();

        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_list_skips_rows_with_unreadable_dates() {
        let store = memory_store().await;
        let id = store.insert(&new_transaction("Jacket", 56.99, "2022-03-10")).await.unwrap();
        sqlx::query(
            r#"
            INSERT INTO transactions (title, price, description, image, category, sold, dateOfSale)
            VALUES ('Imported', 5.0, 'bad date', '', 'electronics', 0, 'not a date')
            "#,
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let params = ListParams {
            month: MonthFilter::All,
            ..ListParams::default()
        };
        let listed = store.list(&params).await.unwrap();

        let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![id]);
    }

    #[tokio::test]
    async fn test_list_search_matches_title_description_and_price() {
        let store = memory_store().await;
        store.insert(&new_transaction("Rain Jacket", 39.99, "2022-03-01")).await.unwrap();
        store.insert(&new_transaction("Hard Drive", 64.0, "2022-03-02")).await.unwrap();
        store.insert(&new_transaction("Bracelet", 10.99, "2022-03-03")).await.unwrap();

        let search = |term: &str| ListParams {
            search: term.to_string(),
            ..ListParams::default()
        };

        let by_title = store.list(&search("Jacket")).await.unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Rain Jacket");

        // new_transaction describes every item as "A fine <title>"
        let by_description = store.list(&search("fine Hard")).await.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "Hard Drive");

        let by_price = store.list(&search("10.99")).await.unwrap();
        assert_eq!(by_price.len(), 1);
        assert_eq!(by_price[0].title, "Bracelet");
    }

    #[tokio::test]
    async fn test_list_search_treats_wildcards_literally() {
        let store = memory_store().await;
        store.insert(&new_transaction("Gift Card", 25.0, "2022-03-01")).await.unwrap();

        let params = ListParams {
            search: "%".to_string(),
            ..ListParams::default()
        };

        assert!(store.list(&params).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_pages() {
        let store = memory_store().await;
        let mut ids = Vec::new();
        for day in 1..=12 {
            let date = format!("2022-03-{day:02}");
            ids.push(store.insert(&new_transaction("Item", 5.0, &date)).await.unwrap());
        }

        let params = ListParams {
            page: 2,
            limit: 5,
            ..ListParams::default()
        };
        let page = store.list(&params).await.unwrap();

        let page_ids: Vec<i64> = page.iter().map(|t| t.id).collect();
        assert_eq!(page_ids, ids[5..10].to_vec());
    }

    #[tokio::test]
    async fn test_list_returns_full_records() {
        let store = memory_store().await;
        let mut sold = new_transaction("Backpack", 109.95, "2022-03-05T10:00:00+00:00");
        sold.sold = true;
        let id = store.insert(&sold).await.unwrap();

        let listed = store.list(&ListParams::default()).await.unwrap();

        assert_eq!(listed.len(), 1);
        let transaction = &listed[0];
        assert_eq!(transaction.id, id);
        assert_eq!(transaction.price, 109.95);
        assert!(transaction.sold);
        assert_eq!(transaction.date_of_sale, sold.date_of_sale);
    }

    #[tokio::test]
    async fn test_statistics() {
        let store = memory_store().await;
        let mut sold = new_transaction("Jacket", 100.0, "2022-03-10");
        sold.sold = true;
        store.insert(&sold).await.unwrap();
        store.insert(&new_transaction("Shirt", 20.5, "2022-03-11")).await.unwrap();
        store.insert(&new_transaction("Ring", 695.0, "2022-04-01")).await.unwrap();

        let stats = store.statistics(MonthFilter::Month(3)).await.unwrap();

        assert_eq!(stats, Statistics::new(120.5, 2, 1));
        assert_eq!(stats.unsold_count, 1);
    }

    #[tokio::test]
    async fn test_statistics_without_rows_are_zero() {
        let store = memory_store().await;

        let stats = store.statistics(MonthFilter::Month(7)).await.unwrap();

        assert_eq!(stats, Statistics::default());
    }

    #[tokio::test]
    async fn test_prices_and_categories_for_month() {
        let store = memory_store().await;
        store.insert(&new_transaction("Jacket", 56.99, "2022-05-10")).await.unwrap();
        store.insert(&new_transaction("Ring", 695.0, "2022-05-01")).await.unwrap();
        store.insert(&new_transaction("Monitor", 999.99, "2022-06-27")).await.unwrap();

        let prices = store.prices(MonthFilter::Month(5)).await.unwrap();
        assert_eq!(prices, vec![56.99, 695.0]);

        let categories = store.categories(MonthFilter::All).await.unwrap();
        assert_eq!(categories.len(), 3);
    }
}
