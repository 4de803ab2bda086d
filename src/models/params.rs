//! Query-string parameters.
//!
//! Handlers extract the raw strings and convert them here, so the store and
//! report service only ever see validated values. Invalid input never causes
//! a rejection: every field falls back to its default.

use serde::Deserialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_MONTH: u8 = 3;

/// Which months of sales a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// No month restriction (`month=0`).
    All,
    /// A single calendar month, 1 through 12.
    Month(u8),
}

impl Default for MonthFilter {
    fn default() -> Self {
        Self::Month(DEFAULT_MONTH)
    }
}

impl MonthFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.and_then(leading_integer) {
            Some(0) => Self::All,
            Some(month @ 1..=12) => Self::Month(month as u8),
            _ => Self::default(),
        }
    }

    /// The value bound into SQL; 0 disables the month predicate.
    pub fn as_sql_param(self) -> i64 {
        match self {
            Self::All => 0,
            Self::Month(month) => i64::from(month),
        }
    }
}

/// Raw `?month=` query
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl From<MonthQuery> for MonthFilter {
    fn from(query: MonthQuery) -> Self {
        MonthFilter::parse(query.month.as_deref())
    }
}

/// Raw `/transactions` query
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub month: Option<String>,
}

/// Validated listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub month: MonthFilter,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            month: MonthFilter::default(),
        }
    }
}

impl ListParams {
    /// Number of matching rows skipped before this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

impl From<TransactionQuery> for ListParams {
    fn from(query: TransactionQuery) -> Self {
        Self {
            page: positive_or(query.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(query.limit.as_deref(), DEFAULT_LIMIT),
            search: query.search.unwrap_or_default(),
            month: MonthFilter::parse(query.month.as_deref()),
        }
    }
}

fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(leading_integer)
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value >= 1)
        .unwrap_or(default)
}

/// Reads the integer prefix of `raw`, so `"5"`, `" 5"` and `"5abc"` all give 5.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}
