use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Database transaction model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
    pub sold: bool,
    #[sqlx(rename = "dateOfSale")]
    pub date_of_sale: NaiveDate,
}

/// A transaction as supplied by a seed file, before the store assigns an id.
///
/// Seed files often carry an `id` of their own; it is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
    pub sold: bool,
    #[serde(deserialize_with = "deserialize_sale_date")]
    pub date_of_sale: NaiveDate,
}

/// Accepts either a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
fn deserialize_sale_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_sale_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid dateOfSale `{raw}`"))
    })
}

pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
