pub mod params;
pub mod report;
pub mod transaction;

pub use params::{ListParams, MonthFilter, MonthQuery, TransactionQuery};
pub use report::{
    ApiResponse, BarChartData, CombinedReport, PieChartData, Statistics, TransactionPage,
};
pub use transaction::{NewTransaction, Transaction};
