//! Daily transaction record representation.

use chrono::NaiveDate;

/// One day's cash market activity as reported by the source feed.
///
/// `date` is always a successfully parsed calendar date: rows whose date
/// field fails to parse never become records. The numeric fields follow the
/// tolerant ingestion policy and default to zero when unparseable.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    /// Traded volume for the day.
    pub amount: f64,
    /// Weighted average interest rate.
    pub wair: f64,
    /// Closing price.
    pub current_price: f64,
    /// Number of trades executed.
    pub trades: i64,
}
