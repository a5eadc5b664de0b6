//! KPI aggregation over a dataset.

use super::dataset::Dataset;
use std::collections::HashSet;

/// Summary statistics for a (usually date-restricted) dataset.
///
/// Every field is computable on an empty dataset: sums and counts are zero,
/// means are zero rather than dividing by zero, and `max_volume`/`min_volume`
/// use a zero sentinel. Aggregation is exact; rounding happens only at
/// display time in [`KpiReport::formatted_rows`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct KpiReport {
    pub total_volume: f64,
    pub average_volume: f64,
    /// Count of distinct dates present.
    pub trading_days: usize,
    pub max_volume: f64,
    pub min_volume: f64,
    pub average_wair: f64,
    pub average_price: f64,
    pub total_trades: i64,
}

impl KpiReport {
    pub fn compute(dataset: &Dataset) -> Self {
        let records = dataset.records();
        let n = records.len() as f64;

        let mut total_volume = 0.0_f64;
        let mut total_wair = 0.0_f64;
        let mut total_price = 0.0_f64;
        let mut total_trades = 0_i64;
        let mut max_volume = f64::NEG_INFINITY;
        let mut min_volume = f64::INFINITY;
        let mut dates = HashSet::new();

        for record in records {
            total_volume += record.amount;
            total_wair += record.wair;
            total_price += record.current_price;
            total_trades += record.trades;
            if record.amount > max_volume {
                max_volume = record.amount;
            }
            if record.amount < min_volume {
                min_volume = record.amount;
            }
            dates.insert(record.date);
        }

        let mean = |total: f64| if n > 0.0 { total / n } else { 0.0 };

        KpiReport {
            total_volume,
            average_volume: mean(total_volume),
            trading_days: dates.len(),
            max_volume: if records.is_empty() { 0.0 } else { max_volume },
            min_volume: if records.is_empty() { 0.0 } else { min_volume },
            average_wair: mean(total_wair),
            average_price: mean(total_price),
            total_trades,
        }
    }

    /// Label/value pairs rendered for display: two-decimal, thousands-separated
    /// amounts; bare integers for the two counts.
    pub fn formatted_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Volume", format_amount(self.total_volume)),
            ("Average Volume", format_amount(self.average_volume)),
            ("Trading Days", self.trading_days.to_string()),
            ("Max Volume", format_amount(self.max_volume)),
            ("Min Volume", format_amount(self.min_volume)),
            ("WAIR", format_amount(self.average_wair)),
            ("Average Price", format_amount(self.average_price)),
            ("Total Trades", self.total_trades.to_string()),
        ]
    }
}

/// Two decimal places with `,` thousands separators, e.g. `1,234,567.89`.
fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
