//! Dataset ingestion: fetch, tolerant parse, cache.

use crate::adapters::cache::DatasetCache;
use crate::domain::dataset::Dataset;
use crate::domain::transaction::TransactionRecord;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DATE_COLUMN: &str = "Date";
const AMOUNT_COLUMN: &str = "Amount";
const WAIR_COLUMN: &str = "WAIR";
const CURRENT_COLUMN: &str = "Current";
const TRADES_COLUMN: &str = "Trades";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of a load: always a dataset, possibly empty, plus a diagnostic
/// when the source itself was unreachable or wholly unparsable.
pub struct LoadReport {
    pub dataset: Arc<Dataset>,
    pub diagnostic: Option<String>,
}

/// Loads the dataset for a source, consulting the cache first.
///
/// Two independent row-tolerance policies apply during parsing:
/// a row whose date fails to parse is dropped; a numeric field that fails to
/// parse defaults to zero with the row kept. Rows that cannot be split into
/// the expected columns are skipped outright. Source-level failures yield an
/// empty dataset plus a diagnostic and are never cached, so the next call
/// retries the fetch.
pub struct DatasetLoader {
    port: Arc<dyn MarketDataPort + Send + Sync>,
    cache: DatasetCache,
}

impl DatasetLoader {
    pub fn new(port: Arc<dyn MarketDataPort + Send + Sync>, cache: DatasetCache) -> Self {
        Self { port, cache }
    }

    pub fn load(&self, source: &str) -> LoadReport {
        if let Some(dataset) = self.cache.get(source) {
            debug!(source, rows = dataset.len(), "dataset cache hit");
            return LoadReport {
                dataset,
                diagnostic: None,
            };
        }

        let raw = match self.port.fetch_table(source) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(source, error = %e, "dataset fetch failed");
                return LoadReport {
                    dataset: Arc::new(Dataset::empty()),
                    diagnostic: Some(e.to_string()),
                };
            }
        };

        match parse_table(&raw) {
            Ok(parsed) => {
                info!(
                    source,
                    rows = parsed.dataset.len(),
                    skipped = parsed.skipped_rows,
                    dropped_dates = parsed.dropped_dates,
                    "dataset loaded"
                );
                let dataset = Arc::new(parsed.dataset);
                self.cache.put(source, Arc::clone(&dataset));
                LoadReport {
                    dataset,
                    diagnostic: None,
                }
            }
            Err(reason) => {
                warn!(source, reason = %reason, "dataset unparsable");
                LoadReport {
                    dataset: Arc::new(Dataset::empty()),
                    diagnostic: Some(reason),
                }
            }
        }
    }

    /// Drop the cached dataset for a source; the next load re-fetches.
    pub fn invalidate(&self, source: &str) {
        self.cache.invalidate(source);
    }
}

#[derive(Debug)]
struct ParsedTable {
    dataset: Dataset,
    skipped_rows: usize,
    dropped_dates: usize,
}

/// Parse the raw delimited table.
///
/// `Err` means the table as a whole is unusable (no header row or a required
/// column missing); row-level problems are absorbed per the tolerance
/// policies and only counted.
fn parse_table(raw: &str) -> Result<ParsedTable, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header row: {e}"))?
        .clone();

    let column = |name: &str| -> Result<usize, String> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| format!("missing column {name}"))
    };

    let date_idx = column(DATE_COLUMN)?;
    let amount_idx = column(AMOUNT_COLUMN)?;
    let wair_idx = column(WAIR_COLUMN)?;
    let current_idx = column(CURRENT_COLUMN)?;
    let trades_idx = column(TRADES_COLUMN)?;
    let arity = [date_idx, amount_idx, wair_idx, current_idx, trades_idx]
        .into_iter()
        .max()
        .unwrap_or(0)
        + 1;

    let mut records = Vec::new();
    let mut skipped_rows = 0usize;
    let mut dropped_dates = 0usize;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };

        if row.len() < arity {
            skipped_rows += 1;
            continue;
        }

        // Strict policy: a malformed date drops the whole row.
        let date = match NaiveDate::parse_from_str(row[date_idx].trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                dropped_dates += 1;
                continue;
            }
        };

        // Tolerant policy: malformed numerics default to zero, row kept.
        records.push(TransactionRecord {
            date,
            amount: parse_or_zero(&row[amount_idx]),
            wair: parse_or_zero(&row[wair_idx]),
            current_price: parse_or_zero(&row[current_idx]),
            trades: row[trades_idx].trim().parse().unwrap_or(0),
        });
    }

    Ok(ParsedTable {
        dataset: Dataset::new(records),
        skipped_rows,
        dropped_dates,
    })
}

fn parse_or_zero(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CashboardError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SOURCE: &str = "https://example.com/cash_market.csv";

    const TABLE: &str = "\
Date,Amount,WAIR,Current,Trades
2024-10-31,100.0,5.0,10.0,3
2024-11-01,200.0,6.0,11.0,5
";

    struct StubPort {
        body: Result<String, String>,
        calls: AtomicUsize,
    }

    impl StubPort {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                body: Err(reason.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl MarketDataPort for StubPort {
        fn fetch_table(&self, source: &str) -> Result<String, CashboardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone().map_err(|reason| CashboardError::Fetch {
                src: source.to_string(),
                reason,
            })
        }
    }

    fn loader(port: Arc<StubPort>) -> DatasetLoader {
        DatasetLoader::new(port, DatasetCache::new(None))
    }

    #[test]
    fn load_parses_all_well_formed_rows() {
        let report = loader(Arc::new(StubPort::ok(TABLE))).load(SOURCE);
        assert!(report.diagnostic.is_none());
        assert_eq!(report.dataset.len(), 2);
        assert_eq!(report.dataset.records()[1].trades, 5);
    }

    #[test]
    fn second_load_hits_the_cache() {
        let port = Arc::new(StubPort::ok(TABLE));
        let loader = loader(Arc::clone(&port));

        let first = loader.load(SOURCE);
        let second = loader.load(SOURCE);

        assert_eq!(port.calls(), 1);
        assert_eq!(first.dataset, second.dataset);
    }

    #[test]
    fn invalidate_forces_a_refetch() {
        let port = Arc::new(StubPort::ok(TABLE));
        let loader = loader(Arc::clone(&port));

        loader.load(SOURCE);
        loader.invalidate(SOURCE);
        loader.load(SOURCE);

        assert_eq!(port.calls(), 2);
    }

    #[test]
    fn fetch_failure_yields_empty_dataset_and_diagnostic() {
        let report = loader(Arc::new(StubPort::failing("connection refused"))).load(SOURCE);
        assert!(report.dataset.is_empty());
        let diagnostic = report.diagnostic.unwrap();
        assert!(diagnostic.contains("connection refused"));
    }

    #[test]
    fn failed_fetch_is_not_cached() {
        let port = Arc::new(StubPort::failing("timed out"));
        let loader = loader(Arc::clone(&port));

        loader.load(SOURCE);
        loader.load(SOURCE);

        assert_eq!(port.calls(), 2);
    }

    #[test]
    fn malformed_date_drops_the_row() {
        let table = "\
Date,Amount,WAIR,Current,Trades
2024-10-31,100.0,5.0,10.0,3
31/10/2024,999.0,5.0,10.0,3
,888.0,5.0,10.0,3
";
        let parsed = parse_table(table).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert_eq!(parsed.dropped_dates, 2);
    }

    #[test]
    fn malformed_amount_defaults_to_zero_but_keeps_the_row() {
        let table = "\
Date,Amount,WAIR,Current,Trades
2024-10-31,n/a,5.0,10.0,3
";
        let parsed = parse_table(table).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert!((parsed.dataset.records()[0].amount - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn other_numeric_fields_share_the_default_policy() {
        let table = "\
Date,Amount,WAIR,Current,Trades
2024-10-31,100.0,-,none,many
";
        let parsed = parse_table(table).unwrap();
        let record = &parsed.dataset.records()[0];
        assert!((record.wair - 0.0).abs() < f64::EPSILON);
        assert!((record.current_price - 0.0).abs() < f64::EPSILON);
        assert_eq!(record.trades, 0);
    }

    #[test]
    fn short_rows_are_skipped() {
        let table = "\
Date,Amount,WAIR,Current,Trades
2024-10-31,100.0
2024-11-01,200.0,6.0,11.0,5
";
        let parsed = parse_table(table).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
        assert_eq!(parsed.skipped_rows, 1);
    }

    #[test]
    fn columns_resolved_by_header_name_not_position() {
        let table = "\
Trades,Date,Current,WAIR,Amount
3,2024-10-31,10.0,5.0,100.0
";
        let parsed = parse_table(table).unwrap();
        let record = &parsed.dataset.records()[0];
        assert!((record.amount - 100.0).abs() < f64::EPSILON);
        assert_eq!(record.trades, 3);
    }

    #[test]
    fn missing_required_column_is_wholly_unparsable() {
        let table = "Date,Amount,WAIR,Current\n2024-10-31,100.0,5.0,10.0\n";
        let result = parse_table(table);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Trades"));
    }

    #[test]
    fn unparsable_table_yields_empty_dataset_and_diagnostic() {
        let report = loader(Arc::new(StubPort::ok("<html>sign in required</html>"))).load(SOURCE);
        assert!(report.dataset.is_empty());
        assert!(report.diagnostic.is_some());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let table = "\
Date,Amount,WAIR,Current,Trades,Notes
2024-10-31,100.0,5.0,10.0,3,quiet session
";
        let parsed = parse_table(table).unwrap();
        assert_eq!(parsed.dataset.len(), 1);
    }
}
