//! Market data access port trait.

use crate::domain::error::CashboardError;

/// Fetches the raw delimited table for a dataset source.
///
/// The loader owns parsing and tolerance policy; implementations only move
/// bytes. Fetch failures (unreachable host, timeout) surface as
/// [`CashboardError::Fetch`] and are absorbed by the loader into an empty
/// dataset plus a diagnostic.
pub trait MarketDataPort {
    fn fetch_table(&self, source: &str) -> Result<String, CashboardError>;
}
