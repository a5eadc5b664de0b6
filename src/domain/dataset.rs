//! Dataset collection and date-range restriction.

use super::transaction::TransactionRecord;
use chrono::NaiveDate;

/// An ordered collection of transaction records.
///
/// Order is arrival order from the source, not necessarily date order. The
/// loader's cache hands datasets out behind `Arc`; restriction never mutates
/// its input and always produces a fresh `Dataset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TransactionRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep records with `start <= date <= end`, inclusive on both ends.
    ///
    /// `start > end` yields an empty dataset rather than an error. Restriction
    /// is idempotent, and re-filtering with wider bounds is a no-op: the
    /// result only ever narrows.
    pub fn restrict_to_range(&self, start: NaiveDate, end: NaiveDate) -> Dataset {
        if start > end {
            return Dataset::empty();
        }
        let records = self
            .records
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .cloned()
            .collect();
        Dataset::new(records)
    }
}
