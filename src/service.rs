//! Orchestration facade for the presentation layer.

use crate::adapters::cache::DatasetCache;
use crate::adapters::loader::DatasetLoader;
use crate::domain::credentials::CredentialRoster;
use crate::domain::dataset::Dataset;
use crate::domain::error::CashboardError;
use crate::domain::kpi::KpiReport;
use crate::domain::session::{AuthError, AuthSession};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::sync::Arc;

/// Everything the presentation layer needs for one date window: the
/// restricted records (table and by-date charts draw from the same set),
/// their KPIs, and the ingestion diagnostic if the source failed.
pub struct MarketView {
    pub records: Dataset,
    pub kpis: KpiReport,
    pub diagnostic: Option<String>,
}

/// Ties roster, loader and cache together.
///
/// The collaborator gates the dashboard on [`AuthSession::is_authenticated`];
/// this facade carries no authorization levels beyond that. The data port is
/// injected so tests can stub the remote source; production wiring is
/// [`crate::adapters::http_adapter::HttpAdapter`] with the configured
/// timeout.
pub struct CashboardService {
    roster: CredentialRoster,
    loader: DatasetLoader,
    source: String,
}

impl CashboardService {
    pub fn new(
        roster: CredentialRoster,
        port: Arc<dyn MarketDataPort + Send + Sync>,
        source: impl Into<String>,
        cache: DatasetCache,
    ) -> Self {
        Self {
            roster,
            loader: DatasetLoader::new(port, cache),
            source: source.into(),
        }
    }

    /// Build from configuration: `[credentials]` is the roster (validated
    /// eagerly; a malformed hash fails construction), `[data] source_url` is
    /// required, `[data] cache_ttl_secs` defaults to manual invalidation.
    pub fn from_config(
        config: &dyn ConfigPort,
        port: Arc<dyn MarketDataPort + Send + Sync>,
    ) -> Result<Self, CashboardError> {
        let roster = CredentialRoster::from_entries(config.section_entries("credentials"))?;
        let source =
            config
                .get_string("data", "source_url")
                .ok_or_else(|| CashboardError::ConfigMissing {
                    section: "data".to_string(),
                    key: "source_url".to_string(),
                })?;
        let cache = DatasetCache::with_ttl_secs(config.get_int("data", "cache_ttl_secs", 0));
        Ok(Self::new(roster, port, source, cache))
    }

    pub fn roster(&self) -> &CredentialRoster {
        &self.roster
    }

    /// Run one full login attempt: submit then resolve against the roster.
    pub fn login(
        &self,
        session: AuthSession,
        identity: &str,
        secret: &str,
    ) -> (AuthSession, Result<(), AuthError>) {
        session
            .begin_attempt(identity)
            .complete_attempt(&self.roster, secret)
    }

    /// Load (cached), restrict to the inclusive window, aggregate.
    pub fn market_view(&self, start: NaiveDate, end: NaiveDate) -> MarketView {
        let report = self.loader.load(&self.source);
        let records = report.dataset.restrict_to_range(start, end);
        let kpis = KpiReport::compute(&records);
        MarketView {
            records,
            kpis,
            diagnostic: report.diagnostic,
        }
    }

    /// Drop the cached dataset; the next view re-fetches the source.
    pub fn invalidate_data(&self) {
        self.loader.invalidate(&self.source);
    }
}
