//! HTTP data adapter.

use crate::domain::error::CashboardError;
use crate::ports::data_port::MarketDataPort;
use std::time::Duration;

/// Fetches the remote delimited table over HTTP.
///
/// The whole request is bounded by the configured timeout; a hung source
/// surfaces as a [`CashboardError::Fetch`] like any other unreachable source.
pub struct HttpAdapter {
    client: reqwest::blocking::Client,
}

impl HttpAdapter {
    pub fn new(timeout: Duration) -> Result<Self, CashboardError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CashboardError::ConfigInvalid {
                section: "data".to_string(),
                key: "fetch_timeout_secs".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl MarketDataPort for HttpAdapter {
    fn fetch_table(&self, source: &str) -> Result<String, CashboardError> {
        let response = self
            .client
            .get(source)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CashboardError::Fetch {
                src: source.to_string(),
                reason: e.to_string(),
            })?;

        response.text().map_err(|e| CashboardError::Fetch {
            src: source.to_string(),
            reason: e.to_string(),
        })
    }
}
