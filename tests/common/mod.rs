#![allow(dead_code)]

use cashboard::domain::error::CashboardError;
use cashboard::ports::data_port::MarketDataPort;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const SOURCE: &str = "https://example.com/cash_market.csv";

pub struct MockMarketDataPort {
    pub tables: HashMap<String, String>,
    pub errors: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            errors: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_table(mut self, source: &str, table: &str) -> Self {
        self.tables.insert(source.to_string(), table.to_string());
        self
    }

    pub fn with_error(mut self, source: &str, reason: &str) -> Self {
        self.errors.insert(source.to_string(), reason.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_table(&self, source: &str) -> Result<String, CashboardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.errors.get(source) {
            return Err(CashboardError::Fetch {
                src: source.to_string(),
                reason: reason.clone(),
            });
        }
        self.tables
            .get(source)
            .cloned()
            .ok_or_else(|| CashboardError::Fetch {
                src: source.to_string(),
                reason: "unknown source".to_string(),
            })
    }
}

/// Build a delimited table with the standard header from (date, amount, wair,
/// current, trades) rows given as raw cell strings.
pub fn table(rows: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut out = String::from("Date,Amount,WAIR,Current,Trades\n");
    for (date, amount, wair, current, trades) in rows {
        out.push_str(&format!("{date},{amount},{wair},{current},{trades}\n"));
    }
    out
}

pub fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hash_secret(secret: &str) -> String {
    use argon2::password_hash::SaltString;
    use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};

    let salt = SaltString::from_b64("dGVzdHNhbHR0ZXN0c2FsdA").unwrap();
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default());
    argon2
        .hash_password(secret.as_bytes(), &salt)
        .unwrap()
        .to_string()
}
