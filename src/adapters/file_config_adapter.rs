//! INI file configuration adapter.
//!
//! Keys are case-sensitive: the `[credentials]` section maps identities to
//! argon2 hashes and identity matching is exact.

use crate::domain::error::CashboardError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CashboardError> {
        let mut config = Ini::new_cs();
        config
            .load(&path)
            .map_err(|reason| CashboardError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, CashboardError> {
        let mut config = Ini::new_cs();
        config
            .read(content.to_string())
            .map_err(|reason| CashboardError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn section_entries(&self, section: &str) -> Vec<(String, String)> {
        let Some(map) = self.config.get_map_ref().get(section) else {
            return Vec::new();
        };
        let mut entries: Vec<(String, String)> = map
            .iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key.clone(), v)))
            .collect();
        entries.sort();
        entries
    }
}
