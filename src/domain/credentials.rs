//! Credential roster and verification.

use crate::domain::error::CashboardError;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use std::collections::HashMap;

/// Fixed mapping of identity to salted argon2 hash.
///
/// Built once at startup from configuration and immutable afterwards. Every
/// stored hash is parsed eagerly at construction, so a malformed hash is a
/// fatal configuration error rather than a per-login failure.
#[derive(Debug, Clone)]
pub struct CredentialRoster {
    entries: HashMap<String, String>,
}

impl CredentialRoster {
    pub fn from_entries<I>(entries: I) -> Result<Self, CashboardError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = HashMap::new();
        for (identity, hash) in entries {
            if let Err(e) = PasswordHash::new(&hash) {
                return Err(CashboardError::CredentialHash {
                    identity,
                    reason: e.to_string(),
                });
            }
            map.insert(identity, hash);
        }
        Ok(Self { entries: map })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Verify a presented identity/secret pair.
    ///
    /// Identity match is case-sensitive and exact. An unknown identity returns
    /// false without any hash comparison. Pure function of the roster and the
    /// presented pair; never mutates state.
    pub fn validate(&self, identity: &str, secret: &str) -> bool {
        let Some(stored) = self.entries.get(identity) else {
            return false;
        };

        // Cannot fail for a roster that passed construction.
        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            return false;
        };

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
