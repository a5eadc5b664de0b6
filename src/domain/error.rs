//! Domain error types.

/// Top-level error type for cashboard.
///
/// Configuration and credential-hash variants are fatal at startup. Fetch
/// failures are recoverable: the loader absorbs them into an empty dataset
/// plus a diagnostic, so they never halt the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CashboardError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("malformed credential hash for {identity}: {reason}")]
    CredentialHash { identity: String, reason: String },

    #[error("failed to fetch {src}: {reason}")]
    Fetch { src: String, reason: String },
}
