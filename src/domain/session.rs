//! Authentication session state machine.

use super::credentials::CredentialRoster;

/// Recoverable, user-facing authentication failure. Login stays retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid identity or secret")]
    InvalidCredentials,
}

/// Per-session authentication state.
///
/// Transitions consume the old state and return the new one; there is no
/// ambient global. The machine cycles for the life of the session:
///
/// `LoggedOut → AttemptingLogin → {Authenticated | LoggedOut} → …`
///
/// The login control is disabled exactly while an attempt is in flight
/// ([`AuthSession::login_enabled`]); both outcomes of an attempt leave
/// `AttemptingLogin`, so the control can never stay stuck disabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthSession {
    #[default]
    LoggedOut,
    AttemptingLogin {
        identity: String,
    },
    Authenticated {
        identity: String,
    },
}

impl AuthSession {
    pub fn new() -> Self {
        Self::LoggedOut
    }

    /// Submit credentials: `LoggedOut → AttemptingLogin`.
    ///
    /// From any other state this is a no-op; an in-flight or already
    /// authenticated session cannot start a second attempt.
    pub fn begin_attempt(self, identity: impl Into<String>) -> Self {
        match self {
            Self::LoggedOut => Self::AttemptingLogin {
                identity: identity.into(),
            },
            other => other,
        }
    }

    /// Resolve an in-flight attempt against the roster.
    ///
    /// Success carries the identity into `Authenticated`; failure returns to
    /// `LoggedOut` with [`AuthError::InvalidCredentials`] for the presentation
    /// layer to surface. Outside `AttemptingLogin` the state is unchanged.
    pub fn complete_attempt(
        self,
        roster: &CredentialRoster,
        secret: &str,
    ) -> (Self, Result<(), AuthError>) {
        match self {
            Self::AttemptingLogin { identity } => {
                if roster.validate(&identity, secret) {
                    (Self::Authenticated { identity }, Ok(()))
                } else {
                    (Self::LoggedOut, Err(AuthError::InvalidCredentials))
                }
            }
            other => (other, Ok(())),
        }
    }

    /// `Authenticated → LoggedOut`, clearing the identity.
    pub fn logout(self) -> Self {
        Self::LoggedOut
    }

    /// The login control is enabled except while an attempt is in flight.
    pub fn login_enabled(&self) -> bool {
        !matches!(self, Self::AttemptingLogin { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Authenticated { identity } => Some(identity),
            _ => None,
        }
    }
}
