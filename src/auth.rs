//! Identity-token verification seam
//!
//! The HTTP boundary requires a bearer token on every query endpoint and
//! delegates verification to an external identity provider. That provider
//! stays behind the [`TokenVerifier`] trait; the service itself only knows
//! the rejection taxonomy ([`AuthError`]).
//!
//! The in-tree [`StaticTokenVerifier`] validates against configured token
//! sets so every rejection arm is exercisable locally and in tests. Real
//! deployments implement the trait against their identity provider.

use crate::config::AuthSection;
use crate::error::AuthError;
use async_trait::async_trait;
use std::collections::HashSet;

/// Claims carried by a successfully verified token
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// Stable identifier of the authenticated principal
    pub subject: String,
}

/// Verification of bearer tokens against an identity provider
///
/// Implementations may call out over the network; verification failures are
/// expressed through the [`AuthError`] taxonomy so the boundary can answer
/// with a reason-specific 403. Retry policy, if any, belongs inside the
/// implementation — the boundary calls `verify` exactly once per request.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and return its claims
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError>;
}

/// Token verifier backed by static token sets from configuration
///
/// Lookup order mirrors the provider-side failure modes: expired, revoked
/// and disabled tokens are recognized before the accept list so they report
/// their specific reason instead of a generic rejection.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    accepted: HashSet<String>,
    expired: HashSet<String>,
    revoked: HashSet<String>,
    disabled: HashSet<String>,
}

impl StaticTokenVerifier {
    /// Build a verifier from the `[auth]` configuration section
    pub fn from_config(auth: &AuthSection) -> Self {
        Self {
            accepted: auth.tokens.iter().cloned().collect(),
            expired: auth.expired_tokens.iter().cloned().collect(),
            revoked: auth.revoked_tokens.iter().cloned().collect(),
            disabled: auth.disabled_tokens.iter().cloned().collect(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        if self.expired.contains(token) {
            return Err(AuthError::ExpiredToken);
        }
        if self.revoked.contains(token) {
            return Err(AuthError::RevokedToken);
        }
        if self.disabled.contains(token) {
            return Err(AuthError::UserDisabled);
        }
        if self.accepted.contains(token) {
            return Ok(VerifiedToken {
                subject: token.to_string(),
            });
        }
        Err(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> StaticTokenVerifier {
        StaticTokenVerifier::from_config(&AuthSection {
            enabled: true,
            tokens: vec!["good".to_string()],
            expired_tokens: vec!["old".to_string()],
            revoked_tokens: vec!["pulled".to_string()],
            disabled_tokens: vec!["banned".to_string()],
        })
    }

    #[tokio::test]
    async fn test_accepted_token() {
        let token = verifier().verify("good").await.unwrap();
        assert_eq!(token.subject, "good");
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        assert_eq!(
            verifier().verify("who-dis").await.unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[tokio::test]
    async fn test_expired_token() {
        assert_eq!(
            verifier().verify("old").await.unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[tokio::test]
    async fn test_revoked_token() {
        assert_eq!(
            verifier().verify("pulled").await.unwrap_err(),
            AuthError::RevokedToken
        );
    }

    #[tokio::test]
    async fn test_disabled_user_token() {
        assert_eq!(
            verifier().verify("banned").await.unwrap_err(),
            AuthError::UserDisabled
        );
    }
}
