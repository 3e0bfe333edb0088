//! Authentication collaborator port

use std::time::Duration;

use async_trait::async_trait;
use offbeat_model::{AuthToken, Credentials, User, UserId};

use super::errors::AuthenticatorError;

/// Exchanges phone credentials for a user record with a bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<User, AuthenticatorError>;
}

/// Offline authenticator that accepts any phone number and issues a fixed
/// placeholder identity.
#[derive(Debug, Clone, Default)]
pub struct StubAuthenticator {
    latency: Duration,
}

impl StubAuthenticator {
    pub const USER_ID: &'static str = "user-1";
    pub const TOKEN: &'static str = "mock-jwt-token";

    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network round trip of `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Authenticator for StubAuthenticator {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<User, AuthenticatorError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::debug!(
            "[StubAuthenticator] Issuing placeholder session for {}",
            credentials.phone_number.display()
        );

        Ok(User::new(
            UserId::new(Self::USER_ID),
            credentials.phone_number.clone(),
        )
        .with_token(AuthToken::new(Self::TOKEN)))
    }
}
