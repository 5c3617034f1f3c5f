//! Driving port for registration and login.
//!
//! Inbound adapters call this port with validated credentials and never see
//! the repository, hasher or token codec behind it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome, RegistrationCredentials, User};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Fails with [`crate::domain::ErrorCode::Conflict`]
    /// when the email is taken.
    async fn register(&self, credentials: &RegistrationCredentials) -> Result<User, Error>;

    /// Authenticate and issue an access token. Unknown email and wrong
    /// password both fail with the same unauthorised error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
