//! Account domain service.
//!
//! Implements the [`AccountService`] driving port on top of the user
//! repository, the password hasher and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountService, PasswordHasher, PasswordHasherError, TokenError, TokenIssuer,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, RegistrationCredentials, User, UserAccount, UserId,
};

pub(crate) const EMAIL_TAKEN_MESSAGE: &str = "Email already exists";
pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN_MESSAGE),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
}

/// Account service implementing registration and login.
#[derive(Clone)]
pub struct AccountServiceImpl<R, H, T> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> AccountServiceImpl<R, H, T> {
    /// Create a new account service.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<R, H, T> AccountService for AccountServiceImpl<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, credentials: &RegistrationCredentials) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_TAKEN_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hasher_error)?;
        let account = UserAccount::new(
            User::new(UserId::random(), credentials.email().clone()),
            password_hash,
        );

        // The unique index still decides when two registrations race.
        self.users
            .create(&account)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %account.user().id(), "registered user");
        Ok(account.into_user())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(account) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(invalid_credentials());
        }

        let token = self
            .tokens
            .issue(account.user().id())
            .map_err(map_token_error)?;

        Ok(LoginOutcome {
            token,
            user: account.into_user(),
        })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
