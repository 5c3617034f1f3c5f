//! Ports for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codecs.
    pub enum TokenError {
        /// Signing a token failed.
        Encoding { message: String } => "token encoding failed: {message}",
        /// The token is malformed, tampered with or carries bad claims.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token's expiry has passed.
        Expired => "token has expired",
    }
}

/// Issues signed access tokens for authenticated users.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token whose subject is `user_id`.
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;
}

/// Verifies bearer tokens presented by clients.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Check signature and expiry, returning the token subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
