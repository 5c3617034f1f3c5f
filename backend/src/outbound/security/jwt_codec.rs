//! HS256 JSON Web Token issuer and verifier.
//!
//! Claims are `sub` (user id), `iat` and `exp` in Unix seconds. Expiry is
//! checked against the injected clock rather than the system time, and a
//! token is accepted up to and including its `exp` second.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer, TokenVerifier};
use crate::domain::{AccessToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies HS256 bearer tokens with a shared secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    /// Build a codec signing with `secret`; tokens live for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] when `ttl` does not fit a timestamp.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self, TokenError> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|err| TokenError::encoding(format!("token ttl out of range: {err}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        })
    }
}

impl TokenIssuer for JwtTokenCodec {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc().timestamp();
        let expires_at = issued_at
            .checked_add(self.ttl.num_seconds())
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
            .ok_or_else(|| TokenError::encoding("token expiry overflows"))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::encoding(err.to_string()))?;

        Ok(AccessToken::new(token, expires_at))
    }
}

impl TokenVerifier for JwtTokenCodec {
    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;

        if self.clock.utc().timestamp() > claims.exp {
            return Err(TokenError::expired());
        }

        UserId::new(&claims.sub).map_err(|err| TokenError::invalid(format!("bad subject: {err}")))
    }
}
