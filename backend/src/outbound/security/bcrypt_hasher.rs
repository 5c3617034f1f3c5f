//! bcrypt-backed `PasswordHasher`.

use async_trait::async_trait;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Work factor used for every stored hash.
pub const BCRYPT_COST: u32 = 10;

/// Password hasher using bcrypt on Tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: BCRYPT_COST }
    }
}

impl BcryptPasswordHasher {
    /// Hasher with a non-default work factor. Tests use the bcrypt minimum.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        TraceId::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_str().to_owned();
        TraceId::spawn_blocking(move || bcrypt::verify(password.as_str(), &encoded))
            .await
            .map_err(|err| PasswordHasherError::verification(err.to_string()))?
            .map_err(|err| PasswordHasherError::verification(err.to_string()))
    }
}
