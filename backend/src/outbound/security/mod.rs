//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.

mod bcrypt_hasher;
mod jwt_codec;

pub use bcrypt_hasher::{BCRYPT_COST, BcryptPasswordHasher};
pub use jwt_codec::JwtTokenCodec;
