//! Authentication primitives: credentials, password hashes and access tokens.
//!
//! Inbound payload parsing stays outside the domain. Handlers pass raw strings
//! to the constructors here, which validate them before any port is called.

use std::fmt;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use super::user::{EmailAddress, User, UserValidationError};
use super::validation::{PASSWORD_MIN_LENGTH, is_valid_password};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email or password was missing or blank.
    #[error("Email and password are required")]
    MissingFields,
    /// Email did not have the expected shape.
    #[error("Invalid email format")]
    InvalidEmail,
    /// Password was shorter than the minimum length.
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

fn parse_email(raw: &str) -> Result<EmailAddress, CredentialsValidationError> {
    EmailAddress::new(raw).map_err(|err| match err {
        UserValidationError::EmptyEmail => CredentialsValidationError::MissingFields,
        _ => CredentialsValidationError::InvalidEmail,
    })
}

fn require_present(email: &str, password: &str) -> Result<(), CredentialsValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(CredentialsValidationError::MissingFields);
    }
    Ok(())
}

/// Validated registration input.
///
/// ## Invariants
/// - `email` is trimmed, lowercased and well formed.
/// - `password` has at least [`PASSWORD_MIN_LENGTH`] characters and keeps any
///   caller-provided whitespace.
///
/// # Examples
/// ```
/// use pokedex::domain::RegistrationCredentials;
///
/// let creds = RegistrationCredentials::try_from_parts(" Ash@Pallet.Town", "pikachu").unwrap();
/// assert_eq!(creds.email().as_ref(), "ash@pallet.town");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationCredentials {
    /// Construct registration input from raw email/password strings.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        require_present(email, password)?;
        let email = parse_email(email)?;
        if !is_valid_password(password) {
            return Err(CredentialsValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login input.
///
/// Unlike registration, the password length is not checked here: a short
/// password simply fails verification with the generic credentials error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct login input from raw email/password strings.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        require_present(email, password)?;
        let email = parse_email(email)?;
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque password hash produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash as stored.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Stored user record including the credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    user: User,
    password_hash: PasswordHash,
}

impl UserAccount {
    /// Pair a user with the hash of their password.
    pub fn new(user: User, password_hash: PasswordHash) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Public identity of the account.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored credential hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Drop the credential hash and keep the public user.
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Signed bearer token handed to a client after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Wrap an encoded token and the instant it stops being accepted.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Encoded token string for the `Authorization: Bearer` header.
    pub fn as_str(&self) -> &str {
        self.token.as_str()
    }

    /// Instant after which verification rejects the token.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "secret", CredentialsValidationError::MissingFields)]
    #[case("   ", "secret", CredentialsValidationError::MissingFields)]
    #[case("ash@pallet.town", "", CredentialsValidationError::MissingFields)]
    #[case("ash", "secret", CredentialsValidationError::InvalidEmail)]
    #[case("ash@pallet.town", "12345", CredentialsValidationError::PasswordTooShort { min: 6 })]
    fn invalid_registration(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = RegistrationCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_keeps_password_whitespace() {
        let creds = RegistrationCredentials::try_from_parts("ash@pallet.town", " pika ")
            .expect("valid inputs");
        assert_eq!(creds.password(), " pika ");
    }

    #[rstest]
    #[case(CredentialsValidationError::MissingFields, "Email and password are required")]
    #[case(CredentialsValidationError::InvalidEmail, "Invalid email format")]
    #[case(
        CredentialsValidationError::PasswordTooShort { min: 6 },
        "Password must be at least 6 characters long"
    )]
    fn validation_messages(#[case] err: CredentialsValidationError, #[case] expected: &str) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    fn login_does_not_check_password_length() {
        let creds = LoginCredentials::try_from_parts("  ASH@pallet.town ", "abc")
            .expect("short password still parses");
        assert_eq!(creds.email().as_ref(), "ash@pallet.town");
        assert_eq!(creds.password(), "abc");
    }

    #[rstest]
    #[case("", "abc", CredentialsValidationError::MissingFields)]
    #[case("nope", "abc", CredentialsValidationError::InvalidEmail)]
    fn invalid_login(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(email, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$10$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
