//! Shape checks for user-supplied strings.
//!
//! These are pure predicates. Value types such as [`crate::domain::EmailAddress`]
//! and [`crate::domain::SpeciesName`] call them after trimming input, and
//! turn a failed check into a typed validation error.

use std::sync::OnceLock;

use regex::Regex;

/// Maximum number of characters accepted for an email address.
pub const EMAIL_MAX_LENGTH: usize = 320;
/// Minimum number of characters accepted for a password.
pub const PASSWORD_MIN_LENGTH: usize = 6;
/// Maximum number of characters accepted for a species name.
pub const SPECIES_NAME_MAX_LENGTH: usize = 50;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static SPECIES_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn species_name_regex() -> &'static Regex {
    SPECIES_NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9-]{1,50}$")
            .unwrap_or_else(|error| panic!("species name regex failed to compile: {error}"))
    })
}

/// Return `true` when `email` has a local part, an `@`, and a dotted domain
/// with no whitespace anywhere, in at most [`EMAIL_MAX_LENGTH`] characters.
///
/// # Examples
/// ```
/// use pokedex::domain::validation::is_valid_email;
///
/// assert!(is_valid_email("ash@pallet.town"));
/// assert!(!is_valid_email("ash@pallet"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email.chars().count() <= EMAIL_MAX_LENGTH && email_regex().is_match(email)
}

/// Return `true` when `password` has at least [`PASSWORD_MIN_LENGTH`]
/// characters.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
}

/// Return `true` when `name` is 1 to [`SPECIES_NAME_MAX_LENGTH`] ASCII
/// letters, digits or hyphens.
pub fn is_valid_species_name(name: &str) -> bool {
    species_name_regex().is_match(name)
}
