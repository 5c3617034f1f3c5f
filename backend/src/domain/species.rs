//! Pokémon species identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::is_valid_species_name;

/// Validation errors for species names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeciesNameError {
    #[error("Pokémon name is required")]
    Empty,
    #[error("Invalid Pokémon name format")]
    InvalidFormat,
}

/// Storage identifier of a species row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(Uuid);

impl SpeciesId {
    /// Generate a fresh identifier for a new species row.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonical species name: trimmed, lowercased, 1 to 50 ASCII letters,
/// digits or hyphens.
///
/// Two inputs that differ only in case or surrounding whitespace produce the
/// same [`SpeciesName`], which is what keeps species rows unique.
///
/// # Examples
/// ```
/// use pokedex::domain::SpeciesName;
///
/// let name = SpeciesName::parse("  Pikachu ").unwrap();
/// assert_eq!(name.as_ref(), "pikachu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpeciesName(String);

impl SpeciesName {
    /// Normalise and validate a name for catching.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, SpeciesNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SpeciesNameError::Empty);
        }
        if !is_valid_species_name(trimmed) {
            return Err(SpeciesNameError::InvalidFormat);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl AsRef<str> for SpeciesName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SpeciesName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SpeciesName> for String {
    fn from(value: SpeciesName) -> Self {
        value.0
    }
}

impl TryFrom<String> for SpeciesName {
    type Error = SpeciesNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Species row shared by every trainer who caught it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: SpeciesName,
}
