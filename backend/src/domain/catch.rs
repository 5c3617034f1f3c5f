//! Catch records linking a trainer to a species.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::species::Species;
use super::user::UserId;

/// Storage identifier of a catch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatchId(Uuid);

impl CatchId {
    /// Generate a fresh identifier for a new record.
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

impl fmt::Display for CatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A catch record joined with its species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtPokemon {
    pub id: CatchId,
    pub user_id: UserId,
    pub species: Species,
    pub caught_at: DateTime<Utc>,
}

/// Insert request for a new catch record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatch {
    pub id: CatchId,
    pub user_id: UserId,
    pub species: Species,
    pub caught_at: DateTime<Utc>,
}

impl From<NewCatch> for CaughtPokemon {
    fn from(value: NewCatch) -> Self {
        let NewCatch {
            id,
            user_id,
            species,
            caught_at,
        } = value;
        Self {
            id,
            user_id,
            species,
            caught_at,
        }
    }
}

/// Outcome of a catch attempt.
///
/// Catching a species twice is not an error: the existing record comes back
/// as [`CatchOutcome::AlreadyCaught`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchOutcome {
    Caught(CaughtPokemon),
    AlreadyCaught(CaughtPokemon),
}

impl CatchOutcome {
    /// The stored record, whether new or pre-existing.
    pub fn into_record(self) -> CaughtPokemon {
        match self {
            Self::Caught(record) | Self::AlreadyCaught(record) => record,
        }
    }

    /// `true` when this attempt created the record.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Caught(_))
    }
}
