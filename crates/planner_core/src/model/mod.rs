//! Domain model for the planning data set.
//!
//! # Responsibility
//! - Define the four top-level records (volunteer, song, service, team) and
//!   the blocks owned by services.
//! - Define creation drafts and partial-update patches for each record.
//!
//! # Invariants
//! - Every record is identified by a UUID that is never reused.
//! - Cross-record references are id-based in every direction.
//! - Block `order` inside a service is exactly `1..=N` in storage order.

pub mod service;
pub mod song;
pub mod team;
pub mod validation;
pub mod volunteer;

use uuid::Uuid;
use validation::ValidationError;

/// Top-level collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Volunteers,
    Songs,
    Services,
    Teams,
}

impl CollectionKind {
    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Volunteers => "volunteers",
            Self::Songs => "songs",
            Self::Services => "services",
            Self::Teams => "teams",
        }
    }
}

/// Record stored in one of the top-level collections.
pub trait Record: Clone {
    /// Collection this record type lives in.
    const COLLECTION: CollectionKind;

    /// Stable record id.
    fn id(&self) -> Uuid;

    /// Checks field-level invariants of a complete record.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Creation input for a record; everything except the id.
pub trait Draft {
    type Output: Record;

    /// Builds the full record under the store-assigned id.
    fn into_record(self, id: Uuid) -> Self::Output;
}

/// Partial update merged shallowly into an existing record.
///
/// Fields left as `None` are untouched; nested collections are replaced
/// wholesale, never merged element-wise.
pub trait Patch<T> {
    fn apply_to(self, record: &mut T);
}
