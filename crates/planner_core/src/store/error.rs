use crate::model::validation::ValidationError;
use crate::model::CollectionKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from store mutations.
///
/// Unknown ids are not errors: update and delete on a missing record are
/// silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input failed field validation; nothing was written.
    Validation(ValidationError),
    /// Delete refused under `ReferencePolicy::Reject`.
    StillReferenced {
        collection: CollectionKind,
        id: Uuid,
        references: usize,
    },
    /// Seeded record reuses an id already present in its collection.
    DuplicateId { collection: CollectionKind, id: Uuid },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StillReferenced {
                collection,
                id,
                references,
            } => write!(
                f,
                "cannot delete {id} from {}: still referenced {references} time(s)",
                collection.as_str()
            ),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate id {id} in {}", collection.as_str())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::StillReferenced { .. } => None,
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
