//! Insertion-ordered record collection keyed by UUID.
//!
//! # Invariants
//! - No two records share an id.
//! - Storage order is insertion order; updates replace in place.
//! - A failed validation leaves the collection unchanged.

use crate::model::validation::ValidationError;
use crate::model::{Draft, Patch, Record};
use crate::store::error::{StoreError, StoreResult};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.records.iter_mut()
    }

    /// Validates and appends a draft under a fresh id.
    pub(crate) fn insert_draft<D>(&mut self, draft: D) -> Result<Uuid, ValidationError>
    where
        D: Draft<Output = T>,
    {
        let id = self.fresh_id();
        let record = draft.into_record(id);
        record.validate()?;
        self.records.push(record);
        Ok(id)
    }

    /// Appends a record that already carries its id (fixture seeding).
    pub(crate) fn insert_record(&mut self, record: T) -> StoreResult<()> {
        if self.contains(record.id()) {
            return Err(StoreError::DuplicateId {
                collection: T::COLLECTION,
                id: record.id(),
            });
        }
        record.validate()?;
        self.records.push(record);
        Ok(())
    }

    /// Merges `patch` into the record with `id`.
    ///
    /// Returns `Ok(false)` when no record has that id.
    pub(crate) fn update<P>(&mut self, id: Uuid, patch: P) -> Result<bool, ValidationError>
    where
        P: Patch<T>,
    {
        let Some(slot) = self.records.iter_mut().find(|record| record.id() == id) else {
            return Ok(false);
        };

        let mut candidate = slot.clone();
        patch.apply_to(&mut candidate);
        candidate.validate()?;
        *slot = candidate;
        Ok(true)
    }

    pub(crate) fn remove(&mut self, id: Uuid) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let candidate = Uuid::new_v4();
            if !self.contains(candidate) {
                return candidate;
            }
        }
    }
}
