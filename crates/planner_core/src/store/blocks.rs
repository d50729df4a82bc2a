//! Run-sheet mutations on the blocks owned by one service.
//!
//! # Invariants
//! - The new block sequence is computed in full before it replaces the old
//!   one, so a partially renumbered sequence is never visible.
//! - Unknown service or block ids are no-ops.

use crate::model::service::{BlockId, BlockPatch, NewBlock, ServiceId};
use crate::model::{CollectionKind, Patch};
use crate::ordering;
use crate::store::error::StoreResult;
use crate::store::listener::ChangeKind;
use crate::store::planner_store::{log_missing, PlannerStore};
use log::{debug, warn};
use uuid::Uuid;

impl PlannerStore {
    /// Appends a block to the end of a service run-sheet.
    ///
    /// Returns `Ok(None)` when the service does not exist.
    pub fn add_block(
        &mut self,
        service_id: ServiceId,
        draft: NewBlock,
    ) -> StoreResult<Option<BlockId>> {
        let Some(service) = self.services.get_mut(service_id) else {
            log_missing(CollectionKind::Services, "block_add", service_id);
            return Ok(None);
        };

        let block_id = loop {
            let candidate = Uuid::new_v4();
            if service.block(candidate).is_none() {
                break candidate;
            }
        };
        let block = draft.into_block(block_id);
        if let Err(err) = block.validate() {
            warn!(
                "event=block_add module=store status=rejected service={} reason=\"{}\"",
                service_id, err
            );
            return Err(err.into());
        }

        service.blocks = ordering::append_block(&service.blocks, block);
        self.commit(CollectionKind::Services, ChangeKind::Updated, service_id);
        Ok(Some(block_id))
    }

    /// Merges `patch` into one block. Position is left untouched.
    pub fn update_block(
        &mut self,
        service_id: ServiceId,
        block_id: BlockId,
        patch: BlockPatch,
    ) -> StoreResult<()> {
        let Some(service) = self.services.get_mut(service_id) else {
            log_missing(CollectionKind::Services, "block_update", service_id);
            return Ok(());
        };
        let Some(index) = service.block_index(block_id) else {
            debug!(
                "event=block_update module=store status=skipped reason=block_not_found service={} block={}",
                service_id, block_id
            );
            return Ok(());
        };

        let mut candidate = service.blocks[index].clone();
        patch.apply_to(&mut candidate);
        if let Err(err) = candidate.validate() {
            warn!(
                "event=block_update module=store status=rejected service={} block={} reason=\"{}\"",
                service_id, block_id, err
            );
            return Err(err.into());
        }

        service.blocks[index] = candidate;
        self.commit(CollectionKind::Services, ChangeKind::Updated, service_id);
        Ok(())
    }

    /// Removes a block and renumbers the remaining ones.
    ///
    /// Returns whether anything was removed.
    pub fn delete_block(&mut self, service_id: ServiceId, block_id: BlockId) -> bool {
        let Some(service) = self.services.get_mut(service_id) else {
            log_missing(CollectionKind::Services, "block_delete", service_id);
            return false;
        };
        let Some(blocks) = ordering::remove_block(&service.blocks, block_id) else {
            debug!(
                "event=block_delete module=store status=skipped reason=block_not_found service={} block={}",
                service_id, block_id
            );
            return false;
        };

        service.blocks = blocks;
        self.commit(CollectionKind::Services, ChangeKind::Updated, service_id);
        true
    }

    /// Moves the block at index `from` to index `to`.
    ///
    /// Returns `false` without committing when the indices are equal or out
    /// of bounds.
    pub fn move_block(&mut self, service_id: ServiceId, from: usize, to: usize) -> bool {
        let Some(service) = self.services.get_mut(service_id) else {
            log_missing(CollectionKind::Services, "block_move", service_id);
            return false;
        };
        let Some(blocks) = ordering::move_block(&service.blocks, from, to) else {
            debug!(
                "event=block_move module=store status=skipped service={} from={} to={} len={}",
                service_id,
                from,
                to,
                service.blocks.len()
            );
            return false;
        };

        service.blocks = blocks;
        self.commit(
            CollectionKind::Services,
            ChangeKind::BlocksReordered,
            service_id,
        );
        true
    }

    /// Moves `source` into the position currently held by `target`.
    ///
    /// Drag-and-drop entry point; the same id on both sides is a no-op.
    pub fn move_block_by_id(
        &mut self,
        service_id: ServiceId,
        source: BlockId,
        target: BlockId,
    ) -> bool {
        if source == target {
            return false;
        }
        let Some(service) = self.services.get(service_id) else {
            log_missing(CollectionKind::Services, "block_move", service_id);
            return false;
        };
        match (service.block_index(source), service.block_index(target)) {
            (Some(from), Some(to)) => self.move_block(service_id, from, to),
            _ => false,
        }
    }
}
