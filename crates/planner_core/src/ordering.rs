//! Ordered block sequence operations.
//!
//! # Responsibility
//! - Move, append and remove blocks inside one service run-sheet.
//! - Rewrite `order` so it always mirrors storage position.
//!
//! # Invariants
//! - Every returned sequence satisfies `blocks[i].order == i + 1`.
//! - Functions are pure: inputs are never mutated, and `None` means
//!   "nothing to commit".

use crate::model::service::{Block, BlockId};

/// Rewrites every `order` field to its 1-based position.
pub fn renumber(blocks: &mut [Block]) {
    for (index, block) in blocks.iter_mut().enumerate() {
        block.order = position(index);
    }
}

/// Returns whether `order` values are exactly `1..=N` in storage order.
pub fn is_contiguous(blocks: &[Block]) -> bool {
    blocks
        .iter()
        .enumerate()
        .all(|(index, block)| block.order == position(index))
}

/// Moves the block at `from` to `to`, shifting the blocks in between.
///
/// Returns `None` when `from == to` or either index is out of bounds.
pub fn move_block(blocks: &[Block], from: usize, to: usize) -> Option<Vec<Block>> {
    if from == to || from >= blocks.len() || to >= blocks.len() {
        return None;
    }

    let mut next = blocks.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    renumber(&mut next);
    Some(next)
}

/// Appends `block` at the end with `order = len + 1`.
pub fn append_block(blocks: &[Block], block: Block) -> Vec<Block> {
    let mut next = Vec::with_capacity(blocks.len() + 1);
    next.extend_from_slice(blocks);
    next.push(block);
    renumber(&mut next);
    next
}

/// Removes the block with `block_id` and closes the gap.
///
/// Returns `None` when no block has that id.
pub fn remove_block(blocks: &[Block], block_id: BlockId) -> Option<Vec<Block>> {
    if !blocks.iter().any(|block| block.id == block_id) {
        return None;
    }

    let mut next: Vec<Block> = blocks
        .iter()
        .filter(|block| block.id != block_id)
        .cloned()
        .collect();
    renumber(&mut next);
    Some(next)
}

fn position(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{append_block, is_contiguous, move_block, remove_block, renumber};
    use crate::model::service::{Block, NewBlock};
    use uuid::Uuid;

    fn run_sheet(titles: &[&str]) -> Vec<Block> {
        let mut blocks: Vec<Block> = titles
            .iter()
            .map(|title| NewBlock::custom(*title).into_block(Uuid::new_v4()))
            .collect();
        renumber(&mut blocks);
        blocks
    }

    fn titles(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|block| block.title.as_str()).collect()
    }

    #[test]
    fn move_first_to_last_shifts_others_up() {
        let blocks = run_sheet(&["A", "B", "C"]);

        let moved = move_block(&blocks, 0, 2).unwrap();
        assert_eq!(titles(&moved), vec!["B", "C", "A"]);
        assert_eq!(
            moved.iter().map(|block| block.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn move_last_to_first_shifts_others_down() {
        let blocks = run_sheet(&["A", "B", "C", "D"]);

        let moved = move_block(&blocks, 3, 0).unwrap();
        assert_eq!(titles(&moved), vec!["D", "A", "B", "C"]);
        assert!(is_contiguous(&moved));
    }

    #[test]
    fn move_with_equal_or_out_of_range_indices_is_noop() {
        let blocks = run_sheet(&["A", "B"]);

        assert!(move_block(&blocks, 1, 1).is_none());
        assert!(move_block(&blocks, 0, 2).is_none());
        assert!(move_block(&blocks, 5, 0).is_none());
        assert!(move_block(&[], 0, 0).is_none());
    }

    #[test]
    fn append_assigns_next_position() {
        let blocks = run_sheet(&["A", "B"]);
        let appended = append_block(&blocks, NewBlock::custom("C").into_block(Uuid::new_v4()));

        assert_eq!(appended.len(), 3);
        assert_eq!(appended[2].order, 3);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn remove_closes_gap_and_missing_id_is_noop() {
        let blocks = run_sheet(&["A", "B", "C"]);

        let removed = remove_block(&blocks, blocks[1].id).unwrap();
        assert_eq!(titles(&removed), vec!["A", "C"]);
        assert!(is_contiguous(&removed));

        assert!(remove_block(&blocks, Uuid::new_v4()).is_none());
    }

    #[test]
    fn is_contiguous_detects_gaps_and_duplicates() {
        let mut blocks = run_sheet(&["A", "B", "C"]);
        assert!(is_contiguous(&blocks));

        blocks[2].order = 4;
        assert!(!is_contiguous(&blocks));

        blocks[2].order = 2;
        assert!(!is_contiguous(&blocks));
    }
}
