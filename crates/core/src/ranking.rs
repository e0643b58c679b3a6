//! Rank assignment for the ordered wishlist.
//!
//! Reordering is always expressed as a full rewrite of ranks: the caller
//! rearranges ids in list order, then [`contiguous_ranks`] assigns
//! `position + 1` to every entry and the whole mapping is written in one
//! batch.

use serde::{Deserialize, Serialize};

use crate::destination::ENTITY_NAME;
use crate::error::CoreError;
use crate::types::DbId;

/// Lowest valid rank.
pub const MIN_RANK: i32 = 1;

/// One `(id, rank)` pair of a bulk reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankAssignment {
    pub id: DbId,
    pub rank: i32,
}

/// Direction for moving a single destination by one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Validate that a rank is at least [`MIN_RANK`].
pub fn validate_rank(rank: i32) -> Result<(), CoreError> {
    if rank < MIN_RANK {
        return Err(CoreError::Validation(format!(
            "rank must be at least {MIN_RANK}, got {rank}"
        )));
    }
    Ok(())
}

/// Assign ranks `1..=N` to ids in the given order.
pub fn contiguous_ranks(ordered_ids: &[DbId]) -> Vec<RankAssignment> {
    ordered_ids
        .iter()
        .enumerate()
        .map(|(position, &id)| RankAssignment {
            id,
            rank: position as i32 + MIN_RANK,
        })
        .collect()
}

/// Swap `id` with its neighbour in `direction`.
///
/// Returns the new id order, or `None` when the item is already first
/// (moving up) or last (moving down). An id that is not in the list is
/// `CoreError::NotFound`.
pub fn move_item(
    ordered_ids: &[DbId],
    id: DbId,
    direction: MoveDirection,
) -> Result<Option<Vec<DbId>>, CoreError> {
    let index = ordered_ids
        .iter()
        .position(|&candidate| candidate == id)
        .ok_or(CoreError::NotFound {
            entity: ENTITY_NAME,
            id,
        })?;

    let neighbour = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => Some(index + 1).filter(|&n| n < ordered_ids.len()),
    };

    Ok(neighbour.map(|n| {
        let mut reordered = ordered_ids.to_vec();
        reordered.swap(index, n);
        reordered
    }))
}
