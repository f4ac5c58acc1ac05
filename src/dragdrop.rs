//! Drop-event handling for the board. Movement is free: any column to any
//! column, not just the Todo -> InProgress -> Done sequence.

use tracing::debug;

use crate::error::Result;
use crate::model::Status;
use crate::store::Store;

/// What happened to a drop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved,
    /// The task vanished between pick-up and drop (e.g. deleted meanwhile).
    /// Dropped on the floor without an error, matching the original board.
    Ignored,
}

/// Apply a drop of task `id` onto the `target` column.
///
/// All mutations run to completion inside a single handler, so a drop can
/// never race a delete; a stale id just means the delete ran first.
pub fn handle_drop(store: &mut Store, id: &str, target: Status) -> Result<DropOutcome> {
    if store.get(id).is_none() {
        debug!(id, target = %target, "drop ignored: task no longer exists");
        return Ok(DropOutcome::Ignored);
    }
    store.set_status(id, target)?;
    Ok(DropOutcome::Moved)
}
