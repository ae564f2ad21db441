//! Per-day sequence allocation

use crate::error::SyncResult;
use crate::sync::SyncCoordinator;

/// Computes the next ordinal for a new visitor within a day.
///
/// Numbering starts at 1 and never reuses a number: soft-deleted records
/// keep theirs reserved, so the scan includes them. Allocation is a pure
/// read-compute step; collisions between two racing allocators are
/// caught at write time by [`SyncCoordinator::create`].
pub struct SequenceAllocator<'a> {
    coordinator: &'a SyncCoordinator,
}

impl<'a> SequenceAllocator<'a> {
    pub fn new(coordinator: &'a SyncCoordinator) -> Self {
        Self { coordinator }
    }

    pub async fn next_for_day(&self, day: &str) -> SyncResult<u32> {
        let records = self.coordinator.read_day(day).await?;
        Ok(records
            .iter()
            .map(|r| r.sequence_number)
            .max()
            .map_or(1, |max| max + 1))
    }
}
