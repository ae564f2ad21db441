//! Sync coordinator
//!
//! Owns the dual-persistence policy: remote first, local always. Remote
//! failures are logged and swallowed (the cache is the guaranteed
//! fallback); cache failures propagate (there is nothing left to fall
//! back to). Within one operation the remote write happens before the
//! local mirror write; the pair is not atomic, and divergence heals on
//! the next successful [`SyncCoordinator::read_day`].
//!
//! No other component writes to either store.

use std::sync::Arc;

use shared::models::{IdentityRecord, VisitorRecord};

use crate::cache::LocalCache;
use crate::error::SyncResult;
use crate::remote::RemoteStore;

pub struct SyncCoordinator {
    remote: Arc<dyn RemoteStore>,
    cache: LocalCache,
}

impl SyncCoordinator {
    /// Both halves are handed in explicitly; re-initialization (say,
    /// after credential rotation) is a new construction.
    pub fn new(remote: Arc<dyn RemoteStore>, cache: LocalCache) -> Self {
        Self { remote, cache }
    }

    // ========== Visitors ==========

    /// The day's records, sorted by sequence number, soft-deleted
    /// included.
    ///
    /// On a remote hit, every returned record is upserted into the cache
    /// (no delete-on-missing) and the remote view wins. On any remote
    /// failure the cached day is served as-is, staleness and all.
    pub async fn read_day(&self, day: &str) -> SyncResult<Vec<VisitorRecord>> {
        match self.remote.fetch_day(day, None).await {
            Ok(mut records) => {
                for record in &records {
                    self.cache.put_visitor(record)?;
                }
                records.sort_by_key(|r| r.sequence_number);
                Ok(records)
            }
            Err(err) => {
                tracing::warn!(%day, error = %err, "remote fetch failed, serving cached day");
                Ok(self.cache.visitors_for_day(day)?)
            }
        }
    }

    /// Persist a new record and return it as stored.
    ///
    /// If another writer took the record's sequence number since the
    /// caller allocated it, the number is re-allocated to
    /// `max(existing) + 1` before anything is written.
    pub async fn create(&self, mut record: VisitorRecord) -> SyncResult<VisitorRecord> {
        let existing = self.read_day(&record.day).await?;
        let taken = existing
            .iter()
            .any(|r| r.id != record.id && r.sequence_number == record.sequence_number);
        if taken {
            let next = existing
                .iter()
                .map(|r| r.sequence_number)
                .max()
                .unwrap_or(0)
                + 1;
            tracing::warn!(
                day = %record.day,
                taken = record.sequence_number,
                reallocated = next,
                "sequence number collision, re-allocating"
            );
            record.sequence_number = next;
        }

        if let Err(err) = self.remote.upsert_visitor(&record, None).await {
            tracing::warn!(id = %record.id, error = %err, "remote create failed, record kept locally");
        }
        self.cache.put_visitor(&record)?;
        Ok(record)
    }

    /// Persist an edit to an existing record, keyed by its id. Sequence
    /// number and day are left as the caller received them.
    pub async fn update(&self, record: &VisitorRecord) -> SyncResult<()> {
        if let Err(err) = self.remote.upsert_visitor(record, None).await {
            tracing::warn!(id = %record.id, error = %err, "remote update failed, record kept locally");
        }
        self.cache.put_visitor(record)?;
        Ok(())
    }

    /// Mark a record cancelled. Its sequence number stays reserved.
    /// Missing locally is a silent no-op.
    pub async fn soft_delete(&self, id: &str, day: &str) -> SyncResult<()> {
        if let Err(err) = self.remote.soft_delete(id, None).await {
            tracing::warn!(%id, %day, error = %err, "remote delete failed, marked locally only");
        }
        self.cache.set_deleted(id, true)?;
        Ok(())
    }

    /// Undo a soft delete. Restoring a record that is not deleted leaves
    /// it unchanged.
    pub async fn restore(&self, id: &str, day: &str) -> SyncResult<()> {
        if let Err(err) = self.remote.restore(id, None).await {
            tracing::warn!(%id, %day, error = %err, "remote restore failed, marked locally only");
        }
        self.cache.set_deleted(id, false)?;
        Ok(())
    }

    // ========== Identities ==========

    /// Most recent identity for a normalized phone key. Pure lookup:
    /// remote hits are NOT mirrored into the cache.
    pub async fn find_identity(&self, phone: &str) -> SyncResult<Option<IdentityRecord>> {
        match self.remote.fetch_identity(phone, None).await {
            Ok(found) => Ok(found),
            Err(err) => {
                tracing::warn!(%phone, error = %err, "remote identity lookup failed, trying cache");
                Ok(self.cache.identity(phone)?)
            }
        }
    }

    /// Upsert an identity into both stores, keyed by phone. Last write
    /// wins; surname and rank are replaced wholesale.
    pub async fn save_identity(&self, record: &IdentityRecord) -> SyncResult<()> {
        if let Err(err) = self.remote.upsert_identity(record, None).await {
            tracing::warn!(phone = %record.phone, error = %err, "remote identity save failed, kept locally");
        }
        self.cache.put_identity(record)?;
        Ok(())
    }

    // ========== Flags ==========

    // Flag storage lives in the cache, but writes go through the
    // coordinator like every other mutation.

    pub fn flag(&self, name: &str) -> SyncResult<bool> {
        Ok(self.cache.flag(name)?)
    }

    pub fn set_flag(&self, name: &str, value: bool) -> SyncResult<()> {
        Ok(self.cache.set_flag(name, value)?)
    }
}
