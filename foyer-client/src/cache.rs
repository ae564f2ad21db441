//! redb-based local cache
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `visitors` | `id` | `VisitorRecord` (JSON) | Full replica, keyed by id |
//! | `visitor_days` | `(day, id)` | `()` | Day index |
//! | `identities` | `phone` | `IdentityRecord` (JSON) | Phone lookups |
//! | `flags` | name | `bool` | One-shot markers (legacy migration) |
//!
//! Every mutation is mirrored here regardless of remote outcome, so the
//! cache must stay consistent on its own: a visitor upsert writes the
//! row and its day-index entry in one transaction. `day` is immutable,
//! so index entries are never moved.
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns (copy-on-
//! write with atomic pointer swap). The front-desk tablet can lose power
//! mid-shift without losing committed entries.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{IdentityRecord, VisitorRecord};
use thiserror::Error;

/// Visitor replica: key = record id, value = JSON-serialized VisitorRecord
const VISITORS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("visitors");

/// Day index: key = (day, record id), value = empty (existence check)
const VISITOR_DAYS_TABLE: TableDefinition<(&str, &str), ()> = TableDefinition::new("visitor_days");

/// Identity replica: key = normalized phone, value = JSON-serialized IdentityRecord
const IDENTITIES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("identities");

/// One-shot flags: key = flag name, value = bool
const FLAGS_TABLE: TableDefinition<&str, bool> = TableDefinition::new("flags");

/// Upper bound for the id component when range-scanning one day.
const DAY_RANGE_END: &str = "\u{10FFFF}";

/// Cache errors. Fatal to the operation that hits them: the cache is the
/// last fallback, there is nowhere further to degrade.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// On-device replica of the visitor log, backed by redb.
#[derive(Clone)]
pub struct LocalCache {
    db: Arc<Database>,
}

impl LocalCache {
    /// Open or create the cache database at the given path.
    pub fn open(path: impl AsRef<Path>) -> CacheResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory cache (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> CacheResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> CacheResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(VISITORS_TABLE)?;
            let _ = write_txn.open_table(VISITOR_DAYS_TABLE)?;
            let _ = write_txn.open_table(IDENTITIES_TABLE)?;
            let _ = write_txn.open_table(FLAGS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    // ========== Visitors ==========

    /// Insert or replace a visitor, keyed by id. Also maintains the day
    /// index in the same transaction.
    pub fn put_visitor(&self, record: &VisitorRecord) -> CacheResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut visitors = txn.open_table(VISITORS_TABLE)?;
            let value = serde_json::to_vec(record)?;
            visitors.insert(record.id.as_str(), value.as_slice())?;

            let mut days = txn.open_table(VISITOR_DAYS_TABLE)?;
            days.insert((record.day.as_str(), record.id.as_str()), ())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Point read by record id.
    pub fn visitor(&self, id: &str) -> CacheResult<Option<VisitorRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VISITORS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All cached records for a day (soft-deleted included), sorted by
    /// sequence number.
    pub fn visitors_for_day(&self, day: &str) -> CacheResult<Vec<VisitorRecord>> {
        let read_txn = self.db.begin_read()?;
        let days = read_txn.open_table(VISITOR_DAYS_TABLE)?;
        let visitors = read_txn.open_table(VISITORS_TABLE)?;

        let mut records = Vec::new();
        for entry in days.range((day, "")..=(day, DAY_RANGE_END))? {
            let (key, _) = entry?;
            let (_, id) = key.value();
            if let Some(value) = visitors.get(id)? {
                let record: VisitorRecord = serde_json::from_slice(value.value())?;
                records.push(record);
            }
        }

        records.sort_by_key(|r| r.sequence_number);
        Ok(records)
    }

    /// Flip the soft-delete flag on a cached record. Silent no-op when
    /// the record is not cached.
    pub fn set_deleted(&self, id: &str, deleted: bool) -> CacheResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(VISITORS_TABLE)?;

            // Read and decode first to avoid holding the guard across
            // the insert.
            let record_opt = match table.get(id)? {
                Some(value) => Some(serde_json::from_slice::<VisitorRecord>(value.value())?),
                None => None,
            };

            if let Some(mut record) = record_opt {
                record.is_deleted = deleted;
                let value = serde_json::to_vec(&record)?;
                table.insert(id, value.as_slice())?;
            }
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Identities ==========

    /// Insert or replace an identity, keyed by phone. Last write wins.
    pub fn put_identity(&self, record: &IdentityRecord) -> CacheResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(IDENTITIES_TABLE)?;
            let value = serde_json::to_vec(record)?;
            table.insert(record.phone.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Exact-key identity lookup.
    pub fn identity(&self, phone: &str) -> CacheResult<Option<IdentityRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(IDENTITIES_TABLE)?;
        match table.get(phone)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All cached identities.
    pub fn identities(&self) -> CacheResult<Vec<IdentityRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(IDENTITIES_TABLE)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    // ========== Flags ==========

    pub fn flag(&self, name: &str) -> CacheResult<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FLAGS_TABLE)?;
        Ok(table.get(name)?.map(|v| v.value()).unwrap_or(false))
    }

    pub fn set_flag(&self, name: &str, value: bool) -> CacheResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(FLAGS_TABLE)?;
            table.insert(name, value)?;
        }
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::TableZone;

    fn record(id: &str, day: &str, sequence: u32) -> VisitorRecord {
        VisitorRecord {
            id: id.to_string(),
            sequence_number: sequence,
            day: day.to_string(),
            phone: "6900000000".to_string(),
            surname: "Ioannou".to_string(),
            rank: "Member".to_string(),
            zone: TableZone::DiningRoom,
            table_number: Some(5),
            person_count: 2,
            arrival_time: "20:30".to_string(),
            is_deleted: false,
        }
    }

    #[test]
    fn put_and_get_visitor() {
        let cache = LocalCache::open_in_memory().unwrap();
        let v = record("a", "2025-03-07", 1);
        cache.put_visitor(&v).unwrap();

        assert_eq!(cache.visitor("a").unwrap(), Some(v));
        assert_eq!(cache.visitor("missing").unwrap(), None);
    }

    #[test]
    fn put_visitor_is_upsert() {
        let cache = LocalCache::open_in_memory().unwrap();
        let mut v = record("a", "2025-03-07", 1);
        cache.put_visitor(&v).unwrap();

        v.surname = "Georgiou".to_string();
        cache.put_visitor(&v).unwrap();

        assert_eq!(cache.visitor("a").unwrap().unwrap().surname, "Georgiou");
        assert_eq!(cache.visitors_for_day("2025-03-07").unwrap().len(), 1);
    }

    #[test]
    fn day_index_separates_days_and_sorts() {
        let cache = LocalCache::open_in_memory().unwrap();
        cache.put_visitor(&record("b", "2025-03-07", 2)).unwrap();
        cache.put_visitor(&record("a", "2025-03-07", 1)).unwrap();
        cache.put_visitor(&record("c", "2025-03-08", 1)).unwrap();

        let day_one = cache.visitors_for_day("2025-03-07").unwrap();
        assert_eq!(day_one.len(), 2);
        assert_eq!(day_one[0].sequence_number, 1);
        assert_eq!(day_one[1].sequence_number, 2);

        assert_eq!(cache.visitors_for_day("2025-03-08").unwrap().len(), 1);
        assert!(cache.visitors_for_day("2025-03-09").unwrap().is_empty());
    }

    #[test]
    fn set_deleted_flips_flag_and_tolerates_missing() {
        let cache = LocalCache::open_in_memory().unwrap();
        cache.put_visitor(&record("a", "2025-03-07", 1)).unwrap();

        cache.set_deleted("a", true).unwrap();
        assert!(cache.visitor("a").unwrap().unwrap().is_deleted);

        // Double delete keeps the flag set, restore clears it.
        cache.set_deleted("a", true).unwrap();
        assert!(cache.visitor("a").unwrap().unwrap().is_deleted);
        cache.set_deleted("a", false).unwrap();
        assert!(!cache.visitor("a").unwrap().unwrap().is_deleted);

        // Unknown id is a silent no-op.
        cache.set_deleted("missing", true).unwrap();
    }

    #[test]
    fn identity_last_write_wins() {
        let cache = LocalCache::open_in_memory().unwrap();
        let first = IdentityRecord {
            phone: "6900000000".to_string(),
            surname: "Ioannou".to_string(),
            rank: "Member".to_string(),
        };
        cache.put_identity(&first).unwrap();

        let second = IdentityRecord {
            surname: "Georgiou".to_string(),
            ..first.clone()
        };
        cache.put_identity(&second).unwrap();

        assert_eq!(cache.identity("6900000000").unwrap(), Some(second));
        assert_eq!(cache.identities().unwrap().len(), 1);
    }

    #[test]
    fn flags_default_false_and_persist() {
        let cache = LocalCache::open_in_memory().unwrap();
        assert!(!cache.flag("legacy_migrated").unwrap());
        cache.set_flag("legacy_migrated", true).unwrap();
        assert!(cache.flag("legacy_migrated").unwrap());
    }
}
