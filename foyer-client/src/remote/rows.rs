//! Remote wire schema
//!
//! The remote store speaks snake-case rows (`entry_number`, `location`,
//! `arrival_time`, ...). Every conversion between domain records and the
//! wire goes through this module; the read path and the write path share
//! the same two impls per type, so the mapping cannot drift.

use serde::{Deserialize, Serialize};
use shared::models::{IdentityRecord, TableZone, VisitorRecord};

/// Row shape of the remote `visitors` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRow {
    pub id: String,
    pub entry_number: u32,
    pub date: String,
    pub phone: String,
    pub surname: String,
    pub rank: String,
    pub location: TableZone,
    pub table_number: Option<u32>,
    pub person_count: u32,
    pub arrival_time: String,
    #[serde(default)]
    pub is_deleted: bool,
}

impl From<&VisitorRecord> for VisitorRow {
    fn from(record: &VisitorRecord) -> Self {
        Self {
            id: record.id.clone(),
            entry_number: record.sequence_number,
            date: record.day.clone(),
            phone: record.phone.clone(),
            surname: record.surname.clone(),
            rank: record.rank.clone(),
            location: record.zone,
            table_number: record.table_number,
            person_count: record.person_count,
            arrival_time: record.arrival_time.clone(),
            is_deleted: record.is_deleted,
        }
    }
}

impl From<VisitorRow> for VisitorRecord {
    fn from(row: VisitorRow) -> Self {
        Self {
            id: row.id,
            sequence_number: row.entry_number,
            day: row.date,
            phone: row.phone,
            surname: row.surname,
            rank: row.rank,
            zone: row.location,
            table_number: row.table_number,
            person_count: row.person_count,
            arrival_time: row.arrival_time,
            is_deleted: row.is_deleted,
        }
    }
}

/// Row shape of the remote `phone_records` relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRow {
    pub phone: String,
    pub surname: String,
    pub rank: String,
}

impl From<&IdentityRecord> for IdentityRow {
    fn from(record: &IdentityRecord) -> Self {
        Self {
            phone: record.phone.clone(),
            surname: record.surname.clone(),
            rank: record.rank.clone(),
        }
    }
}

impl From<IdentityRow> for IdentityRecord {
    fn from(row: IdentityRow) -> Self {
        Self {
            phone: row.phone,
            surname: row.surname,
            rank: row.rank,
        }
    }
}
