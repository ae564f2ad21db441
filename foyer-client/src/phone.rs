//! Phone-based identity resolution
//!
//! Repeat guests are recognized by phone number: the form asks for the
//! number first and pre-fills surname and rank from the last visit.

use shared::models::{IdentityRecord, VisitorRecord};

use crate::error::SyncResult;
use crate::sync::SyncCoordinator;

/// Callers normally skip lookups shorter than this (a Greek mobile
/// number is 10 digits). The resolver itself accepts any key; the
/// threshold only saves round trips while the user is still typing.
pub const MIN_LOOKUP_LEN: usize = 10;

/// Strip everything but ASCII digits.
pub fn normalize_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub struct PhoneResolver<'a> {
    coordinator: &'a SyncCoordinator,
}

impl<'a> PhoneResolver<'a> {
    pub fn new(coordinator: &'a SyncCoordinator) -> Self {
        Self { coordinator }
    }

    /// Most recent identity for a phone number, normalized first.
    ///
    /// Pure lookup: a remote hit is returned without touching the cache.
    /// Only when the remote store is unreachable does the cached copy
    /// answer, by exact key match.
    pub async fn find(&self, phone: &str) -> SyncResult<Option<IdentityRecord>> {
        let key = normalize_phone(phone);
        self.coordinator.find_identity(&key).await
    }

    /// Upsert an identity through both stores. Last write wins.
    pub async fn save(&self, record: IdentityRecord) -> SyncResult<()> {
        self.coordinator.save_identity(&record).await
    }

    /// Record the identity seen on a freshly saved visitor. Sentinel and
    /// blank phones never produce identity records.
    pub async fn record_visitor(&self, visitor: &VisitorRecord) -> SyncResult<()> {
        if !visitor.has_real_phone() {
            return Ok(());
        }
        self.save(IdentityRecord {
            phone: visitor.phone.clone(),
            surname: visitor.surname.clone(),
            rank: visitor.rank.clone(),
        })
        .await
    }
}
