//! Test fixtures: an in-memory remote store with a failure toggle, plus
//! record builders.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use foyer_client::config::RemoteCredentials;
use foyer_client::error::{RemoteError, RemoteResult};
use foyer_client::remote::RemoteStore;
use foyer_client::{IdentityRecord, TableZone, VisitorDraft, VisitorRecord};

/// In-memory stand-in for the remote relational store. Flipping
/// `set_offline(true)` makes every call fail the way an unreachable
/// backend would.
#[derive(Default)]
pub struct MockRemoteStore {
    visitors: Mutex<HashMap<String, VisitorRecord>>,
    identities: Mutex<HashMap<String, IdentityRecord>>,
    offline: AtomicBool,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seed a row directly, bypassing the coordinator (as if another
    /// front desk had written it).
    pub fn seed_visitor(&self, record: VisitorRecord) {
        self.visitors
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn seed_identity(&self, record: IdentityRecord) {
        self.identities
            .lock()
            .unwrap()
            .insert(record.phone.clone(), record);
    }

    pub fn visitor(&self, id: &str) -> Option<VisitorRecord> {
        self.visitors.lock().unwrap().get(id).cloned()
    }

    fn online(&self) -> RemoteResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Status {
                status: 503,
                message: "simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn fetch_day(
        &self,
        day: &str,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Vec<VisitorRecord>> {
        self.online()?;
        Ok(self
            .visitors
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.day == day)
            .cloned()
            .collect())
    }

    async fn upsert_visitor(
        &self,
        record: &VisitorRecord,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        self.online()?;
        self.seed_visitor(record.clone());
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: &str,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        self.online()?;
        if let Some(record) = self.visitors.lock().unwrap().get_mut(id) {
            record.is_deleted = true;
        }
        Ok(())
    }

    async fn restore(
        &self,
        id: &str,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        self.online()?;
        if let Some(record) = self.visitors.lock().unwrap().get_mut(id) {
            record.is_deleted = false;
        }
        Ok(())
    }

    async fn fetch_identity(
        &self,
        phone: &str,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Option<IdentityRecord>> {
        self.online()?;
        Ok(self.identities.lock().unwrap().get(phone).cloned())
    }

    async fn upsert_identity(
        &self,
        record: &IdentityRecord,
        _credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        self.online()?;
        self.seed_identity(record.clone());
        Ok(())
    }
}

pub fn draft(surname: &str, phone: &str) -> VisitorDraft {
    VisitorDraft {
        phone: phone.to_string(),
        surname: surname.to_string(),
        rank: "Member".to_string(),
        zone: TableZone::DiningRoom,
        table_number: Some(3),
        person_count: 2,
    }
}

pub fn identity(phone: &str, surname: &str, rank: &str) -> IdentityRecord {
    IdentityRecord {
        phone: phone.to_string(),
        surname: surname.to_string(),
        rank: rank.to_string(),
    }
}
