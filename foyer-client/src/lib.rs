//! Foyer Client - offline-first sync core for the visitor log
//!
//! Every data operation goes remote-first: the relational store behind
//! the venue's HTTP API is authoritative when reachable, and the
//! embedded on-device cache is written unconditionally so the front desk
//! keeps working without connectivity. Reads reconcile the two; remote
//! failures degrade silently, cache failures are fatal.

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod migration;
pub mod phone;
pub mod remote;
pub mod sequence;
pub mod sync;
pub mod zones;

pub use cache::{CacheError, LocalCache};
pub use config::{ConfigError, RemoteConfig, RemoteCredentials};
pub use error::{RemoteError, RemoteResult, SyncError, SyncResult};
pub use migration::{MigrationReport, MigrationRunner};
pub use phone::{MIN_LOOKUP_LEN, PhoneResolver, normalize_phone};
pub use remote::{HttpRemoteStore, RemoteStore};
pub use sequence::SequenceAllocator;
pub use sync::SyncCoordinator;
pub use zones::{TableZoneConfig, ZoneConfigStore};

// Re-export shared types for convenience
pub use shared::models::{
    IdentityRecord, PHONE_UNAVAILABLE, TableZone, VisitorDraft, VisitorRecord, ZoneBounds,
};
