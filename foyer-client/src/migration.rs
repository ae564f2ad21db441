//! One-time migration of legacy flat storage
//!
//! Earlier builds kept the log as two flat JSON blobs on disk: a
//! `day -> entries` map and an identity list. The runner replays both
//! through the normal save paths so migrated data gets the same
//! dual-write treatment as new data, then marks the device migrated.
//! Absent files mean empty collections; a corrupt entry is counted and
//! skipped, never fatal to the rest of the batch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use shared::models::{IdentityRecord, VisitorRecord};

use crate::error::SyncResult;
use crate::phone::PhoneResolver;
use crate::sync::SyncCoordinator;

/// Flag in the cache's flag table gating the run.
pub const MIGRATED_FLAG: &str = "legacy_migrated";

const LEGACY_VISITORS_FILE: &str = "visitors.json";
const LEGACY_IDENTITIES_FILE: &str = "phone_records.json";

/// Outcome of a migration run, for logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub visitors_migrated: usize,
    pub identities_migrated: usize,
    pub failed: usize,
    /// True when the flag was already set and nothing ran.
    pub skipped: bool,
}

pub struct MigrationRunner<'a> {
    coordinator: &'a SyncCoordinator,
    legacy_dir: PathBuf,
}

impl<'a> MigrationRunner<'a> {
    pub fn new(coordinator: &'a SyncCoordinator, legacy_dir: impl Into<PathBuf>) -> Self {
        Self {
            coordinator,
            legacy_dir: legacy_dir.into(),
        }
    }

    /// Run the migration at most once per device.
    pub async fn run(&self) -> SyncResult<MigrationReport> {
        if self.coordinator.flag(MIGRATED_FLAG)? {
            tracing::debug!("legacy migration already completed, skipping");
            return Ok(MigrationReport {
                skipped: true,
                ..MigrationReport::default()
            });
        }

        let mut report = MigrationReport::default();
        let resolver = PhoneResolver::new(self.coordinator);

        for (day, entries) in self.load_legacy_visitors() {
            for entry in entries {
                match serde_json::from_value::<VisitorRecord>(entry) {
                    Ok(record) => match self.coordinator.create(record).await {
                        Ok(_) => report.visitors_migrated += 1,
                        Err(err) => {
                            tracing::warn!(%day, error = %err, "failed to replay legacy visitor");
                            report.failed += 1;
                        }
                    },
                    Err(err) => {
                        tracing::warn!(%day, error = %err, "malformed legacy visitor entry");
                        report.failed += 1;
                    }
                }
            }
        }

        for entry in self.load_legacy_identities() {
            match serde_json::from_value::<IdentityRecord>(entry) {
                Ok(record) => match resolver.save(record).await {
                    Ok(()) => report.identities_migrated += 1,
                    Err(err) => {
                        tracing::warn!(error = %err, "failed to replay legacy identity");
                        report.failed += 1;
                    }
                },
                Err(err) => {
                    tracing::warn!(error = %err, "malformed legacy identity entry");
                    report.failed += 1;
                }
            }
        }

        self.coordinator.set_flag(MIGRATED_FLAG, true)?;
        tracing::info!(
            visitors = report.visitors_migrated,
            identities = report.identities_migrated,
            failed = report.failed,
            "legacy migration completed"
        );
        Ok(report)
    }

    /// Legacy day map. Entries stay as raw JSON values so one bad record
    /// cannot poison its whole day.
    fn load_legacy_visitors(&self) -> BTreeMap<String, Vec<serde_json::Value>> {
        Self::load_json(&self.legacy_dir.join(LEGACY_VISITORS_FILE)).unwrap_or_default()
    }

    fn load_legacy_identities(&self) -> Vec<serde_json::Value> {
        Self::load_json(&self.legacy_dir.join(LEGACY_IDENTITIES_FILE)).unwrap_or_default()
    }

    fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable legacy store");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unparsable legacy store");
                None
            }
        }
    }
}
