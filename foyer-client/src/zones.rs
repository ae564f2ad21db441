//! Device-scoped table-number configuration
//!
//! Staff can widen or narrow the table range per zone from the entry
//! form. The setting is per device and never synced; it lives as a small
//! pretty-printed JSON file under the data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::models::{TableZone, ZoneBounds};
use thiserror::Error;

const ZONE_CONFIG_FILE: &str = "zone_config.json";

#[derive(Debug, Error)]
pub enum ZoneConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bounds for {zone:?}: min {min}, max {max}")]
    InvalidBounds { zone: TableZone, min: u32, max: u32 },

    #[error("{zone:?} takes no table numbers")]
    ZoneNotNumbered { zone: TableZone },
}

/// Per-zone table-number bounds. Zones without an override use their
/// factory defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableZoneConfig {
    overrides: BTreeMap<TableZone, ZoneBounds>,
}

impl TableZoneConfig {
    /// Effective bounds for a zone; `None` for zones without tables.
    pub fn bounds(&self, zone: TableZone) -> Option<ZoneBounds> {
        if !zone.requires_table_number() {
            return None;
        }
        self.overrides
            .get(&zone)
            .copied()
            .or_else(|| zone.default_bounds())
    }

    /// Override the bounds for a zone. Requires `min >= 1` and
    /// `max >= min`.
    pub fn set_bounds(&mut self, zone: TableZone, bounds: ZoneBounds) -> Result<(), ZoneConfigError> {
        if !zone.requires_table_number() {
            return Err(ZoneConfigError::ZoneNotNumbered { zone });
        }
        if bounds.min < 1 || bounds.max < bounds.min {
            return Err(ZoneConfigError::InvalidBounds {
                zone,
                min: bounds.min,
                max: bounds.max,
            });
        }
        self.overrides.insert(zone, bounds);
        Ok(())
    }

    /// Whether a table assignment is acceptable for a zone: numbered
    /// zones need an in-range number, un-numbered zones need none.
    pub fn valid_table(&self, zone: TableZone, table_number: Option<u32>) -> bool {
        match (self.bounds(zone), table_number) {
            (Some(bounds), Some(number)) => bounds.contains(number),
            (None, None) => true,
            _ => false,
        }
    }
}

/// File-backed store for [`TableZoneConfig`].
pub struct ZoneConfigStore {
    file_path: PathBuf,
}

impl ZoneConfigStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file_path: data_dir.join(ZONE_CONFIG_FILE),
        }
    }

    /// Load the device's config, or defaults when none was saved yet.
    pub fn load(&self) -> Result<TableZoneConfig, ZoneConfigError> {
        if !self.file_path.exists() {
            return Ok(TableZoneConfig::default());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config: &TableZoneConfig) -> Result<(), ZoneConfigError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}
