//! Table zone model

use serde::{Deserialize, Serialize};

/// Venue zone a party can be seated in.
///
/// Serialized by its stable code (`bar`, `dining_room`, `terrace`,
/// `takeaway`), which is also the value of the remote schema's
/// `location` column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TableZone {
    Bar,
    DiningRoom,
    Terrace,
    Takeaway,
}

impl TableZone {
    pub const ALL: [TableZone; 4] = [
        TableZone::Bar,
        TableZone::DiningRoom,
        TableZone::Terrace,
        TableZone::Takeaway,
    ];

    /// Stable string code, identical to the serde representation.
    pub fn code(&self) -> &'static str {
        match self {
            TableZone::Bar => "bar",
            TableZone::DiningRoom => "dining_room",
            TableZone::Terrace => "terrace",
            TableZone::Takeaway => "takeaway",
        }
    }

    pub fn from_code(code: &str) -> Option<TableZone> {
        TableZone::ALL.into_iter().find(|z| z.code() == code)
    }

    /// Short code used on printed logs ("B-12").
    pub fn abbrev(&self) -> &'static str {
        match self {
            TableZone::Bar => "B",
            TableZone::DiningRoom => "D",
            TableZone::Terrace => "T",
            TableZone::Takeaway => "TA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TableZone::Bar => "Bar",
            TableZone::DiningRoom => "Dining room",
            TableZone::Terrace => "Terrace",
            TableZone::Takeaway => "Takeaway",
        }
    }

    /// Whether a seat in this zone carries a table number. Takeaway
    /// parties are not seated.
    pub fn requires_table_number(&self) -> bool {
        !matches!(self, TableZone::Takeaway)
    }

    /// Factory-default table range for zones that seat guests; devices
    /// can override these per zone.
    pub fn default_bounds(&self) -> Option<ZoneBounds> {
        match self {
            TableZone::Bar => Some(ZoneBounds { min: 1, max: 12 }),
            TableZone::DiningRoom => Some(ZoneBounds { min: 1, max: 40 }),
            TableZone::Terrace => Some(ZoneBounds { min: 1, max: 24 }),
            TableZone::Takeaway => None,
        }
    }
}

/// Inclusive table-number range for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub min: u32,
    pub max: u32,
}

impl ZoneBounds {
    pub fn contains(&self, number: u32) -> bool {
        number >= self.min && number <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for zone in TableZone::ALL {
            assert_eq!(TableZone::from_code(zone.code()), Some(zone));
        }
        assert_eq!(TableZone::from_code("kitchen"), None);
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&TableZone::DiningRoom).unwrap();
        assert_eq!(json, "\"dining_room\"");
        let zone: TableZone = serde_json::from_str("\"terrace\"").unwrap();
        assert_eq!(zone, TableZone::Terrace);
    }

    #[test]
    fn takeaway_has_no_tables() {
        assert!(!TableZone::Takeaway.requires_table_number());
        assert!(TableZone::Takeaway.default_bounds().is_none());
        for zone in [TableZone::Bar, TableZone::DiningRoom, TableZone::Terrace] {
            assert!(zone.requires_table_number());
            assert!(zone.default_bounds().is_some());
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let bounds = ZoneBounds { min: 3, max: 5 };
        assert!(!bounds.contains(2));
        assert!(bounds.contains(3));
        assert!(bounds.contains(5));
        assert!(!bounds.contains(6));
    }
}
