//! Visitor record model

use serde::{Deserialize, Serialize};

use crate::models::zone::TableZone;
use crate::util;

/// Sentinel phone value meaning the guest declined to give a number.
/// Distinct from an empty string (nothing entered yet).
pub const PHONE_UNAVAILABLE: &str = "unavailable";

/// One visitor-log entry: a party arriving at the venue on a given day.
///
/// `id`, `sequence_number`, `day` and `arrival_time` are fixed at
/// creation; edits only touch the descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    /// UUID assigned by the writer, not by either store.
    pub id: String,
    /// Ordinal within the day, starting at 1. Soft-deleted records keep
    /// their number reserved.
    pub sequence_number: u32,
    /// Venue-local `YYYY-MM-DD` partition key.
    pub day: String,
    /// Normalized digit string, or [`PHONE_UNAVAILABLE`].
    pub phone: String,
    pub surname: String,
    pub rank: String,
    pub zone: TableZone,
    /// Present iff the zone seats guests; bounded per device config.
    pub table_number: Option<u32>,
    pub person_count: u32,
    /// Wall clock at creation, `HH:MM`.
    pub arrival_time: String,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Fields captured by the entry form. The writer assigns id, day,
/// sequence number and arrival time when turning a draft into a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitorDraft {
    pub phone: String,
    pub surname: String,
    pub rank: String,
    pub zone: TableZone,
    pub table_number: Option<u32>,
    pub person_count: u32,
}

impl VisitorRecord {
    pub fn from_draft(draft: VisitorDraft, day: &str, sequence_number: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sequence_number,
            day: day.to_string(),
            phone: draft.phone,
            surname: draft.surname,
            rank: draft.rank,
            zone: draft.zone,
            table_number: draft.table_number,
            person_count: draft.person_count,
            arrival_time: util::arrival_time_now(),
            is_deleted: false,
        }
    }

    /// True when the phone is a real number rather than the sentinel or
    /// blank. Only real phones produce identity records.
    pub fn has_real_phone(&self) -> bool {
        !self.phone.is_empty() && self.phone != PHONE_UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(phone: &str) -> VisitorDraft {
        VisitorDraft {
            phone: phone.to_string(),
            surname: "Papadopoulos".to_string(),
            rank: "Member".to_string(),
            zone: TableZone::DiningRoom,
            table_number: Some(4),
            person_count: 2,
        }
    }

    #[test]
    fn from_draft_assigns_identity_fields() {
        let record = VisitorRecord::from_draft(draft("6900000000"), "2025-03-07", 3);
        assert!(!record.id.is_empty());
        assert_eq!(record.sequence_number, 3);
        assert_eq!(record.day, "2025-03-07");
        assert!(!record.is_deleted);

        let other = VisitorRecord::from_draft(draft("6900000000"), "2025-03-07", 4);
        assert_ne!(record.id, other.id);
    }

    #[test]
    fn sentinel_and_blank_phones_are_not_real() {
        assert!(VisitorRecord::from_draft(draft("6900000000"), "d", 1).has_real_phone());
        assert!(!VisitorRecord::from_draft(draft(PHONE_UNAVAILABLE), "d", 1).has_real_phone());
        assert!(!VisitorRecord::from_draft(draft(""), "d", 1).has_real_phone());
    }
}
