//! Identity (phone) record model

use serde::{Deserialize, Serialize};

/// Last-seen identity for a phone number, used to pre-fill the entry
/// form for repeat guests. Keyed by normalized phone; last write wins,
/// no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub phone: String,
    pub surname: String,
    pub rank: String,
}
