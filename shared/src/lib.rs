//! Shared types for the Foyer visitor log
//!
//! Domain models and small utilities used by the sync core and by
//! anything that consumes its records (export, UI shells).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
