//! Data models
//!
//! Shared between the sync core and its consumers. All records travel as
//! plain serde structs; the remote wire schema lives with the transport.

pub mod identity;
pub mod visitor;
pub mod zone;

// Re-exports
pub use identity::*;
pub use visitor::*;
pub use zone::*;
