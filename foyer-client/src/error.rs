//! Sync-core error types

use thiserror::Error;

use crate::cache::CacheError;
use crate::config::ConfigError;

/// Failure talking to the remote store.
///
/// Always recoverable from the coordinator's point of view: every read
/// falls back to the cache and every write still lands locally. The
/// coordinator logs these and moves on.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (network, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the wire schema
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Fatal failure of a sync operation.
///
/// Remote trouble never shows up here; it degrades to the cache. The
/// cache itself has no further fallback, so its errors propagate, as
/// does missing configuration at initialization.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type RemoteResult<T> = Result<T, RemoteError>;
pub type SyncResult<T> = Result<T, SyncError>;
