//! Remote-store configuration and credential resolution
//!
//! Credentials come from exactly one of three sources, walked in a fixed
//! order: a per-call override, the device credentials file, then the
//! process environment. The precedence lives in [`CREDENTIAL_SOURCES`].
//! There is no process-global client: the resolved [`RemoteConfig`] is
//! passed into the coordinator at construction, and rotating credentials
//! means constructing a new one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variables consulted as the last credential source.
pub const ENV_REMOTE_URL: &str = "FOYER_REMOTE_URL";
pub const ENV_REMOTE_TOKEN: &str = "FOYER_REMOTE_TOKEN";

const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No source yielded a complete credential pair. Fatal: without
    /// remote credentials the caller must enter the setup flow.
    #[error("no remote credentials configured (checked {checked:?})")]
    Missing { checked: &'static [&'static str] },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Base endpoint plus access token for the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCredentials {
    pub base_url: String,
    pub access_token: String,
}

/// Where credentials may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Supplied by the caller on an individual request.
    CallOverride,
    /// `credentials.json` under the device data directory.
    DeviceFile,
    /// [`ENV_REMOTE_URL`] / [`ENV_REMOTE_TOKEN`].
    Environment,
}

impl CredentialSource {
    fn name(&self) -> &'static str {
        match self {
            CredentialSource::CallOverride => "call override",
            CredentialSource::DeviceFile => "device file",
            CredentialSource::Environment => "environment",
        }
    }
}

/// Resolution order. The first source yielding a complete pair wins;
/// later sources are not consulted.
pub const CREDENTIAL_SOURCES: [CredentialSource; 3] = [
    CredentialSource::CallOverride,
    CredentialSource::DeviceFile,
    CredentialSource::Environment,
];

/// Process-wide remote configuration, passed into [`crate::SyncCoordinator`]
/// at construction.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub credentials: RemoteCredentials,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl RemoteConfig {
    pub fn new(credentials: RemoteCredentials) -> Self {
        Self {
            credentials,
            timeout: 30,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Resolve default credentials for this device. Per-call overrides
    /// are honored later, request by request, inside the transport.
    pub fn resolve(data_dir: &Path) -> Result<Self, ConfigError> {
        resolve_credentials(None, data_dir).map(Self::new)
    }
}

/// Walk [`CREDENTIAL_SOURCES`] and return the first complete pair.
pub fn resolve_credentials(
    call_override: Option<&RemoteCredentials>,
    data_dir: &Path,
) -> Result<RemoteCredentials, ConfigError> {
    for source in CREDENTIAL_SOURCES {
        let found = match source {
            CredentialSource::CallOverride => call_override.cloned(),
            CredentialSource::DeviceFile => load_device_credentials(data_dir)?,
            CredentialSource::Environment => match (
                std::env::var(ENV_REMOTE_URL),
                std::env::var(ENV_REMOTE_TOKEN),
            ) {
                (Ok(base_url), Ok(access_token)) => Some(RemoteCredentials {
                    base_url,
                    access_token,
                }),
                _ => None,
            },
        };
        if let Some(credentials) = found {
            tracing::debug!(source = source.name(), "remote credentials resolved");
            return Ok(credentials);
        }
    }

    const CHECKED: [&str; 3] = ["call override", "device file", "environment"];
    Err(ConfigError::Missing { checked: &CHECKED })
}

fn credentials_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CREDENTIALS_FILE)
}

fn load_device_credentials(data_dir: &Path) -> Result<Option<RemoteCredentials>, ConfigError> {
    let path = credentials_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Persist credentials to the device file. The setup flow calls this
/// after the operator enters an endpoint and token.
pub fn save_device_credentials(
    data_dir: &Path,
    credentials: &RemoteCredentials,
) -> Result<(), ConfigError> {
    std::fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(credentials)?;
    std::fs::write(credentials_path(data_dir), content)?;
    Ok(())
}
