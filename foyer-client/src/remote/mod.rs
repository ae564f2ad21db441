//! Remote store transport
//!
//! The narrow contract the sync layer exercises against the remote
//! relational store: four visitor operations and two identity
//! operations. Every call may carry override credentials for that one
//! request; absent an override, the configured defaults apply. All
//! failures come back as [`RemoteError`] and are soft as far as the
//! coordinator is concerned.

mod rows;

pub use rows::{IdentityRow, VisitorRow};

use async_trait::async_trait;
use reqwest::Client;
use shared::models::{IdentityRecord, VisitorRecord};

use crate::config::{RemoteConfig, RemoteCredentials};
use crate::error::{RemoteError, RemoteResult};

const VISITORS_PATH: &str = "api/visitors";
const PHONE_RECORDS_PATH: &str = "api/phone-records";

/// Remote store contract.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All visitor rows for a day, soft-deleted included.
    async fn fetch_day(
        &self,
        day: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Vec<VisitorRecord>>;

    /// Insert or replace a visitor row, keyed by id.
    async fn upsert_visitor(
        &self,
        record: &VisitorRecord,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()>;

    async fn soft_delete(
        &self,
        id: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()>;

    async fn restore(&self, id: &str, credentials: Option<&RemoteCredentials>)
    -> RemoteResult<()>;

    /// Most recent identity for a normalized phone key, if any.
    async fn fetch_identity(
        &self,
        phone: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Option<IdentityRecord>>;

    async fn upsert_identity(
        &self,
        record: &IdentityRecord,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()>;
}

/// reqwest-backed implementation talking to the venue's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    config: RemoteConfig,
}

impl HttpRemoteStore {
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.credentials.base_url
    }

    fn credentials<'a>(
        &'a self,
        call_override: Option<&'a RemoteCredentials>,
    ) -> &'a RemoteCredentials {
        call_override.unwrap_or(&self.config.credentials)
    }

    fn url(credentials: &RemoteCredentials, path: &str) -> String {
        format!("{}/{}", credentials.base_url.trim_end_matches('/'), path)
    }

    async fn check(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn fetch_day(
        &self,
        day: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Vec<VisitorRecord>> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .get(Self::url(creds, VISITORS_PATH))
            .query(&[("date", day)])
            .bearer_auth(&creds.access_token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let rows: Vec<VisitorRow> = response.json().await?;
        Ok(rows.into_iter().map(VisitorRecord::from).collect())
    }

    async fn upsert_visitor(
        &self,
        record: &VisitorRecord,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .post(Self::url(creds, VISITORS_PATH))
            .bearer_auth(&creds.access_token)
            .json(&VisitorRow::from(record))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn soft_delete(
        &self,
        id: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .delete(Self::url(creds, VISITORS_PATH))
            .bearer_auth(&creds.access_token)
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn restore(
        &self,
        id: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .patch(Self::url(creds, VISITORS_PATH))
            .bearer_auth(&creds.access_token)
            .json(&serde_json::json!({ "id": id, "is_deleted": false }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_identity(
        &self,
        phone: &str,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<Option<IdentityRecord>> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .get(Self::url(creds, PHONE_RECORDS_PATH))
            .query(&[("phone", phone)])
            .bearer_auth(&creds.access_token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        // The endpoint answers JSON null when the phone is unknown.
        let row: Option<IdentityRow> = response.json().await?;
        Ok(row.map(IdentityRecord::from))
    }

    async fn upsert_identity(
        &self,
        record: &IdentityRecord,
        credentials: Option<&RemoteCredentials>,
    ) -> RemoteResult<()> {
        let creds = self.credentials(credentials);
        let response = self
            .client
            .post(Self::url(creds, PHONE_RECORDS_PATH))
            .bearer_auth(&creds.access_token)
            .json(&IdentityRow::from(record))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let creds = RemoteCredentials {
            base_url: "https://venue.example/".to_string(),
            access_token: "t".to_string(),
        };
        assert_eq!(
            HttpRemoteStore::url(&creds, VISITORS_PATH),
            "https://venue.example/api/visitors"
        );
    }

    #[test]
    fn call_override_replaces_default_credentials() {
        let store = HttpRemoteStore::new(RemoteConfig::new(RemoteCredentials {
            base_url: "https://default.example".to_string(),
            access_token: "default".to_string(),
        }))
        .unwrap();

        let over = RemoteCredentials {
            base_url: "https://other.example".to_string(),
            access_token: "other".to_string(),
        };
        assert_eq!(store.credentials(Some(&over)).base_url, "https://other.example");
        assert_eq!(store.credentials(None).base_url, "https://default.example");
    }
}
