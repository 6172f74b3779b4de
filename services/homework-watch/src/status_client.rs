//! Client for the homework status endpoint

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::config::{Config, Credentials};
use crate::io::HttpClient;
use crate::WatchError;

/// Polls the homework status API with a static OAuth token
pub struct StatusClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for StatusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StatusClient {
    pub fn new(config: &Config, credentials: &Credentials, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created StatusClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", credentials.api_token),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request statuses changed since `cursor`.
    ///
    /// A zero or negative cursor is replaced with the current time. Transport
    /// failures and undecodable bodies map to [`WatchError::Connection`],
    /// non-200 responses to [`WatchError::StatusCode`].
    pub async fn poll(&self, cursor: i64) -> crate::Result<Value> {
        let from_date = if cursor > 0 { cursor } else { current_epoch_secs() };
        let from_date_param = from_date.to_string();

        tracing::info!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date_param.as_str())],
            )
            .await
            .map_err(|e| WatchError::Connection {
                endpoint: self.endpoint.clone(),
                from_date,
                reason: e.to_string(),
            })?;

        if response.status != 200 {
            tracing::debug!(
                "Non-200 response from {}: status={} body={}",
                self.endpoint,
                response.status,
                response.body
            );
            return Err(WatchError::StatusCode {
                endpoint: self.endpoint.clone(),
                status: response.status,
                reason: response.reason,
                body: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| WatchError::Connection {
            endpoint: self.endpoint.clone(),
            from_date,
            reason: format!("invalid JSON body: {}", e),
        })
    }
}

/// Seconds since the Unix epoch
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
