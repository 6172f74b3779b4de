//! Homework Watch - homework review status watcher
//!
//! Polls the homework status API, detects changes in the most recent
//! homework's review status, and reports each change once via Telegram.

pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod status_client;
pub mod telegram;
pub mod tracker;
pub mod validator;

pub use config::{load_config, Config, Credentials};
pub use error::{FaultKind, Result, WatchError};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::Notifier;
use crate::status_client::StatusClient;
use crate::telegram::TelegramNotifier;

/// Builder for the watcher.
///
/// Defaults to a reqwest HTTP client, a Telegram notifier and a fresh
/// cancellation token; each can be replaced.
pub struct WatcherBuilder {
    config: Config,
    credentials: Credentials,
    http: Option<Arc<dyn HttpClient>>,
    notifier: Option<Arc<dyn Notifier>>,
    cancel: Option<CancellationToken>,
    initial_cursor: Option<i64>,
}

impl WatcherBuilder {
    pub fn new(config: Config, credentials: Credentials) -> Self {
        Self {
            config,
            credentials,
            http: None,
            notifier: None,
            cancel: None,
            initial_cursor: None,
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_initial_cursor(mut self, cursor: i64) -> Self {
        self.initial_cursor = Some(cursor);
        self
    }

    pub fn build(self) -> Result<Watcher> {
        self.config.validate()?;

        let http: Arc<dyn HttpClient> = match (self.http, self.config.request_timeout()) {
            (Some(http), _) => http,
            (None, Some(timeout)) => Arc::new(ReqwestHttpClient::with_timeout(timeout)?),
            (None, None) => Arc::new(ReqwestHttpClient::default()),
        };

        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(TelegramNotifier::new(
                &self.config,
                &self.credentials,
                Arc::clone(&http),
            )),
        };

        let client = StatusClient::new(&self.config, &self.credentials, http);
        let cancel = self.cancel.unwrap_or_default();

        let mut engine = Engine::new(client, notifier, &self.config, cancel.clone());
        if let Some(cursor) = self.initial_cursor {
            engine = engine.with_cursor(cursor);
        }

        tracing::debug!(
            "Built watcher: endpoint={}, interval={:?}, fault_notifications={:?}, commit_policy={:?}",
            self.config.endpoint,
            self.config.polling_interval(),
            self.config.fault_notifications,
            self.config.commit_policy
        );

        Ok(Watcher { engine, cancel })
    }
}

/// A configured watcher, ready to run
#[derive(Debug)]
pub struct Watcher {
    engine: Engine,
    cancel: CancellationToken,
}

impl Watcher {
    /// Token that stops the watcher after the current cycle
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run until the cancellation token is triggered
    pub async fn start(mut self) -> Result<()> {
        tracing::info!(
            "Homework watcher started, cursor={}",
            self.engine.cursor()
        );

        self.engine.run().await;

        tracing::info!("Homework watcher stopped");
        Ok(())
    }
}
