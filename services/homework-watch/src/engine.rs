//! Engine: the poll, validate, format, diff, notify, sleep cycle

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::{CommitPolicy, Config, FaultNotificationPolicy};
use crate::error::FaultKind;
use crate::formatter;
use crate::notifier::Notifier;
use crate::status_client::{current_epoch_secs, StatusClient};
use crate::tracker::{ChangeTracker, Report};
use crate::validator;
use crate::WatchError;

/// Consecutive faulted cycles after which a warning is logged
const FAULT_WARNING_THRESHOLD: u32 = 5;

/// Characters of a failed response body kept in the error log line
const BODY_EXCERPT_CHARS: usize = 200;

/// What a single cycle ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The report changed and a notification was attempted
    Notified { delivered: bool },
    /// The report matched the previous one
    Unchanged,
    /// The cycle was aborted by a fault
    Fault(FaultKind),
}

/// Owns the cursor and the last-seen report; runs one cycle at a time
#[derive(Debug)]
pub struct Engine {
    client: StatusClient,
    notifier: Arc<dyn Notifier>,
    tracker: ChangeTracker,
    cursor: i64,
    interval: Duration,
    fault_policy: FaultNotificationPolicy,
    commit_policy: CommitPolicy,
    last_fault_message: Option<String>,
    consecutive_faults: u32,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        client: StatusClient,
        notifier: Arc<dyn Notifier>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            tracker: ChangeTracker::new(),
            cursor: current_epoch_secs(),
            interval: config.polling_interval(),
            fault_policy: config.fault_notifications,
            commit_policy: config.commit_policy,
            last_fault_message: None,
            consecutive_faults: 0,
            cancel,
        }
    }

    /// Start polling from `cursor` instead of the current time
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn previous_report(&self) -> &Report {
        self.tracker.previous()
    }

    pub fn consecutive_faults(&self) -> u32 {
        self.consecutive_faults
    }

    /// Run cycles until the cancellation token is triggered.
    ///
    /// Every cycle is followed by the polling interval sleep, whatever its
    /// outcome. Cancellation is only observed while sleeping.
    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!(
                "Cycle finished: {:?}, next poll in {:?}",
                outcome,
                self.interval
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one cycle. Faults are handled here and never escape.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.process().await {
            Ok(outcome) => {
                if self.consecutive_faults > 0 {
                    tracing::info!(
                        "Recovered after {} failed cycle(s)",
                        self.consecutive_faults
                    );
                }
                self.consecutive_faults = 0;
                self.last_fault_message = None;
                outcome
            }
            Err(e) => self.handle_fault(e).await,
        }
    }

    async fn process(&mut self) -> crate::Result<CycleOutcome> {
        let payload = self.client.poll(self.cursor).await?;

        // The cursor moves with the server even when the rest of the payload is unusable.
        if let Some(next) = validator::next_cursor(&payload) {
            if next != self.cursor {
                tracing::debug!("Advancing cursor {} -> {}", self.cursor, next);
            }
            self.cursor = next;
        }

        let validated = validator::validate(&payload)?;

        let report = match validated.items.first() {
            None => {
                tracing::info!("Homework list is empty");
                Report::no_new_statuses()
            }
            Some(item) => {
                let message = formatter::format(item)?;
                Report::new(item.name.clone().unwrap_or_default(), message)
            }
        };

        if !self.tracker.diff(&report) {
            tracing::debug!("No change for '{}'", report.item_name);
            return Ok(CycleOutcome::Unchanged);
        }

        let delivered = self.deliver(&report.rendered_message).await;
        if delivered || self.commit_policy == CommitPolicy::Attempted {
            self.tracker.commit(report);
        }

        Ok(CycleOutcome::Notified { delivered })
    }

    /// Send a message, logging and swallowing delivery failures
    async fn deliver(&self, message: &str) -> bool {
        match self.notifier.send(message).await {
            Ok(()) => {
                tracing::info!("Message sent via '{}'", self.notifier.type_name());
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Notification via '{}' failed: {}",
                    self.notifier.type_name(),
                    e
                );
                false
            }
        }
    }

    async fn handle_fault(&mut self, error: WatchError) -> CycleOutcome {
        let kind = match error.fault_kind() {
            Some(kind) => kind,
            // `process` only yields per-cycle errors; anything else is an
            // environment problem while talking to the endpoint.
            None => FaultKind::Transport,
        };
        match &error {
            WatchError::StatusCode { body, .. } => {
                tracing::error!(
                    "Cycle failed ({} fault): {}; body: {}",
                    kind,
                    error,
                    body_excerpt(body)
                );
                tracing::debug!("Full response body: {}", body);
            }
            _ => tracing::error!("Cycle failed ({} fault): {}", kind, error),
        }

        self.consecutive_faults += 1;
        if self.consecutive_faults == FAULT_WARNING_THRESHOLD {
            tracing::warn!("{} consecutive cycles have failed", self.consecutive_faults);
        }

        if self.reports_fault(kind) {
            let message = format!("Program failure: {}", error);
            if self.last_fault_message.as_deref() == Some(message.as_str()) {
                tracing::debug!("Fault already reported, not sending it again");
            } else {
                self.deliver(&message).await;
                self.last_fault_message = Some(message);
            }
        }

        CycleOutcome::Fault(kind)
    }

    fn reports_fault(&self, kind: FaultKind) -> bool {
        match self.fault_policy {
            FaultNotificationPolicy::Never => false,
            FaultNotificationPolicy::Processing => kind == FaultKind::Shape,
            FaultNotificationPolicy::All => true,
        }
    }
}

/// Leading part of a response body, cut on a char boundary
fn body_excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
