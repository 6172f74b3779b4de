//! BDD test world for the homework watcher

use std::collections::HashMap;
use std::sync::Arc;

use cucumber::World;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use homework_watch::engine::{CycleOutcome, Engine};
use homework_watch::notifier::Notifier;
use homework_watch::tracker::ChangeTracker;
use homework_watch::validator::{StatusItem, ValidatedResponse};
use homework_watch::{Config, Credentials};

use crate::steps::monitor_steps::{RecordingNotifier, ScriptedHttpClient};

#[derive(Debug, Default, World)]
pub struct HomeworkWatchWorld {
    // Validation testing
    pub payload: Option<Value>,
    pub validation_result: Option<homework_watch::Result<ValidatedResponse>>,

    // Formatting testing
    pub item: Option<StatusItem>,
    pub format_result: Option<homework_watch::Result<String>>,

    // Change tracking testing
    pub tracker: ChangeTracker,
    pub diff_results: Vec<bool>,

    // Notifier testing
    pub notifier: Option<Box<dyn Notifier>>,
    pub notification_result: Option<homework_watch::Result<()>>,

    // Engine testing
    pub config: Config,
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub recorder: Option<Arc<RecordingNotifier>>,
    pub notifier_fails: bool,
    pub initial_cursor: Option<i64>,
    pub engine: Option<Engine>,
    pub outcomes: Vec<CycleOutcome>,

    // Lifecycle testing
    pub cancel: Option<CancellationToken>,
    pub build_result: Option<Result<(), String>>,
    pub start_succeeded: Option<bool>,
    pub environment: HashMap<String, String>,
    pub credentials_result: Option<homework_watch::Result<Credentials>>,
}

impl HomeworkWatchWorld {
    pub fn http(&mut self) -> Arc<ScriptedHttpClient> {
        self.http
            .get_or_insert_with(|| Arc::new(ScriptedHttpClient::default()))
            .clone()
    }

    pub fn recorder(&mut self) -> Arc<RecordingNotifier> {
        let fails = self.notifier_fails;
        self.recorder
            .get_or_insert_with(|| Arc::new(RecordingNotifier::new(!fails)))
            .clone()
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        api_token: "practicum-token".to_string(),
        notify_token: "123:abc".to_string(),
        destination_id: "42".to_string(),
    }
}
