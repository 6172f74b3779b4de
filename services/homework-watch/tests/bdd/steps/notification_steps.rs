//! BDD step definitions for notification feature

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_watch::io::{HttpClient, HttpResponse};
use homework_watch::telegram::TelegramNotifier;
use homework_watch::{Config, WatchError};

use crate::world::{test_credentials, HomeworkWatchWorld};

/// Mock HTTP client for the Bot API that answers every POST with a fixed response
struct FixedPostClient {
    response: Result<HttpResponse, String>,
}

impl FixedPostClient {
    fn answering(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                reason: String::new(),
                body: body.to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for FixedPostClient {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        _query: &[(&str, &str)],
    ) -> homework_watch::Result<HttpResponse> {
        Err(WatchError::Http("GET not expected".to_string()))
    }

    async fn post_form(
        &self,
        _url: &str,
        _params: &[(&str, &str)],
    ) -> homework_watch::Result<HttpResponse> {
        match &self.response {
            Ok(r) => Ok(r.clone()),
            Err(msg) => Err(WatchError::Http(msg.clone())),
        }
    }
}

fn telegram_with(world: &mut HomeworkWatchWorld, client: FixedPostClient) {
    let notifier = TelegramNotifier::new(&Config::default(), &test_credentials(), Arc::new(client));
    world.notifier = Some(Box::new(notifier));
}

#[given("a Telegram notifier with valid credentials")]
fn telegram_valid(world: &mut HomeworkWatchWorld) {
    telegram_with(world, FixedPostClient::answering(200, r#"{"ok":true,"result":{}}"#));
}

#[given("a Telegram notifier that returns an API error")]
fn telegram_api_error(world: &mut HomeworkWatchWorld) {
    telegram_with(
        world,
        FixedPostClient::answering(400, r#"{"ok":false,"description":"Bad Request"}"#),
    );
}

#[given("a Telegram notifier whose chat is not found")]
fn telegram_chat_not_found(world: &mut HomeworkWatchWorld) {
    telegram_with(
        world,
        FixedPostClient::answering(200, r#"{"ok":false,"description":"chat not found"}"#),
    );
}

#[given("a Telegram notifier that is unreachable")]
fn telegram_unreachable(world: &mut HomeworkWatchWorld) {
    telegram_with(
        world,
        FixedPostClient {
            response: Err("connection refused".to_string()),
        },
    );
}

#[when(expr = "the message {string} is sent")]
async fn message_sent(world: &mut HomeworkWatchWorld, message: String) {
    let notifier = world.notifier.as_ref().expect("notifier not set");
    world.notification_result = Some(notifier.send(&message).await);
}

#[then("the notification should succeed")]
fn notification_succeeds(world: &mut HomeworkWatchWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then("the notification should fail with a delivery error")]
fn notification_fails(world: &mut HomeworkWatchWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    assert!(
        matches!(result, Err(WatchError::Delivery(_))),
        "expected a delivery error, got {:?}",
        result
    );
}
