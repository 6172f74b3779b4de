//! BDD step definitions for status formatting feature

use cucumber::{given, then, when};

use homework_watch::formatter;
use homework_watch::validator::StatusItem;
use homework_watch::WatchError;

use crate::world::HomeworkWatchWorld;

#[given(expr = "a homework named {string} with status {string}")]
fn homework_with_status(world: &mut HomeworkWatchWorld, name: String, status: String) {
    world.item = Some(StatusItem::new(name, status));
}

#[given(expr = "a homework without a name with status {string}")]
fn homework_without_name(world: &mut HomeworkWatchWorld, status: String) {
    world.item = Some(StatusItem {
        name: None,
        status_code: Some(status),
    });
}

#[when("the homework is formatted")]
fn homework_formatted(world: &mut HomeworkWatchWorld) {
    let item = world.item.as_ref().expect("homework not set");
    world.format_result = Some(formatter::format(item));
}

#[then(expr = "the message should be {string}")]
fn message_is(world: &mut HomeworkWatchWorld, expected: String) {
    let result = world.format_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "the message should contain {string}")]
fn message_contains(world: &mut HomeworkWatchWorld, expected: String) {
    let result = world.format_result.as_ref().expect("no result");
    let message = result.as_ref().unwrap();
    assert!(message.contains(&expected), "{:?}", message);
}

#[then(expr = "formatting should fail with an unknown status error for {string}")]
fn formatting_fails_unknown(world: &mut HomeworkWatchWorld, status: String) {
    let result = world.format_result.as_ref().expect("no result");
    match result {
        Err(WatchError::UnknownStatus(got)) => assert_eq!(got, &status),
        other => panic!("expected UnknownStatus, got {:?}", other),
    }
}

#[then(expr = "formatting should fail with a missing {string} field")]
fn formatting_fails_missing(world: &mut HomeworkWatchWorld, field: String) {
    let result = world.format_result.as_ref().expect("no result");
    match result {
        Err(WatchError::MissingField(got)) => assert_eq!(*got, field.as_str()),
        other => panic!("expected MissingField, got {:?}", other),
    }
}
