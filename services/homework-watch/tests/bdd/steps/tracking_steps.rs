//! BDD step definitions for change tracking feature

use cucumber::{given, then, when};

use homework_watch::tracker::{ChangeTracker, Report};

use crate::world::HomeworkWatchWorld;

#[given("a fresh change tracker")]
fn fresh_tracker(world: &mut HomeworkWatchWorld) {
    world.tracker = ChangeTracker::new();
    world.diff_results.clear();
}

#[given(expr = "the report {string} with message {string} has been committed")]
fn report_committed(world: &mut HomeworkWatchWorld, name: String, message: String) {
    world.tracker.commit(Report::new(name, message));
}

#[when(expr = "the report {string} with message {string} is diffed")]
fn report_diffed(world: &mut HomeworkWatchWorld, name: String, message: String) {
    let changed = world.tracker.diff(&Report::new(name, message));
    world.diff_results.push(changed);
}

#[then("every diff should report a change")]
fn every_diff_changed(world: &mut HomeworkWatchWorld) {
    assert!(!world.diff_results.is_empty(), "no diff was run");
    assert!(
        world.diff_results.iter().all(|changed| *changed),
        "{:?}",
        world.diff_results
    );
}

#[then("the last diff should report no change")]
fn last_diff_unchanged(world: &mut HomeworkWatchWorld) {
    assert_eq!(world.diff_results.last(), Some(&false));
}
