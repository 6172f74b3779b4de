//! Last-communicated report and change detection

/// Placeholder message used when the server reports no statuses
pub const NO_NEW_STATUSES: &str = "No new homework statuses.";

/// What was (or would be) communicated for the most recent item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub item_name: String,
    pub rendered_message: String,
}

impl Report {
    pub fn new(item_name: impl Into<String>, rendered_message: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            rendered_message: rendered_message.into(),
        }
    }

    /// Report for an empty status list
    pub fn no_new_statuses() -> Self {
        Self::new("", NO_NEW_STATUSES)
    }
}

/// Holds the previous report. Starts from the empty report, so the first
/// formatted report always counts as a change.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    previous: Report,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `candidate` differs from the previous report
    pub fn diff(&self, candidate: &Report) -> bool {
        *candidate != self.previous
    }

    pub fn commit(&mut self, candidate: Report) {
        tracing::debug!("Committing report for '{}'", candidate.item_name);
        self.previous = candidate;
    }

    pub fn previous(&self) -> &Report {
        &self.previous
    }
}
