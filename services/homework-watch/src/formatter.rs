//! Human-readable rendering of homework statuses

use crate::validator::StatusItem;
use crate::WatchError;

/// Known status codes and their verdicts
pub const VERDICTS: [(&str, &str); 3] = [
    (
        "approved",
        "The work has been reviewed: the reviewer liked everything. Hooray!",
    ),
    ("reviewing", "The work has been taken for review."),
    (
        "rejected",
        "The work has been reviewed: the reviewer has comments.",
    ),
];

/// Verdict text for a status code, if the code is known
pub fn verdict(status_code: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(code, _)| *code == status_code)
        .map(|(_, verdict)| *verdict)
}

/// Render the notification text for one item
pub fn format(item: &StatusItem) -> crate::Result<String> {
    let name = item
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(WatchError::MissingField("homework_name"))?;
    let status_code = item
        .status_code
        .as_deref()
        .ok_or(WatchError::MissingField("status"))?;
    let verdict =
        verdict(status_code).ok_or_else(|| WatchError::UnknownStatus(status_code.to_string()))?;

    Ok(format!("Status of \"{}\" changed. {}", name, verdict))
}
