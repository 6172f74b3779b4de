//! Shape checks for the status endpoint payload

use serde_json::Value;

use crate::WatchError;

pub const ITEMS_KEY: &str = "homeworks";
pub const CURSOR_KEY: &str = "current_date";

/// One element of the `homeworks` list.
///
/// Fields are optional here; [`crate::formatter::format`] decides which are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusItem {
    pub name: Option<String>,
    pub status_code: Option<String>,
}

impl StatusItem {
    pub fn new(name: impl Into<String>, status_code: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status_code: Some(status_code.into()),
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: field("homework_name"),
            status_code: field("status"),
        }
    }
}

/// A payload that passed the shape checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    /// Most recent first, as returned by the server
    pub items: Vec<StatusItem>,
    pub next_cursor: i64,
}

/// Check the payload shape and decode its items
pub fn validate(payload: &Value) -> crate::Result<ValidatedResponse> {
    let object = payload
        .as_object()
        .ok_or_else(|| WatchError::Shape(format!("expected a JSON object, got {}", kind(payload))))?;

    let items = object
        .get(ITEMS_KEY)
        .ok_or_else(|| WatchError::Shape(format!("missing key `{}`", ITEMS_KEY)))?;
    let cursor = object
        .get(CURSOR_KEY)
        .ok_or_else(|| WatchError::Shape(format!("missing key `{}`", CURSOR_KEY)))?;

    let items = items.as_array().ok_or_else(|| {
        WatchError::Shape(format!(
            "`{}` must be a list, got {}",
            ITEMS_KEY,
            kind(items)
        ))
    })?;
    let next_cursor = cursor.as_i64().ok_or_else(|| {
        WatchError::Shape(format!(
            "`{}` must be an integer, got {}",
            CURSOR_KEY,
            kind(cursor)
        ))
    })?;

    tracing::debug!(
        "Validated response: {} item(s), next cursor {}",
        items.len(),
        next_cursor
    );

    Ok(ValidatedResponse {
        items: items.iter().map(StatusItem::from_value).collect(),
        next_cursor,
    })
}

/// The integer cursor carried by `payload`, without checking anything else
pub fn next_cursor(payload: &Value) -> Option<i64> {
    payload.get(CURSOR_KEY).and_then(Value::as_i64)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
