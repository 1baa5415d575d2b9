pub mod login;
pub mod users;

use serde_json::{Map, Value};

use crate::error::ApiError;

/// Request bodies arrive as loose JSON so partial updates and the shallow
/// merge can pass unknown fields through.
pub(crate) fn require_body(body: Option<&Value>) -> Result<&Map<String, Value>, ApiError> {
    body.and_then(Value::as_object)
        .filter(|map| !map.is_empty())
        .ok_or_else(|| ApiError::bad_request("Body is empty!"))
}

/// A required field must be present and non-empty; each one carries its own
/// message ("Name is empty!" and friends).
pub(crate) fn require_field<'a>(
    body: &'a Map<String, Value>,
    key: &str,
    message: &str,
) -> Result<&'a str, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}
