use crate::infrastructure::security::InputSanitizer;
use safe_csrf_errors::AppError;
use serde_json::Value;

/// Sanitizes untrusted text for display or storage.
pub fn token(data: &str) -> String {
    sanitize(data)
}

/// Entry point for dynamically typed input such as decoded JSON payloads.
///
/// Only strings are accepted; anything else fails with
/// [`AppError::TypeMismatch`] naming the JSON type that was received.
pub fn token_value(data: &Value) -> Result<String, AppError> {
    match data {
        Value::String(text) => Ok(sanitize(text)),
        other => {
            let actual = json_type_name(other);
            tracing::debug!(actual, "Rejected non-string input");
            Err(AppError::type_mismatch("string", actual))
        }
    }
}

pub fn sanitize(text: &str) -> String {
    InputSanitizer::sanitize(text)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
