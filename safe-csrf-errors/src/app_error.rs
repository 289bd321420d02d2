use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::TypeMismatch { .. } => "The submitted value has the wrong type.",
            Self::InvalidConfig(_) => "The service is misconfigured. Try again later.",
        }
    }
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("Expected ") {
            if let Some((expected, actual)) = rest.split_once(", got ") {
                return Ok(AppError::type_mismatch(expected, actual));
            }
        }

        let detail = s.strip_prefix("Invalid configuration: ").unwrap_or(s);
        Ok(AppError::InvalidConfig(detail.to_string()))
    }
}
