use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;
use thiserror::Error;

use crate::client::ApiOperation;

/// Form fields that carry client-side validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    PhoneNumber,
    DateOfBirth,
}

/// A field-level validation failure with the message shown on the form's error line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The custom error type for the form and its REST client.
#[derive(Debug, Error)]
pub enum Error {
    /// Locally detected input problem; blocks any network call.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// The backend answered with a status other than the one the contract promises.
    #[error("Unexpected status for {operation}: expected {expected}, got {actual}")]
    UnexpectedStatus {
        operation: ApiOperation,
        expected: StatusCode,
        actual: StatusCode,
    },

    /// Transport failure from reqwest (connection refused, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base endpoint is not a usable URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message suitable for the form's error line, if this error is user-facing.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Validation(err) => Some(&err.message),
            _ => None,
        }
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;
