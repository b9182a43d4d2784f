use thiserror::Error;

use crate::request::MIN_INGREDIENTS;

/// Errors that can occur while handling the ingredient form
#[derive(Error, Debug)]
pub enum FormError {
    /// Fewer non-empty ingredients than required; no request is sent
    #[error("At least {} ingredients are required, found {found}", MIN_INGREDIENTS)]
    Validation { found: usize },

    /// Transport failure or a response body that is not JSON
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with an `error` field
    #[error("API error: {0}")]
    Api(String),

    /// The payload matched none of the accepted envelope shapes
    #[error("Unexpected response format")]
    UnexpectedShape,

    /// The record is missing required fields at render time
    #[error("Recipe could not be rendered")]
    RenderValidation,

    /// No control is registered under this element id
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl From<reqwest::Error> for FormError {
    fn from(err: reqwest::Error) -> Self {
        FormError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::Network(err.to_string())
    }
}
