use std::io;
use thiserror::Error;

use crate::brain::classifier::ClassifierError;

/// The only way intent resolution can fail.
///
/// A query that matches nothing is not an error: it resolves to the fallback
/// topic. This error means the knowledge base itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The fallback topic is absent, so there is no valid key to fall back to.
    #[error("Configuration error: fallback topic '{0}' is missing from the knowledge base")]
    MissingFallback(String),
}

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resolution failed because the knowledge base is misconfigured.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The external topic classifier failed or could not be reached.
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., malformed knowledge base entries).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., invalid environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether an operator must fix the deployment before requests can succeed.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::Resolve(_) | AppError::Config(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Validation(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
