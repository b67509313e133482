//! Error types for the authentication flow

use thiserror::Error;

/// Errors produced while building a prompt configuration or wiring the flow.
///
/// Platform authentication failures never appear here: they arrive as
/// [`AuthenticationOutcome`](crate::AuthenticationOutcome) values and are
/// surfaced to the user as notifications instead of propagating as faults.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("a negative button label cannot be combined with device credential authentication")]
    ConflictingNegativeButton,

    #[error("at least one authenticator must be allowed")]
    EmptyAuthenticators,

    #[error("a negative button label is required when device credential authentication is not allowed")]
    MissingNegativeButton,

    #[error("prompt title must not be empty")]
    MissingTitle,

    #[error("failed to read settings: {0}")]
    Settings(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("dialog could not be presented: {0}")]
    DialogPresentation(String),
}
