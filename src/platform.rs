use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::authenticators::Authenticators;
use crate::availability::AvailabilityStatus;
use crate::enroll::IntentTarget;
use crate::error::FlowError;
use crate::outcome::PromptSession;
use crate::prompt::PromptConfig;

/// Platform version, compared numerically to pick authenticator classes and
/// enrollment targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    /// First version with fingerprint enrollment settings.
    pub const P: ApiLevel = ApiLevel(28);
    pub const Q: ApiLevel = ApiLevel(29);
    /// First version with the unified biometric enrollment action.
    pub const R: ApiLevel = ApiLevel(30);
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        ApiLevel(level)
    }
}

/// Destination screens the flow can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Lock,
    Home,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenId::Lock => write!(f, "lock"),
            ScreenId::Home => write!(f, "home"),
        }
    }
}

/// Result of launching an external settings screen and waiting for the user
/// to come back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchResult {
    /// The user completed the settings task.
    Ok,
    /// The user backed out without finishing.
    Cancelled,
    /// Any other platform result code.
    Other(i32),
}

/// A yes/no question put to the user, with explicit button labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub message: String,
    pub accept_label: String,
    pub dismiss_label: String,
}

impl ConfirmRequest {
    pub fn new(
        message: impl Into<String>,
        accept_label: impl Into<String>,
        dismiss_label: impl Into<String>,
    ) -> Self {
        ConfirmRequest {
            message: message.into(),
            accept_label: accept_label.into(),
            dismiss_label: dismiss_label.into(),
        }
    }
}

/// The user's answer to a [`ConfirmRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Dismissed,
}

/// Platform biometric service: availability checks and prompt presentation.
pub trait PlatformAuthenticator: Send + Sync {
    /// Reports whether any of the `allowed` authenticator classes could
    /// succeed right now.
    fn can_authenticate(&self, allowed: Authenticators) -> AvailabilityStatus;

    /// Presents the system prompt and returns the session on which its
    /// outcomes arrive. Dropping the session discards outcomes still in
    /// flight.
    fn authenticate(&self, config: &PromptConfig) -> PromptSession;
}

/// Launches external settings screens and reports how they were left.
#[async_trait]
pub trait SettingsNavigator: Send + Sync {
    async fn launch(&self, target: &IntentTarget) -> LaunchResult;
}

/// Moves the user between screens once the flow decides where to go.
pub trait ScreenNavigator: Send + Sync {
    fn advance_to(&self, screen: ScreenId);
}

/// Surfaces transient messages and blocking confirmations to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fire-and-forget message, e.g. a toast.
    fn notify(&self, message: &str);

    /// Blocks until the user answers. Fails if the dialog cannot be
    /// presented at all.
    async fn confirm(&self, request: &ConfirmRequest) -> Result<Confirmation, FlowError>;
}
