//! Biometric unlock flow.
//!
//! Configures a system authentication prompt for the running platform
//! version, drives one prompt session at a time through its outcomes, and
//! optionally steers the user into enrollment when nothing is enrolled yet.
//! Platform specifics stay behind the traits in [`platform`], so the whole
//! flow runs deterministically without a device.

pub mod authenticators;
pub mod availability;
pub mod controller;
pub mod enroll;
pub mod error;
pub mod outcome;
pub mod platform;
pub mod prompt;
pub mod settings;

pub use authenticators::Authenticators;
pub use availability::AvailabilityStatus;
pub use controller::{AuthFlow, FlowState};
pub use enroll::{enroll_intent, IntentExtra, IntentTarget};
pub use error::FlowError;
pub use outcome::{
    outcome_channel, AuthenticationOutcome, Disposition, OutcomeReporter, PromptSession,
};
pub use platform::{
    ApiLevel, ConfirmRequest, Confirmation, LaunchResult, Notifier, PlatformAuthenticator,
    ScreenId, ScreenNavigator, SettingsNavigator,
};
pub use prompt::{allowed_for_api_level, PromptConfig, PromptConfigBuilder};
pub use settings::FlowSettings;
