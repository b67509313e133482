use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::availability::AvailabilityStatus;
use crate::enroll::enroll_intent;
use crate::error::FlowError;
use crate::outcome::Disposition;
use crate::platform::{
    ConfirmRequest, Confirmation, LaunchResult, Notifier, PlatformAuthenticator, ScreenId,
    ScreenNavigator, SettingsNavigator,
};
use crate::prompt::{allowed_for_api_level, PromptConfig};
use crate::settings::FlowSettings;

const GO_TO_SETTINGS: &str = "Go to settings";
const BACK: &str = "Back";
const MSG_ENROLLED: &str = "New biometric or device credential has been enrolled";
const MSG_ENROLL_CANCELLED: &str = "Enrollment has been cancelled";
const MSG_ENROLL_UNEXPECTED: &str = "Something unexpected happened during enrollment";

/// Where the unlock flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No prompt configuration exists yet.
    Idle,
    /// Configured and armed; a trigger will present the prompt.
    Configured,
    /// A prompt session is consuming outcomes.
    Prompting,
    /// The user authenticated; further triggers are ignored.
    Succeeded,
    /// The last session ended in a terminal error; a trigger re-arms.
    Errored,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Idle => write!(f, "idle"),
            FlowState::Configured => write!(f, "configured"),
            FlowState::Prompting => write!(f, "prompting"),
            FlowState::Succeeded => write!(f, "succeeded"),
            FlowState::Errored => write!(f, "errored"),
        }
    }
}

/// Drives one unlock flow against the platform collaborators.
///
/// Triggering takes `&mut self`, so a flow can only ever have one prompt
/// session pending.
pub struct AuthFlow {
    settings: FlowSettings,
    platform: Arc<dyn PlatformAuthenticator>,
    settings_nav: Arc<dyn SettingsNavigator>,
    screens: Arc<dyn ScreenNavigator>,
    notifier: Arc<dyn Notifier>,
    config: Option<PromptConfig>,
    state: FlowState,
}

impl AuthFlow {
    pub fn new(
        settings: FlowSettings,
        platform: Arc<dyn PlatformAuthenticator>,
        settings_nav: Arc<dyn SettingsNavigator>,
        screens: Arc<dyn ScreenNavigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        AuthFlow {
            settings,
            platform,
            settings_nav,
            screens,
            notifier,
            config: None,
            state: FlowState::Idle,
        }
    }

    /// Builds the prompt configuration for the settings' platform version.
    /// Idempotent: once configured, later calls keep the existing config.
    pub fn configure(&mut self) -> Result<(), FlowError> {
        if self.config.is_some() {
            log::debug!("prompt already configured");
            return Ok(());
        }
        let config = PromptConfig::for_api_level(self.settings.api_level, &self.settings)?;
        log::info!(
            "prompt configured for {} with {}",
            self.settings.api_level,
            config.allowed()
        );
        self.config = Some(config);
        if self.state == FlowState::Idle {
            self.state = FlowState::Configured;
        }
        Ok(())
    }

    /// Runs one unlock attempt end to end and returns the resulting state.
    ///
    /// Ignored before [`configure`](Self::configure) and after a success.
    /// With the enrollment fallback enabled, a missing enrollment is offered
    /// for repair before any prompt is shown.
    pub async fn trigger(&mut self) -> FlowState {
        let Some(config) = self.config.clone() else {
            log::warn!("unlock requested before the prompt was configured");
            return self.state;
        };
        if self.state == FlowState::Succeeded {
            log::debug!("already unlocked, ignoring unlock request");
            return self.state;
        }
        if self.state == FlowState::Prompting {
            log::debug!("previous prompt session was abandoned, starting over");
        }

        let activation = Uuid::new_v4();
        log::info!("unlock attempt {activation} requesting {}", config.allowed());

        if self.settings.enrollment_fallback && !self.ensure_enrolled(&config).await {
            // The prompt never went up; the flow stays armed for another try.
            self.state = FlowState::Configured;
            return self.state;
        }
        self.run_prompt(activation, &config).await;
        self.state
    }

    /// Drops the configuration and returns to [`FlowState::Idle`].
    pub fn reset(&mut self) {
        self.config = None;
        self.state = FlowState::Idle;
    }

    /// Asks the platform whether the flow's authenticators could succeed
    /// right now.
    pub fn availability(&self) -> AvailabilityStatus {
        let allowed = match &self.config {
            Some(config) => config.allowed(),
            None => allowed_for_api_level(self.settings.api_level),
        };
        self.platform.can_authenticate(allowed)
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn prompt_config(&self) -> Option<&PromptConfig> {
        self.config.as_ref()
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Pre-flight check. Returns whether the prompt should still be shown.
    async fn ensure_enrolled(&self, config: &PromptConfig) -> bool {
        match self.platform.can_authenticate(config.allowed()) {
            AvailabilityStatus::Available => true,
            AvailabilityStatus::NoneEnrolled => self.offer_enrollment(config).await,
            status => {
                log::error!("biometric authentication unavailable: {status}");
                self.notifier.notify(status.user_message());
                false
            }
        }
    }

    /// Offers to take the user to the enrollment screen. Returns true only
    /// when enrollment completed and the prompt should follow immediately.
    async fn offer_enrollment(&self, config: &PromptConfig) -> bool {
        let request = ConfirmRequest::new(
            AvailabilityStatus::NoneEnrolled.user_message(),
            GO_TO_SETTINGS,
            BACK,
        );
        let answer = match self.notifier.confirm(&request).await {
            Ok(answer) => answer,
            Err(err) => {
                log::warn!("could not present the enrollment dialog: {err}");
                return false;
            }
        };
        if answer == Confirmation::Dismissed {
            log::debug!("enrollment declined");
            return false;
        }

        let target = enroll_intent(self.settings.api_level, config.allowed());
        log::info!("launching enrollment: {target}");
        match self.settings_nav.launch(&target).await {
            LaunchResult::Ok => {
                self.notifier.notify(MSG_ENROLLED);
                true
            }
            LaunchResult::Cancelled => {
                self.notifier.notify(MSG_ENROLL_CANCELLED);
                false
            }
            LaunchResult::Other(code) => {
                log::warn!("enrollment ended with unexpected result code {code}");
                self.notifier.notify(MSG_ENROLL_UNEXPECTED);
                false
            }
        }
    }

    /// Presents the prompt and consumes outcomes until a terminal one or the
    /// session is torn down. Every outcome is announced before the flow acts
    /// on it.
    async fn run_prompt(&mut self, activation: Uuid, config: &PromptConfig) {
        self.state = FlowState::Prompting;
        let mut session = self.platform.authenticate(config);
        while let Some(outcome) = session.next_outcome().await {
            log::debug!("unlock attempt {activation}: {outcome}");
            self.notifier.notify(&outcome.user_message());
            match outcome.disposition() {
                Disposition::AwaitRetry => continue,
                Disposition::Advance => {
                    self.screens.advance_to(ScreenId::Home);
                    self.state = FlowState::Succeeded;
                    return;
                }
                Disposition::End => {
                    self.state = FlowState::Errored;
                    return;
                }
            }
        }
        // Session ended without a terminal outcome: the prompt went away
        // (screen teardown, platform cancellation). Nothing is announced.
        log::debug!("unlock attempt {activation} discarded without an outcome");
        self.state = FlowState::Configured;
    }
}
