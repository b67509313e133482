use serde::{Deserialize, Serialize};

use crate::authenticators::Authenticators;
use crate::error::FlowError;
use crate::platform::ApiLevel;
use crate::settings::FlowSettings;

/// Picks the authenticator classes to request on a given platform version.
///
/// Versions 28 and 29 are asked for strong biometrics, everything else for
/// weak ones; the device credential is always accepted as a fallback.
pub fn allowed_for_api_level(level: ApiLevel) -> Authenticators {
    if level >= ApiLevel::P && level <= ApiLevel::Q {
        Authenticators::STRONG_BIOMETRIC | Authenticators::DEVICE_CREDENTIAL
    } else {
        Authenticators::WEAK_BIOMETRIC | Authenticators::DEVICE_CREDENTIAL
    }
}

/// Validated description of a system authentication prompt.
///
/// Only obtainable through [`PromptConfigBuilder`]; deserialization runs
/// through the same `build` checks, so every value satisfies the platform's
/// consistency rules before it reaches a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PromptConfigBuilder")]
pub struct PromptConfig {
    title: String,
    subtitle: Option<String>,
    allowed: Authenticators,
    confirmation_required: bool,
    negative_button_text: Option<String>,
}

impl PromptConfig {
    /// Standard configuration for a platform version: authenticators from
    /// [`allowed_for_api_level`], texts from settings, no negative button
    /// since the device credential serves as the fallback.
    pub fn for_api_level(level: ApiLevel, settings: &FlowSettings) -> Result<Self, FlowError> {
        let mut builder = PromptConfigBuilder::new()
            .title(settings.title.clone())
            .allowed(allowed_for_api_level(level))
            .confirmation_required(settings.confirmation_required);
        if !settings.subtitle.is_empty() {
            builder = builder.subtitle(settings.subtitle.clone());
        }
        builder.build()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn allowed(&self) -> Authenticators {
        self.allowed
    }

    pub fn confirmation_required(&self) -> bool {
        self.confirmation_required
    }

    pub fn negative_button_text(&self) -> Option<&str> {
        self.negative_button_text.as_deref()
    }
}

/// Builder for [`PromptConfig`]; `build` rejects combinations the platform
/// would refuse at display time. Also the deserialization shape of
/// [`PromptConfig`], so parsed configurations face the same validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfigBuilder {
    title: Option<String>,
    subtitle: Option<String>,
    allowed: Authenticators,
    confirmation_required: bool,
    negative_button_text: Option<String>,
}

impl Default for PromptConfigBuilder {
    fn default() -> Self {
        PromptConfigBuilder {
            title: None,
            subtitle: None,
            allowed: Authenticators::empty(),
            confirmation_required: false,
            negative_button_text: None,
        }
    }
}

impl PromptConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn allowed(mut self, allowed: Authenticators) -> Self {
        self.allowed = allowed;
        self
    }

    pub fn confirmation_required(mut self, required: bool) -> Self {
        self.confirmation_required = required;
        self
    }

    pub fn negative_button_text(mut self, text: impl Into<String>) -> Self {
        self.negative_button_text = Some(text.into());
        self
    }

    /// Validates and assembles the configuration.
    ///
    /// Rules, checked in order: at least one authenticator class; a negative
    /// button may not coexist with the device credential; a biometric-only
    /// prompt needs a negative button as its escape hatch; and the title must
    /// be non-empty.
    pub fn build(self) -> Result<PromptConfig, FlowError> {
        if self.allowed.is_empty() {
            return Err(FlowError::EmptyAuthenticators);
        }
        if self.negative_button_text.is_some() && self.allowed.allows_device_credential() {
            return Err(FlowError::ConflictingNegativeButton);
        }
        if !self.allowed.allows_device_credential() && self.negative_button_text.is_none() {
            return Err(FlowError::MissingNegativeButton);
        }
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(FlowError::MissingTitle),
        };
        Ok(PromptConfig {
            title,
            subtitle: self.subtitle,
            allowed: self.allowed,
            confirmation_required: self.confirmation_required,
            negative_button_text: self.negative_button_text,
        })
    }
}

impl TryFrom<PromptConfigBuilder> for PromptConfig {
    type Error = FlowError;

    fn try_from(builder: PromptConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
