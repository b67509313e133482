use std::fmt;

use serde::{Deserialize, Serialize};

use crate::authenticators::Authenticators;
use crate::platform::ApiLevel;

/// Unified enrollment screen for biometrics and the device credential.
pub const ACTION_BIOMETRIC_ENROLL: &str = "android.settings.BIOMETRIC_ENROLL";
/// Fingerprint-only enrollment screen on versions before the unified one.
pub const ACTION_FINGERPRINT_ENROLL: &str = "android.settings.FINGERPRINT_ENROLL";
/// General security settings, the fallback when no enrollment screen exists.
pub const ACTION_SECURITY_SETTINGS: &str = "android.settings.SECURITY_SETTINGS";

/// Extra key restricting the unified enrollment screen to the given
/// authenticator classes.
pub const EXTRA_BIOMETRIC_AUTHENTICATORS_ALLOWED: &str =
    "android.provider.extra.BIOMETRIC_AUTHENTICATORS_ALLOWED";

/// One keyed value attached to an [`IntentTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentExtra {
    pub key: String,
    pub value: u32,
}

/// An external screen to launch, described by action string and extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentTarget {
    pub action: String,
    pub extras: Vec<IntentExtra>,
}

impl IntentTarget {
    pub fn new(action: impl Into<String>) -> Self {
        IntentTarget {
            action: action.into(),
            extras: Vec::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: u32) -> Self {
        self.extras.push(IntentExtra {
            key: key.into(),
            value,
        });
        self
    }

    /// Value of the extra stored under `key`, if any.
    pub fn extra(&self, key: &str) -> Option<u32> {
        self.extras
            .iter()
            .find(|extra| extra.key == key)
            .map(|extra| extra.value)
    }
}

impl fmt::Display for IntentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        for extra in &self.extras {
            write!(f, " {}={:#x}", extra.key, extra.value)?;
        }
        Ok(())
    }
}

/// Picks the settings screen that lets the user enroll something usable by
/// a prompt asking for `allowed` on platform version `level`.
///
/// Version 30 and later have a dedicated enrollment screen that takes the
/// authenticator classes as an extra. 28 and 29 only expose fingerprint
/// enrollment. Anything older gets the general security settings.
pub fn enroll_intent(level: ApiLevel, allowed: Authenticators) -> IntentTarget {
    if level >= ApiLevel::R {
        IntentTarget::new(ACTION_BIOMETRIC_ENROLL)
            .with_extra(EXTRA_BIOMETRIC_AUTHENTICATORS_ALLOWED, allowed.bits())
    } else if level >= ApiLevel::P {
        IntentTarget::new(ACTION_FINGERPRINT_ENROLL)
    } else {
        IntentTarget::new(ACTION_SECURITY_SETTINGS)
    }
}
