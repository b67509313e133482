use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform-reported readiness of biometric authentication, as returned by
/// `can_authenticate` before a prompt is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// Biometric authentication can succeed right now.
    Available,
    /// The device has no biometric hardware at all.
    NoHardware,
    /// Hardware exists but is currently unavailable.
    HardwareUnavailable,
    /// Hardware is ready but nothing is enrolled; recoverable through the
    /// enrollment fallback.
    NoneEnrolled,
    /// A security update is required before the sensor may be used.
    SecurityUpdateRequired,
    /// The requested authenticator combination is not supported on this
    /// platform version.
    Unsupported,
    /// The platform could not determine the status.
    Unknown,
}

impl AvailabilityStatus {
    /// Maps the platform's integer status code. Total: unrecognized codes
    /// collapse into [`AvailabilityStatus::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => AvailabilityStatus::Available,
            1 => AvailabilityStatus::HardwareUnavailable,
            11 => AvailabilityStatus::NoneEnrolled,
            12 => AvailabilityStatus::NoHardware,
            15 => AvailabilityStatus::SecurityUpdateRequired,
            -2 => AvailabilityStatus::Unsupported,
            _ => AvailabilityStatus::Unknown,
        }
    }

    /// The platform's integer status code for this status.
    pub fn code(&self) -> i32 {
        match self {
            AvailabilityStatus::Available => 0,
            AvailabilityStatus::HardwareUnavailable => 1,
            AvailabilityStatus::NoneEnrolled => 11,
            AvailabilityStatus::NoHardware => 12,
            AvailabilityStatus::SecurityUpdateRequired => 15,
            AvailabilityStatus::Unsupported => -2,
            AvailabilityStatus::Unknown => -1,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityStatus::Available)
    }

    /// User-facing message for this status.
    pub fn user_message(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Biometric features are available",
            AvailabilityStatus::NoHardware => "No biometric features available on this device",
            AvailabilityStatus::HardwareUnavailable => {
                "Biometric features are currently unavailable"
            }
            AvailabilityStatus::NoneEnrolled => "No biometric or device credential is enrolled",
            AvailabilityStatus::SecurityUpdateRequired => {
                "A security update is required before biometric features can be used"
            }
            AvailabilityStatus::Unsupported => {
                "Biometric authentication is not supported on this device"
            }
            AvailabilityStatus::Unknown => "Biometric availability could not be determined",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::NoHardware => write!(f, "no hardware"),
            AvailabilityStatus::HardwareUnavailable => write!(f, "hardware unavailable"),
            AvailabilityStatus::NoneEnrolled => write!(f, "none enrolled"),
            AvailabilityStatus::SecurityUpdateRequired => write!(f, "security update required"),
            AvailabilityStatus::Unsupported => write!(f, "unsupported"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl From<&str> for AvailabilityStatus {
    fn from(s: &str) -> Self {
        match s {
            "available" => AvailabilityStatus::Available,
            "no_hardware" => AvailabilityStatus::NoHardware,
            "hardware_unavailable" => AvailabilityStatus::HardwareUnavailable,
            "none_enrolled" => AvailabilityStatus::NoneEnrolled,
            "security_update_required" => AvailabilityStatus::SecurityUpdateRequired,
            "unsupported" => AvailabilityStatus::Unsupported,
            _ => AvailabilityStatus::Unknown,
        }
    }
}
