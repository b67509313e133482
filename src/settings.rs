use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::platform::ApiLevel;

/// Tunable parts of the unlock flow, loaded from a JSON file with optional
/// environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    /// Prompt title. Must stay non-empty or configuration fails.
    pub title: String,
    /// Prompt subtitle; an empty string omits it from the prompt.
    pub subtitle: String,
    /// Require an explicit confirmation tap after a passive biometric.
    pub confirmation_required: bool,
    /// Offer the enrollment dialog when nothing is enrolled instead of
    /// prompting into a dead end.
    pub enrollment_fallback: bool,
    /// Platform version the flow configures itself for.
    pub api_level: ApiLevel,
}

impl Default for FlowSettings {
    fn default() -> Self {
        FlowSettings {
            title: "Verify your identity".to_string(),
            subtitle: "Authenticate with a biometric or your screen lock".to_string(),
            confirmation_required: false,
            enrollment_fallback: false,
            api_level: ApiLevel::R,
        }
    }
}

impl FlowSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let raw = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FlowError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Applies `BIOPROMPT_*` environment overrides on top of whatever was
    /// loaded. Unparseable values are logged and skipped.
    pub fn apply_env(&mut self) {
        if let Ok(title) = env::var("BIOPROMPT_TITLE") {
            if !title.trim().is_empty() {
                self.title = title;
            }
        }
        if let Ok(subtitle) = env::var("BIOPROMPT_SUBTITLE") {
            self.subtitle = subtitle;
        }
        if let Ok(value) = env::var("BIOPROMPT_CONFIRMATION_REQUIRED") {
            match parse_flag(&value) {
                Some(flag) => self.confirmation_required = flag,
                None => log::warn!("ignoring BIOPROMPT_CONFIRMATION_REQUIRED={value}"),
            }
        }
        if let Ok(value) = env::var("BIOPROMPT_ENROLLMENT_FALLBACK") {
            match parse_flag(&value) {
                Some(flag) => self.enrollment_fallback = flag,
                None => log::warn!("ignoring BIOPROMPT_ENROLLMENT_FALLBACK={value}"),
            }
        }
        if let Ok(value) = env::var("BIOPROMPT_API_LEVEL") {
            match value.parse::<u32>() {
                Ok(level) => self.api_level = ApiLevel(level),
                Err(_) => log::warn!("ignoring BIOPROMPT_API_LEVEL={value}"),
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FlowSettings::default();
        assert_eq!(settings.title, "Verify your identity");
        assert!(!settings.confirmation_required);
        assert!(!settings.enrollment_fallback);
        assert_eq!(settings.api_level, ApiLevel::R);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = FlowSettings::default();
        settings.title = "Unlock".to_string();
        settings.enrollment_fallback = true;
        settings.api_level = ApiLevel::P;
        settings.save(&path).unwrap();

        assert_eq!(FlowSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"title": "Unlock", "api_level": 28}"#).unwrap();

        let settings = FlowSettings::load(&path).unwrap();
        assert_eq!(settings.title, "Unlock");
        assert_eq!(settings.api_level, ApiLevel::P);
        assert_eq!(settings.subtitle, FlowSettings::default().subtitle);
        assert!(!settings.enrollment_fallback);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            FlowSettings::load(&path),
            Err(FlowError::SettingsFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            FlowSettings::load(&path),
            Err(FlowError::Settings(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = FlowSettings::default();
        env::set_var("BIOPROMPT_TITLE", "From env");
        env::set_var("BIOPROMPT_CONFIRMATION_REQUIRED", "yes");
        env::set_var("BIOPROMPT_ENROLLMENT_FALLBACK", "on");
        env::set_var("BIOPROMPT_API_LEVEL", "29");

        settings.apply_env();

        env::remove_var("BIOPROMPT_TITLE");
        env::remove_var("BIOPROMPT_CONFIRMATION_REQUIRED");
        env::remove_var("BIOPROMPT_ENROLLMENT_FALLBACK");
        env::remove_var("BIOPROMPT_API_LEVEL");

        assert_eq!(settings.title, "From env");
        assert!(settings.confirmation_required);
        assert!(settings.enrollment_fallback);
        assert_eq!(settings.api_level, ApiLevel::Q);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
