//! Driver configuration surface.
//!
//! The driver consumes this; it never writes it. The shape mirrors the
//! flat environment table speech front-ends hand to their output drivers:
//! numeric bounds and defaults for volume/pitch/rate, default
//! voice/language/module identifiers, and the synthesizer command
//! template.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;
use crate::settings::{ScaleBounds, VoiceSettings, format_scaled};

/// Command template used when the configured one is empty.
pub const DEFAULT_COMMAND: &str =
    r#"espeak -a outloudVolume -s outloudRate -p outloudPitch -v outloudVoice -- "outloudText""#;

/// Fixed bounds, default settings, and command template for one driver
/// instance.
///
/// Unknown fields in a configuration file are rejected; missing fields
/// fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub min_volume: f64,
    pub volume: f64,
    pub max_volume: f64,

    pub min_pitch: f64,
    pub pitch: f64,
    pub max_pitch: f64,

    pub min_rate: f64,
    pub rate: f64,
    pub max_rate: f64,

    pub voice: String,
    pub language: String,
    pub module: String,

    /// Synthesizer command template; see [`crate::template`].
    pub command: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_volume: 0.0,
            volume: 100.0,
            max_volume: 200.0,
            min_pitch: 0.0,
            pitch: 50.0,
            max_pitch: 99.0,
            min_rate: 80.0,
            rate: 280.0,
            max_rate: 450.0,
            voice: "en-us".into(),
            language: String::new(),
            module: "espeak".into(),
            command: DEFAULT_COMMAND.into(),
        }
    }
}

impl DriverConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SpeechError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SpeechError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SpeechError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured command template, or the built-in default if empty.
    #[must_use]
    pub fn command_or_default(&self) -> &str {
        if self.command.trim().is_empty() {
            DEFAULT_COMMAND
        } else {
            &self.command
        }
    }

    #[must_use]
    pub const fn volume_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.min_volume, self.max_volume)
    }

    #[must_use]
    pub const fn pitch_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.min_pitch, self.max_pitch)
    }

    #[must_use]
    pub const fn rate_bounds(&self) -> ScaleBounds {
        ScaleBounds::new(self.min_rate, self.max_rate)
    }

    /// Seed the driver's settings from the configured defaults.
    #[must_use]
    pub fn initial_settings(&self) -> VoiceSettings {
        VoiceSettings {
            volume: format_scaled(self.volume),
            rate: format_scaled(self.rate),
            pitch: format_scaled(self.pitch),
            voice: self.voice.clone(),
            language: self.language.clone(),
            module: self.module.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_stock_espeak_setup() {
        let config = DriverConfig::default();
        assert!((config.max_volume - 200.0).abs() < f64::EPSILON);
        assert!((config.max_pitch - 99.0).abs() < f64::EPSILON);
        assert!((config.min_rate - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.module, "espeak");
        assert!(config.command.starts_with("espeak"));
    }

    #[test]
    fn empty_command_falls_back_to_default() {
        let config = DriverConfig {
            command: "  ".into(),
            ..DriverConfig::default()
        };
        assert_eq!(config.command_or_default(), DEFAULT_COMMAND);
    }

    #[test]
    fn initial_settings_are_stringified_defaults() {
        let settings = DriverConfig::default().initial_settings();
        assert_eq!(settings.volume, "100");
        assert_eq!(settings.rate, "280");
        assert_eq!(settings.pitch, "50");
        assert_eq!(settings.voice, "en-us");
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: DriverConfig =
            serde_json::from_str(r#"{"rate": 300.0, "voice": "de"}"#).unwrap();
        assert!((config.rate - 300.0).abs() < f64::EPSILON);
        assert_eq!(config.voice, "de");
        assert_eq!(config.module, "espeak");
    }

    #[test]
    fn serialization_roundtrip() {
        let config = DriverConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DriverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
