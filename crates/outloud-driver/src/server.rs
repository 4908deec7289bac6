//! Speech-server facade over the driver.
//!
//! Thin integration surface for host applications that talk to speech in
//! terms of characters, utterance lists, and stepwise rate/pitch nudges
//! rather than raw unit values. Everything here delegates to
//! [`SpeechDriver`]; the only state of its own is the unit-scale tuning
//! the step operations act on.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use outloud_core::DriverConfig;

use crate::driver::SpeechDriver;

/// Gender attributed to a voice family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    Male,
    Female,
}

/// Description of one voice family, for settings UIs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFamily {
    pub name: String,
    pub gender: Option<VoiceGender>,
    pub locale: Option<String>,
    pub dialect: Option<String>,
}

/// Unit-scale tuning the step operations adjust.
#[derive(Clone, Copy, Debug)]
struct Tuning {
    rate: f64,
    pitch: f64,
}

/// Host-facing speech server.
pub struct SpeechServer {
    driver: Arc<SpeechDriver>,
    tuning: Mutex<Tuning>,
}

impl SpeechServer {
    /// Wrap a driver, deriving the initial unit tuning from the same
    /// configuration the driver was built with.
    #[must_use]
    pub fn new(driver: Arc<SpeechDriver>, config: &DriverConfig) -> Self {
        Self {
            driver,
            tuning: Mutex::new(Tuning {
                rate: unit_for(config.min_rate, config.max_rate, config.rate),
                pitch: unit_for(config.min_pitch, config.max_pitch, config.pitch),
            }),
        }
    }

    /// Queue text behind whatever is already pending.
    pub fn speak(&self, text: impl Into<String>) {
        self.driver.speak(text, true);
    }

    /// Interrupt current and pending speech, then speak this text.
    pub fn speak_immediately(&self, text: impl Into<String>) {
        self.driver.speak(text, false);
    }

    /// Speak a single character.
    pub fn speak_character(&self, character: char) {
        self.driver.speak(character.to_string(), true);
    }

    /// Speak a list of utterances in order.
    ///
    /// With `interrupt` the first utterance preempts anything already
    /// playing or pending; the remainder queue FIFO behind it.
    pub fn speak_utterances<I, S>(&self, utterances: I, interrupt: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queueable = !interrupt;
        for utterance in utterances {
            self.driver.speak(utterance, queueable);
            queueable = true;
        }
    }

    /// Nudge the speech rate up by `step` on the unit scale.
    ///
    /// The tracked unit value is clamped to `[0, 1]`; clamping is facade
    /// policy, the underlying driver setter stays unclamped.
    pub fn increase_speech_rate(&self, step: f64) {
        self.adjust(|t| t.rate += step);
    }

    /// Nudge the speech rate down by `step` on the unit scale.
    pub fn decrease_speech_rate(&self, step: f64) {
        self.adjust(|t| t.rate -= step);
    }

    /// Nudge the pitch up by `step` on the unit scale.
    pub fn increase_speech_pitch(&self, step: f64) {
        self.adjust(|t| t.pitch += step);
    }

    /// Nudge the pitch down by `step` on the unit scale.
    pub fn decrease_speech_pitch(&self, step: f64) {
        self.adjust(|t| t.pitch -= step);
    }

    fn adjust(&self, apply: impl FnOnce(&mut Tuning)) {
        let mut tuning = self.tuning.lock().expect("tuning lock poisoned");
        apply(&mut tuning);
        tuning.rate = tuning.rate.clamp(0.0, 1.0);
        tuning.pitch = tuning.pitch.clamp(0.0, 1.0);
        self.driver.set_rate(tuning.rate);
        self.driver.set_pitch(tuning.pitch);
    }

    /// Stop ongoing speech and flush the queue.
    pub fn stop(&self) {
        self.driver.cancel();
    }

    /// Whether speech is currently being rendered.
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.driver.is_speaking()
    }

    /// Voice families this driver can describe.
    ///
    /// A generic command-line driver cannot enumerate the synthesizer's
    /// catalogue, so this is the configured voice only.
    #[must_use]
    pub fn voice_families(&self) -> Vec<VoiceFamily> {
        let settings = self.driver.current_settings();
        vec![VoiceFamily {
            name: settings.voice,
            gender: None,
            locale: if settings.language.is_empty() {
                None
            } else {
                Some(settings.language)
            },
            dialect: None,
        }]
    }

    /// Shut the underlying driver down.
    pub async fn shutdown(&self) {
        self.driver.shutdown().await;
    }

    /// The wrapped driver.
    #[must_use]
    pub fn driver(&self) -> &Arc<SpeechDriver> {
        &self.driver
    }
}

/// Invert the linear scale: which unit value produces `value` in
/// `[min, max]`. Degenerate ranges pin to the midpoint.
fn unit_for(min: f64, max: f64, value: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_for_inverts_the_scale() {
        assert!((unit_for(0.0, 200.0, 100.0) - 0.5).abs() < f64::EPSILON);
        assert!((unit_for(80.0, 450.0, 80.0)).abs() < f64::EPSILON);
        assert!((unit_for(80.0, 450.0, 450.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unit_for_handles_degenerate_ranges() {
        assert!((unit_for(100.0, 100.0, 100.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn voice_family_serializes_gender_lowercase() {
        let family = VoiceFamily {
            name: "en-us".into(),
            gender: Some(VoiceGender::Female),
            locale: None,
            dialect: None,
        };
        let json = serde_json::to_string(&family).unwrap();
        assert!(json.contains(r#""gender":"female""#));
    }
}
