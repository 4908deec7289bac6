//! Voice settings and the linear parameter scale.

use serde::{Deserialize, Serialize};

use crate::utterance::Utterance;

/// Configured `[min, max]` range for one numeric voice parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a caller-supplied unit value onto this range.
    ///
    /// The mapping is `min + unit * (max - min)` and is intentionally not
    /// clamped: a unit value outside `[0, 1]` extrapolates outside the
    /// configured range.
    #[must_use]
    pub fn apply(&self, unit: f64) -> f64 {
        self.min + unit * (self.max - self.min)
    }

    /// Map a unit value and render it for command substitution.
    #[must_use]
    pub fn apply_str(&self, unit: f64) -> String {
        format_scaled(self.apply(unit))
    }
}

/// Render a mapped parameter value for the synthesizer command line.
///
/// Integral results drop the trailing fraction so integer-only flags
/// (espeak `-a`, `-s`, `-p`) receive clean values; fractional results keep
/// their fraction.
#[must_use]
pub fn format_scaled(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "integral check guarantees the value fits the cast"
        )]
        let integral = value as i64;
        format!("{integral}")
    } else {
        format!("{value}")
    }
}

/// Current voice parameters, mutated only by explicit setter calls.
///
/// Numeric parameters are stored already mapped and stringified, the way
/// the synthesizer command will receive them. [`snapshot`](Self::snapshot)
/// clones the whole set into an [`Utterance`], so queued speech never
/// observes later changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoiceSettings {
    pub volume: String,
    pub rate: String,
    pub pitch: String,
    pub voice: String,
    pub language: String,
    pub module: String,
}

impl VoiceSettings {
    /// Copy the current settings into an utterance for the given text.
    #[must_use]
    pub fn snapshot(&self, text: impl Into<String>) -> Utterance {
        Utterance {
            text: text.into(),
            volume: self.volume.clone(),
            rate: self.rate.clone(),
            pitch: self.pitch.clone(),
            voice: self.voice.clone(),
            language: self.language.clone(),
            module: self.module.clone(),
        }
    }
}
