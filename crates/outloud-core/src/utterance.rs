//! The utterance value type and the queue item it travels in.

use serde::{Deserialize, Serialize};

/// One unit of text plus the voice parameters it should be rendered with.
///
/// An utterance is a snapshot: it is built from the driver's settings at
/// `speak()` time and never observes later setter calls. The numeric
/// parameters are already mapped and stringified, ready for template
/// substitution.
///
/// Any field other than `text` may be empty; the renderer substitutes the
/// empty string. Utterances with empty `text` are accepted into the queue
/// and dropped by the worker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Utterance {
    /// Text to synthesize.
    pub text: String,

    /// Mapped volume, stringified.
    pub volume: String,

    /// Mapped speech rate, stringified.
    pub rate: String,

    /// Mapped pitch, stringified.
    pub pitch: String,

    /// Synthesizer voice identifier, passed through verbatim.
    pub voice: String,

    /// Language identifier, passed through verbatim.
    pub language: String,

    /// Synthesizer output module, passed through verbatim.
    pub module: String,
}

impl Utterance {
    /// Create an utterance carrying only text, all parameters empty.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Whether the worker should render this utterance at all.
    #[must_use]
    pub fn is_speakable(&self) -> bool {
        !self.text.is_empty()
    }
}

/// An entry in the utterance queue.
///
/// `Shutdown` is the control sentinel: the worker exits its loop when it
/// dequeues one. There is deliberately no catch-all variant; anything that
/// is not speech or shutdown cannot be enqueued in the first place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueueItem {
    /// An utterance to render.
    Speak(Utterance),

    /// Terminate the worker loop.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_leaves_parameters_empty() {
        let utterance = Utterance::from_text("hello");
        assert_eq!(utterance.text, "hello");
        assert_eq!(utterance.volume, "");
        assert_eq!(utterance.voice, "");
    }

    #[test]
    fn empty_text_is_not_speakable() {
        assert!(!Utterance::from_text("").is_speakable());
        assert!(Utterance::from_text("hi").is_speakable());
    }

    #[test]
    fn missing_fields_deserialize_to_empty_strings() {
        let utterance: Utterance = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(utterance.text, "hi");
        assert_eq!(utterance.rate, "");
        assert_eq!(utterance.module, "");
    }
}
