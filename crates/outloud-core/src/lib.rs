//! Core domain types and port definitions for outloud.
//!
//! outloud plays speech by handing each utterance to an external
//! command-line synthesizer, one child process at a time. This crate holds
//! everything the driver needs that is not infrastructure: the utterance
//! value type, voice settings and their scale mapping, the command
//! template renderer, the configuration surface, and the process ports the
//! driver is composed against.

pub mod config;
pub mod error;
pub mod ports;
pub mod settings;
pub mod template;
pub mod utterance;

// Re-export key types for convenience
pub use config::DriverConfig;
pub use error::SpeechError;
pub use ports::{ProcessControl, SynthChild, SynthSpawner};
pub use settings::{ScaleBounds, VoiceSettings};
pub use template::CommandTemplate;
pub use utterance::{QueueItem, Utterance};
