//! The outloud speech driver.
//!
//! A single background worker drains an utterance queue and renders each
//! entry by spawning the configured external synthesizer, one child
//! process at a time. Callers push speech, change voice parameters, and
//! interrupt playback concurrently; none of those operations block on the
//! synthesizer.
//!
//! ```no_run
//! use std::sync::Arc;
//! use outloud_core::DriverConfig;
//! use outloud_driver::{CommandSpawner, SpeechDriver};
//!
//! # #[tokio::main] async fn main() -> Result<(), outloud_core::SpeechError> {
//! let driver = SpeechDriver::new(&DriverConfig::default(), Arc::new(CommandSpawner))?;
//! driver.speak("hello world", true);
//! driver.finish().await;
//! # Ok(()) }
//! ```

pub mod driver;
pub mod queue;
pub mod server;
pub mod spawner;
mod worker;

// Re-export key types for convenience
pub use driver::{SpeechCallback, SpeechDriver};
pub use queue::UtteranceQueue;
pub use server::{SpeechServer, VoiceFamily, VoiceGender};
pub use spawner::CommandSpawner;
