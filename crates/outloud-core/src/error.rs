//! Driver error types.

use std::path::PathBuf;

/// Errors that can occur while configuring or constructing the driver.
///
/// Nothing in the playback path itself surfaces an error to the caller:
/// once the driver is running, failed utterances are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The command template resolves to zero words.
    #[error("speech command template is empty")]
    EmptyTemplate,

    /// The command template could not be tokenized (unbalanced quoting).
    #[error("speech command template could not be tokenized: {0}")]
    InvalidTemplate(String),

    /// Failed to read a configuration file.
    #[error("failed to read configuration from {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a configuration file.
    #[error("failed to parse configuration from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
