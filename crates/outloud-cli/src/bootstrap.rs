//! CLI bootstrap - the composition root.
//!
//! The only place infrastructure is wired together: configuration is
//! loaded here and the driver is composed with the real child-process
//! spawner. Command handlers receive the context and delegate to it.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use outloud_core::DriverConfig;
use outloud_driver::{CommandSpawner, SpeechDriver};

/// Fully composed context for command dispatch.
pub struct CliContext {
    pub driver: Arc<SpeechDriver>,
    pub config: DriverConfig,
}

/// Load configuration (file if given, defaults otherwise) and start the
/// driver.
pub fn bootstrap(config_path: Option<&Path>) -> Result<CliContext> {
    let config = match config_path {
        Some(path) => DriverConfig::from_json_file(path)?,
        None => DriverConfig::default(),
    };

    let driver = Arc::new(SpeechDriver::new(&config, Arc::new(CommandSpawner))?);

    Ok(CliContext { driver, config })
}
