//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for the outloud speech driver.
#[derive(Parser)]
#[command(name = "outloud")]
#[command(about = "Speak text through an external command-line synthesizer")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON driver configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Volume on the unit scale (0.0 = configured minimum, 1.0 = maximum)
    #[arg(long, global = true)]
    pub volume: Option<f64>,

    /// Speech rate on the unit scale
    #[arg(long, global = true)]
    pub rate: Option<f64>,

    /// Pitch on the unit scale
    #[arg(long, global = true)]
    pub pitch: Option<f64>,

    /// Synthesizer voice identifier
    #[arg(long, global = true)]
    pub voice: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Speak the given text, then exit once playback completes
    Say {
        /// Text to speak; multiple arguments queue in order
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Read lines from stdin and speak each in turn
    Pipe,

    /// Print the argv the configured template renders for the given text
    Render {
        /// Sample text to substitute
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_args_parse() {
        let cli = Cli::parse_from(["outloud", "--rate", "0.8", "say", "hello", "world"]);
        assert_eq!(cli.rate, Some(0.8));
        assert!(matches!(cli.command, Some(Commands::Say { text }) if text.len() == 2));
    }
}
