//! CLI entry point.

mod bootstrap;
mod parser;

use clap::Parser;

use outloud_core::CommandTemplate;

use crate::bootstrap::{CliContext, bootstrap};
use crate::parser::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.command.is_none() {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    }

    let ctx = bootstrap(cli.config.as_deref())?;
    apply_overrides(&ctx, &cli);

    let command = cli.command.expect("presence checked above");
    match command {
        Commands::Say { text } => {
            for utterance in text {
                ctx.driver.speak(utterance, true);
            }
            ctx.driver.finish().await;
        }
        Commands::Pipe => {
            use tokio::io::{AsyncBufReadExt, BufReader};

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                ctx.driver.speak(line, true);
            }
            ctx.driver.finish().await;
        }
        Commands::Render { text } => {
            ctx.driver.shutdown().await;
            let template = CommandTemplate::parse(ctx.config.command_or_default())?;
            let utterance = ctx.driver.current_settings().snapshot(text);
            for word in template.render(&utterance) {
                println!("{word}");
            }
        }
    }

    Ok(())
}

fn apply_overrides(ctx: &CliContext, cli: &Cli) {
    if let Some(volume) = cli.volume {
        ctx.driver.set_volume(volume);
    }
    if let Some(rate) = cli.rate {
        ctx.driver.set_rate(rate);
    }
    if let Some(pitch) = cli.pitch {
        ctx.driver.set_pitch(pitch);
    }
    if let Some(voice) = &cli.voice {
        ctx.driver.set_voice(voice.clone());
    }
}
