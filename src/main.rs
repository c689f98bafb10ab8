use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use herald_gateway::{Config, Daemon};

/// Herald - chat-to-speech gateway for live broadcast channels
#[derive(Parser)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Initial speech output state
    #[arg(long, value_parser = ["on", "off"], default_value = "on")]
    tts: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,herald_gateway=info",
        1 => "info,herald_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let tts_enabled = cli.tts == "on";
    tracing::info!(tts = tts_enabled, "starting herald gateway");

    let config = Config::load(tts_enabled);
    tracing::debug!(?config, "loaded configuration");

    let daemon = Daemon::new(config)?;
    daemon.run().await?;

    Ok(())
}
