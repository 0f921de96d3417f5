//! Searchbuddy TUI entry point.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use clap::Parser;
use searchbuddy_tui::{Args, Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    tracing::info!(server = %args.server, "Searchbuddy starting");

    let driver = TerminalDriver::new(&args.server)?;
    let mut runtime = Runtime::new(driver, args.search);
    runtime.run().await?;

    tracing::info!("Searchbuddy exiting");
    Ok(())
}

fn init_logging(path: &Path, level: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
