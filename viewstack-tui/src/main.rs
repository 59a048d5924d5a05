use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use viewstack_tui::{App, ConfigLoader, data_dir, install_panic_hook};

#[derive(Parser)]
#[command(name = "viewstack", about = "Navigate a stack of views in the terminal")]
#[command(version)]
struct Cli {
    /// Config file layered over the user and project config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to open first, overriding the config
    #[arg(short, long)]
    start: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Where to write logs (defaults to the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs go to a file.
    let log_path = match cli.log_file {
        Some(path) => path,
        None => {
            let dir = data_dir();
            fs::create_dir_all(&dir)
                .with_context(|| format!("creating data directory {}", dir.display()))?;
            dir.join("viewstack.log")
        }
    };
    let log_file = File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(start) = cli.start {
        config.start_view = start;
    }
    tracing::info!(start = %config.start_view, "Starting viewstack");

    install_panic_hook();

    let mut app = App::new(&config)?;
    app.run().await?;

    Ok(())
}
