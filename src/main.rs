use clap::Parser;
use marsview::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "marsview", about = "Browse Mars real-estate listings in the terminal")]
struct Args {
    /// Base URL of the listings API
    #[arg(short, long)]
    base_url: Option<String>,

    /// Cards per grid row (1-6)
    #[arg(short, long)]
    columns: Option<u16>,

    /// Fetch timeout in seconds (0 disables it)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Log file path (overrides the config file)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::MarsConfig::default(), Some(e)),
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        grid_columns: args.columns,
        timeout_secs: args.timeout_secs,
    };
    let mut resolved = config::resolve(&file_config, &cli);
    if let Some(log_file) = args.log_file {
        resolved.log_file = log_file;
    }

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("marsview: ignoring config file: {e}");
    }

    log::info!(
        "marsview starting up: base_url={}, columns={}, timeout={:?}",
        resolved.base_url,
        resolved.grid_columns,
        resolved.fetch_timeout
    );

    marsview::tui::run(resolved)
}
