//! # Catalog Browser Main Entry Point
//!
//! Reads commands from standard input and prints results to standard output.
//! Logs go to standard error.

use anyhow::Result;
use catalog_browser::cmd_args::CommandLineArgs;
use catalog_browser::config::{self, AppConfig};
use catalog_browser::{AppController, StdinEventSource};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Dependencies that are too chatty below `warn`
const QUIET_CRATES: &[&str] = &["reqwest", "hyper", "hyper_util", "rustls", "tokio"];

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    let app_config = AppConfig::from_args(&cmd_args);
    tracing::info!(
        "Using catalog at {} (debounce {:?}, status {})",
        app_config.base_url,
        app_config.debounce,
        app_config.initial_status
    );

    let mut app = AppController::new(&app_config, StdinEventSource::new(), std::io::stdout());
    app.run().await
}

fn build_env_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Invalid log level {level:?} ({e}), falling back to warn");
        EnvFilter::new("warn")
    });
    for krate in QUIET_CRATES {
        if let Ok(directive) = format!("{krate}=warn").parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn init_tracing_subscriber(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(&config::get_log_level(verbose)))
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
}
