#![cfg(not(tarpaulin_include))]

use clap::Parser;
use cropdash::app;
use cropdash::config::Config;
use log::error;
use std::process::ExitCode;

/// Main entry point for the dashboard server
///
/// Initializes logging (`RUST_LOG` overrides the default `info` level),
/// parses the configuration and serves until shut down. A dataset that
/// cannot be loaded ends the process with a failure code.
#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    match app::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
