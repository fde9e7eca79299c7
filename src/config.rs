#![cfg(feature = "web")]
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const MAX_SESSION_HOURS: u64 = 10 * 365 * 24;

/// Runtime settings of the dashboard server.
///
/// Every option can also be supplied through its environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "dashboard", about = "Crop recommendation dataset dashboard")]
pub struct Config {
    /// CSV file with the N, P, K, temperature, humidity, ph, rainfall and label columns
    #[arg(long, env = "CROP_DATA", default_value = "data/Crop_recommendation.csv")]
    pub data: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "CROP_BIND", default_value = "127.0.0.1:8050")]
    pub bind: SocketAddr,

    /// Directory served under /static
    #[arg(long, env = "CROP_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Lifetime of a login session, in hours (at most ten years)
    #[arg(
        long,
        env = "CROP_SESSION_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u64).range(1..=MAX_SESSION_HOURS)
    )]
    pub session_hours: u64,

    /// Account created at startup, as NAME:PASSWORD (repeatable)
    #[arg(long = "user", value_name = "NAME:PASSWORD", value_parser = parse_account)]
    pub users: Vec<(String, String)>,
}

impl Config {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_hours * 60 * 60)
    }
}

fn parse_account(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((name, password)) if !name.is_empty() && !password.is_empty() => {
            Ok((name.to_string(), password.to_string()))
        }
        _ => Err(format!("expected NAME:PASSWORD, got '{raw}'")),
    }
}
