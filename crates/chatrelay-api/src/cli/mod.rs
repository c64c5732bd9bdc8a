//! Command-line flags for the `chatrelay` binary.
//!
//! The binary only serves HTTP, so there are no subcommands; flags tune
//! logging and override the bind address from configuration.

use std::path::PathBuf;

use clap::Parser;

/// Chat relay server: persists chat sessions and forwards messages to a
/// workflow webhook.
#[derive(Parser, Debug)]
#[command(name = "chatrelay", version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = chatrelay_infra::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Bind host (overrides config and CHATRELAY_HOST).
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides config and CHATRELAY_PORT).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Suppress all log output except errors.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long)]
    pub otel: bool,
}
