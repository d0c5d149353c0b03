mod bridge;
mod exit;
mod logging;

use clap::Parser;

use crate::bridge::BridgeArgs;
use crate::logging::{init_logging, LogFormat, LogLevel};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FCGIBRIDGE_BUILD_TARGET"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "fcgibridge",
    version,
    long_version = LONG_VERSION,
    about = "Relay FastCGI records between stdin/stdout and a TCP peer"
)]
struct Cli {
    #[command(flatten)]
    bridge: BridgeArgs,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match bridge::run(&cli.bridge) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
