use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use siptap::logging::{log_welcome, parse_log_level, setup_logging, LoggingConfig};
use siptap::{Config, DEFAULT_CONFIG_PATH};
use siptap_capture::{format_devices, list_devices};

#[derive(Parser, Debug)]
#[command(name = "siptap")]
#[command(version, about = "Passive SIP telemetry tap forwarding one JSON record per message to an HTTP collector")]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print capture devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Echo raw frames and records, as `Debug = true` does
    #[arg(short, long)]
    debug: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Include source file and line in log lines
    #[arg(long)]
    log_source: bool,
}

fn print_devices() {
    match list_devices() {
        Ok(devices) => print!("{}", format_devices(&devices)),
        Err(e) => error!("{}", e),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.list_devices {
        print_devices();
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load(&args.config);
    let debug_echo = args.debug || config.as_ref().map(|c| c.debug).unwrap_or(false);

    let mut logging = LoggingConfig::new(parse_log_level(&args.log_level)?);
    if args.json_logs {
        logging = logging.with_json();
    }
    if args.log_source {
        logging = logging.with_file_info();
    }
    if debug_echo {
        logging = logging.with_debug_echo();
    }
    setup_logging(&logging)?;
    log_welcome("siptap", env!("CARGO_PKG_VERSION"));

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Wrong configuration: {}", e);
            print_devices();
            return Ok(ExitCode::FAILURE);
        }
    };
    config.debug = debug_echo;

    let shutdown = Arc::new(AtomicBool::new(false));
    let signal_flag = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C, shutting down");
                signal_flag.store(true, Ordering::SeqCst);
            }
            Err(e) => warn!("Could not listen for Ctrl-C: {}", e),
        }
    });

    match siptap::run(&config, shutdown).await {
        Ok(summary) => {
            info!(
                "Done: {} records produced, {} delivered, {} failed",
                summary.pipeline.records_produced, summary.forwarding.delivered, summary.forwarding.failed
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(siptap::Error::Capture(e)) => {
            error!("{}", e);
            print_devices();
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
