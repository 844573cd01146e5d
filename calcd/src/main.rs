//! # Calculator Host
//!
//! Main entry point: runs a script, or reads input lines from stdin.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use calc_core::Mode;
use calcd::{load_settings, HostRuntime, HostRuntimeConfig, HostRuntimeError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "calcd", version, about = "Keypad calculator host")]
struct Args {
    /// Settings overrides file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Start mode: basic or scientific
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Display width in characters
    #[arg(short, long)]
    width: Option<usize>,

    /// Input script file; stdin is read when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Maximum inputs to process (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_steps: usize,

    /// Log filter, e.g. `info` or `calcd=debug` (defaults to RUST_LOG, then `warn`)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_mode(name: &str) -> Result<Mode, String> {
    Mode::from_name(name).ok_or_else(|| format!("Invalid mode: {}", name))
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_level.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(level: Option<&str>) -> Result<(), String> {
    let filter = match level {
        Some(level) => {
            EnvFilter::try_new(level).map_err(|e| format!("Invalid log level: {}", e))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn run(args: Args) -> Result<(), HostRuntimeError> {
    let settings = load_settings(args.settings.as_deref(), args.mode, args.width)?;
    let script = args.script.as_ref().map(fs::read_to_string).transpose()?;
    let interactive = script.is_none();

    let config = HostRuntimeConfig {
        settings,
        script,
        max_steps: args.max_steps,
    };
    let mut runtime = HostRuntime::new(config, io::stdout().lock())?;

    if interactive {
        runtime.run_interactive(io::stdin().lock())
    } else {
        runtime.run()
    }
}
