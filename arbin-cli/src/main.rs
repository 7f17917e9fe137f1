//! ARBI disassembler
//!
//! Prints the decode trace of a container to stdout. Logging goes to stderr and
//! is controlled with `RUST_LOG`.

use arbin_cli::{run, Cli};
use clap::Parser;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    match run(&cli.path, BufWriter::new(stdout.lock())) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
