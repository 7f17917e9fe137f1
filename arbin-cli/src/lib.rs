//! Library side of the `arbin-disasm` binary

use anyhow::{Context, Result};
use arbin_runtime::{TraceConfig, Tracer, WriterSink};
use arbin_spec::Container;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arbin-disasm", version)]
#[command(about = "Trace the bytecode of an ARBI container")]
pub struct Cli {
    /// Path to the container file
    pub path: PathBuf,
}

/// Read the container at `path` and write its trace to `out`
pub fn run(path: &Path, out: impl Write) -> Result<usize> {
    let container = Container::read(path)
        .with_context(|| format!("failed to load container {}", path.display()))?;
    tracing::info!(path = %path.display(), words = container.code().len(), "container loaded");

    let report = Tracer::new(&container, WriterSink::new(out), TraceConfig::default())
        .run()
        .with_context(|| format!("failed to decode {}", path.display()))?;

    Ok(report.instructions)
}
