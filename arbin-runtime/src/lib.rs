//! # ARBI Runtime
//!
//! Walk ARBI bytecode with a register file, the way an interpreter's
//! fetch-decode loop would, and report every step to a [`TraceSink`].
//!
//! ## Features
//!
//! - **Register file**: sized by the container header, null-initialised
//! - **Fail fast**: the first decode or range error ends the run
//! - **Pluggable sinks**: text output, in-memory recording, or your own
//!
//! ## Example
//!
//! ```rust
//! use arbin_runtime::{Tracer, TraceConfig, RecordingSink};
//! use arbin_spec::{ContainerBuilder, Value};
//!
//! let mut builder = ContainerBuilder::new();
//! builder.load_string(0, "hi").declare("greeting", 0);
//! let container = builder.build().unwrap();
//!
//! let report = Tracer::new(&container, RecordingSink::new(), TraceConfig::default())
//!     .run()
//!     .unwrap();
//! assert_eq!(report.registers[0], Value::from("hi"));
//! ```

pub mod error;
pub mod registers;
pub mod sink;
pub mod tracer;

pub use error::{Result, RuntimeError};
pub use registers::RegisterFile;
pub use sink::{RecordingSink, Resolved, TraceRecord, TraceSink, WriterSink};
pub use tracer::{TraceConfig, TraceReport, Tracer};

use arbin_spec::Container;
use std::io::Write;

/// Simple trace helper
///
/// Parses `bytes`, runs the trace with default configuration and writes the
/// text trace to `out`. Returns the number of instructions executed.
pub fn trace<W: Write>(bytes: &[u8], out: W) -> Result<usize> {
    let container = Container::from_bytes(bytes)?;
    tracing::info!(
        registers = container.header().register_count,
        constants = container.header().constants_size,
        words = container.header().bytecode_word_count,
        "container loaded"
    );

    let report = Tracer::new(&container, WriterSink::new(out), TraceConfig::default()).run()?;
    Ok(report.instructions)
}
