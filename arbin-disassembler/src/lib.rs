//! # ARBI Disassembler
//!
//! Decode ARBI bytecode words into instructions and render them as text.
//!
//! ## Example
//!
//! ```rust
//! use arbin_spec::ContainerBuilder;
//! use arbin_disassembler::disassemble;
//!
//! let mut builder = ContainerBuilder::new();
//! builder.load_string(0, "hi").load_null(1);
//! let container = builder.build().unwrap();
//!
//! let asm = disassemble(&container).unwrap();
//! assert!(asm.contains("load_null r1"));
//! ```

pub mod error;
pub mod decoder;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use decoder::{decode, step, Decoder};
pub use disassembler::disassemble;
pub use formatter::format;
