//! # ARBI Container Specification
//!
//! Binary container format for register-based bytecode.
//!
//! ## Layout
//! - 36-byte header (magic, version, register count, section sizes)
//! - Constant pool: raw bytes addressed by `(offset, length)` pairs
//! - Bytecode: a flat stream of little-endian 64-bit words
//!
//! Instructions are not pre-segmented in the word stream. An opcode tag word is
//! followed by a fixed number of operand words known from the opcode alone.

pub mod error;
pub mod opcode;
pub mod value;
pub mod instruction;
pub mod constants;
pub mod container;
pub mod builder;

pub use error::{ArbinError, ErrorKind, Result};
pub use opcode::{Opcode, TypeTag};
pub use value::Value;
pub use instruction::{ConstRef, Instruction, Reg};
pub use constants::ConstantPool;
pub use container::{Container, Header};
pub use builder::ContainerBuilder;

/// Magic tag at the start of every container: "ARBI"
pub const MAGIC: [u8; 4] = *b"ARBI";

/// Container version written by [`ContainerBuilder`]
pub const VERSION: u64 = 1;

/// Size of one bytecode word in bytes
pub const WORD_SIZE: usize = 8;

/// Bytecode word type
pub type Word = u64;
