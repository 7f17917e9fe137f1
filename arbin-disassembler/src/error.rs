//! Disassembler errors

use arbin_spec::{ErrorKind, Opcode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Unknown opcode {tag:#x} at word {at}")]
    UnknownOpcode { tag: u64, at: usize },

    #[error("Unknown type tag {tag:#x} at word {at}")]
    UnknownTypeTag { tag: u64, at: usize },

    #[error("Unsupported opcode {opcode} at word {at}: no operand layout defined")]
    UnsupportedOpcode { opcode: Opcode, at: usize },

    #[error("Truncated {opcode} at word {at}: needs {needed} operand words, {available} left")]
    TruncatedInstruction {
        opcode: Opcode,
        at: usize,
        needed: usize,
        available: usize,
    },

    #[error("Decode cursor {at} is past the end of the bytecode ({len} words)")]
    CursorOutOfRange { at: usize, len: usize },
}

impl DisassemblerError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DisassemblerError::UnknownOpcode { .. } => ErrorKind::UnknownOpcode,
            DisassemblerError::UnknownTypeTag { .. } => ErrorKind::UnknownTypeTag,
            DisassemblerError::UnsupportedOpcode { .. } => ErrorKind::Unsupported,
            DisassemblerError::TruncatedInstruction { .. }
            | DisassemblerError::CursorOutOfRange { .. } => ErrorKind::Format,
        }
    }
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
