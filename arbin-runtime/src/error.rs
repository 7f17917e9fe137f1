//! Runtime error types

use arbin_disassembler::DisassemblerError;
use arbin_spec::{ArbinError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Container error: {0}")]
    SpecError(#[from] ArbinError),

    #[error("Decode error: {0}")]
    DecodeError(#[from] DisassemblerError),

    #[error("Register index out of range: r{index} (register count {count})")]
    RegisterOutOfRange { index: u64, count: u64 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RuntimeError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::SpecError(e) => e.kind(),
            RuntimeError::DecodeError(e) => e.kind(),
            RuntimeError::RegisterOutOfRange { .. } => ErrorKind::Range,
            RuntimeError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
