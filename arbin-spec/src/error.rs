//! # Error Types for the ARBI container format

use thiserror::Error;

/// Broad category of a failure, shared by every crate in the workspace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad magic, truncated header, or truncated section
    Format,
    /// Constant slice or register index outside declared bounds
    Range,
    /// Leading instruction word is not a known opcode
    UnknownOpcode,
    /// LOAD_CONST type tag is not a known type
    UnknownTypeTag,
    /// Opcode is known but has no defined operand layout
    Unsupported,
    /// Failure of the underlying byte source or output stream
    Io,
}

#[derive(Debug, Error)]
pub enum ArbinError {
    // Container format errors
    #[error("Invalid container magic: expected \"ARBI\", got {0:?}")]
    InvalidMagic([u8; 4]),

    #[error("Truncated header: expected {expected} bytes, found {found} bytes")]
    TruncatedHeader { expected: usize, found: usize },

    #[error("Truncated constant pool: expected {expected} bytes, found {found} bytes")]
    TruncatedConstants { expected: u64, found: usize },

    #[error("Truncated bytecode: expected {expected} words, found {found} bytes")]
    TruncatedBytecode { expected: u64, found: usize },

    #[error("Section size does not fit in memory: {section} declares {size}")]
    SectionTooLarge { section: &'static str, size: u64 },

    #[error("Section size mismatch: header declares {declared} for {section}, found {found}")]
    SectionMismatch {
        section: &'static str,
        declared: u64,
        found: usize,
    },

    #[error("Invalid UTF-8 in constant at offset {offset} (length {length})")]
    InvalidUtf8 { offset: u64, length: u64 },

    // Range errors
    #[error("Constant slice out of range: offset {offset} + length {length} exceeds pool size {size}")]
    ConstantOutOfRange { offset: u64, length: u64, size: usize },

    // I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ArbinError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArbinError::InvalidMagic(_)
            | ArbinError::TruncatedHeader { .. }
            | ArbinError::TruncatedConstants { .. }
            | ArbinError::TruncatedBytecode { .. }
            | ArbinError::SectionTooLarge { .. }
            | ArbinError::SectionMismatch { .. }
            | ArbinError::InvalidUtf8 { .. } => ErrorKind::Format,
            ArbinError::ConstantOutOfRange { .. } => ErrorKind::Range,
            ArbinError::IoError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, ArbinError>;
