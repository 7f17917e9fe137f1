//! # ARBI Opcode and Type Tag Definitions
//!
//! Opcodes and type tags occupy two independent wire-value spaces. Every value
//! below is fixed by the container format and must never be renumbered; adding a
//! variant means picking an unused value explicitly.
//!
//! ## Opcodes
//! - 254: LOAD_CONST
//! - 255: DECLARE
//! - 256: LOAD_NULL
//! - 257: JUMP (reserved, no operand layout yet)
//!
//! ## Type Tags
//! - 254: STRING
//! - 255: NUMBER

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction opcode (the leading word of every instruction)
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// LOAD_CONST: rd = typed constant from the pool
    LoadConst = 254,
    /// DECLARE: bind a pool name to the value of a register
    Declare = 255,
    /// LOAD_NULL: rd = null
    LoadNull = 256,
    /// JUMP: control transfer (operand layout undefined)
    Jump = 257,
}

impl Opcode {
    /// All opcodes, in wire-value order
    pub const ALL: [Opcode; 4] = [
        Opcode::LoadConst,
        Opcode::Declare,
        Opcode::LoadNull,
        Opcode::Jump,
    ];

    /// Try to convert from a bytecode word
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            254 => Some(Opcode::LoadConst),
            255 => Some(Opcode::Declare),
            256 => Some(Opcode::LoadNull),
            257 => Some(Opcode::Jump),
            _ => None,
        }
    }

    /// Convert to a bytecode word
    #[inline]
    pub const fn to_u64(self) -> u64 {
        self as u64
    }

    /// Number of operand words following the opcode word.
    ///
    /// `None` when the opcode has no defined layout and cannot be decoded.
    #[inline]
    pub const fn operand_words(self) -> Option<usize> {
        match self {
            Opcode::LoadConst => Some(4),
            Opcode::Declare => Some(3),
            Opcode::LoadNull => Some(1),
            Opcode::Jump => None,
        }
    }

    /// Wire name used in trace output
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::LoadConst => "OP_LOAD_CONST",
            Opcode::Declare => "OP_DECLARE",
            Opcode::LoadNull => "OP_LOAD_NULL",
            Opcode::Jump => "OP_JUMP",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::LoadConst => "load_const",
            Opcode::Declare => "declare",
            Opcode::LoadNull => "load_null",
            Opcode::Jump => "jump",
        };
        write!(f, "{}", name)
    }
}

/// Semantic type of a constant-pool slice
#[repr(u64)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// UTF-8 text
    String = 254,
    /// Decimal number literal stored as UTF-8 text
    Number = 255,
}

impl TypeTag {
    /// All type tags, in wire-value order
    pub const ALL: [TypeTag; 2] = [TypeTag::String, TypeTag::Number];

    /// Try to convert from a bytecode word
    pub fn from_u64(value: u64) -> Option<Self> {
        match value {
            254 => Some(TypeTag::String),
            255 => Some(TypeTag::Number),
            _ => None,
        }
    }

    /// Convert to a bytecode word
    #[inline]
    pub const fn to_u64(self) -> u64 {
        self as u64
    }

    /// Wire name used in trace output
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::String => "TYPE_OP_STRING",
            TypeTag::Number => "TYPE_OP_NUMBER",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::String => write!(f, "string"),
            TypeTag::Number => write!(f, "number"),
        }
    }
}
