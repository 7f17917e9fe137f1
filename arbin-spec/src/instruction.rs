//! # Decoded Instructions
//!
//! An [`Instruction`] is one opcode word plus its operand words, with the type tag
//! already checked. Register indices and constant references are kept as raw
//! words here; bounds are checked against the register file and constant pool
//! when the instruction is executed.

use crate::opcode::{Opcode, TypeTag};
use crate::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Register index operand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reg(pub u64);

impl Reg {
    /// Raw register index
    #[inline]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Reference to a constant-pool span
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstRef {
    pub offset: u64,
    pub length: u64,
}

impl ConstRef {
    pub const fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// One past the last byte, or `None` on overflow
    #[inline]
    pub fn end(self) -> Option<u64> {
        self.offset.checked_add(self.length)
    }
}

impl fmt::Display for ConstRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}+{}]", self.offset, self.length)
    }
}

/// A decoded instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// Wire layout: `dest, type_tag, const_length, const_offset`
    LoadConst {
        dest: Reg,
        type_tag: TypeTag,
        constant: ConstRef,
    },
    /// Wire layout: `name_length, name_offset, source`
    Declare { name: ConstRef, source: Reg },
    /// Wire layout: `dest`
    LoadNull { dest: Reg },
}

impl Instruction {
    /// Opcode of this instruction
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::LoadConst { .. } => Opcode::LoadConst,
            Instruction::Declare { .. } => Opcode::Declare,
            Instruction::LoadNull { .. } => Opcode::LoadNull,
        }
    }

    /// Total width in words, including the opcode word
    pub const fn width(&self) -> usize {
        match self {
            Instruction::LoadConst { .. } => 5,
            Instruction::Declare { .. } => 4,
            Instruction::LoadNull { .. } => 2,
        }
    }

    /// Destination register, if the instruction writes one
    pub const fn dest(&self) -> Option<Reg> {
        match self {
            Instruction::LoadConst { dest, .. } | Instruction::LoadNull { dest } => Some(*dest),
            Instruction::Declare { .. } => None,
        }
    }

    /// Append the wire words of this instruction
    pub fn encode(&self, out: &mut Vec<Word>) {
        out.push(self.opcode().to_u64());
        match *self {
            Instruction::LoadConst {
                dest,
                type_tag,
                constant,
            } => {
                out.extend_from_slice(&[
                    dest.0,
                    type_tag.to_u64(),
                    constant.length,
                    constant.offset,
                ]);
            }
            Instruction::Declare { name, source } => {
                out.extend_from_slice(&[name.length, name.offset, source.0]);
            }
            Instruction::LoadNull { dest } => out.push(dest.0),
        }
    }

    /// Wire words of this instruction
    pub fn to_words(&self) -> Vec<Word> {
        let mut words = Vec::with_capacity(self.width());
        self.encode(&mut words);
        words
    }
}
