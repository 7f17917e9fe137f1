//! Instruction decoder
//!
//! The word stream carries no instruction boundaries. [`step`] reads the opcode
//! word at the cursor, takes the opcode's fixed number of operand words and
//! returns the cursor of the next instruction.

use crate::error::{DisassemblerError, Result};
use arbin_spec::{ConstRef, Instruction, Opcode, Reg, TypeTag, Word};

/// Decode the instruction starting at `cursor`.
///
/// Returns the instruction and `cursor + 1 + operand_words`.
pub fn step(words: &[Word], cursor: usize) -> Result<(Instruction, usize)> {
    let tag = *words
        .get(cursor)
        .ok_or(DisassemblerError::CursorOutOfRange {
            at: cursor,
            len: words.len(),
        })?;
    let opcode =
        Opcode::from_u64(tag).ok_or(DisassemblerError::UnknownOpcode { tag, at: cursor })?;

    match opcode {
        Opcode::LoadConst => {
            let [dest, tag, length, offset] = operands::<4>(words, cursor, opcode)?;
            let type_tag = TypeTag::from_u64(tag)
                .ok_or(DisassemblerError::UnknownTypeTag { tag, at: cursor + 2 })?;
            let instr = Instruction::LoadConst {
                dest: Reg(dest),
                type_tag,
                constant: ConstRef::new(offset, length),
            };
            Ok((instr, cursor + 5))
        }
        Opcode::Declare => {
            let [length, offset, source] = operands::<3>(words, cursor, opcode)?;
            let instr = Instruction::Declare {
                name: ConstRef::new(offset, length),
                source: Reg(source),
            };
            Ok((instr, cursor + 4))
        }
        Opcode::LoadNull => {
            let [dest] = operands::<1>(words, cursor, opcode)?;
            Ok((Instruction::LoadNull { dest: Reg(dest) }, cursor + 2))
        }
        Opcode::Jump => Err(DisassemblerError::UnsupportedOpcode { opcode, at: cursor }),
    }
}

/// The `N` words following the opcode word at `cursor`
fn operands<const N: usize>(words: &[Word], cursor: usize, opcode: Opcode) -> Result<[Word; N]> {
    let rest = &words[cursor + 1..];
    if rest.len() < N {
        return Err(DisassemblerError::TruncatedInstruction {
            opcode,
            at: cursor,
            needed: N,
            available: rest.len(),
        });
    }

    let mut out = [0; N];
    out.copy_from_slice(&rest[..N]);
    Ok(out)
}

/// Iterator over the instructions of a word stream.
///
/// Yields `(cursor, instruction)` pairs and stops after the first error.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    words: &'a [Word],
    cursor: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        Self {
            words,
            cursor: 0,
            failed: false,
        }
    }

    /// Cursor of the next instruction
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<(usize, Instruction)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.words.len() {
            return None;
        }

        let at = self.cursor;
        match step(self.words, at) {
            Ok((instr, next)) => {
                tracing::trace!(at, opcode = %instr.opcode(), "decoded");
                self.cursor = next;
                Some(Ok((at, instr)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode a whole word stream, failing on the first bad instruction
pub fn decode(words: &[Word]) -> Result<Vec<Instruction>> {
    Decoder::new(words)
        .map(|item| item.map(|(_, instr)| instr))
        .collect()
}
