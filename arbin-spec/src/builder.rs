//! Container builder
//!
//! Appends literals to the constant pool and instructions to the word stream,
//! tracking how many registers the program touches.

use crate::constants::ConstantPool;
use crate::container::{Container, Header};
use crate::error::Result;
use crate::instruction::{ConstRef, Instruction, Reg};
use crate::opcode::TypeTag;
use crate::{Word, VERSION};

#[derive(Clone, Debug)]
pub struct ContainerBuilder {
    version: u64,
    register_count: u64,
    constants: Vec<u8>,
    code: Vec<Word>,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            version: VERSION,
            register_count: 0,
            constants: Vec::new(),
            code: Vec::new(),
        }
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Reserve at least `count` registers
    pub fn registers(mut self, count: u64) -> Self {
        self.register_count = self.register_count.max(count);
        self
    }

    /// Append raw bytes to the constant pool
    pub fn constant(&mut self, bytes: &[u8]) -> ConstRef {
        let constant = ConstRef::new(self.constants.len() as u64, bytes.len() as u64);
        self.constants.extend_from_slice(bytes);
        constant
    }

    /// Append an instruction
    pub fn push(&mut self, instr: Instruction) -> &mut Self {
        if let Some(dest) = instr.dest() {
            self.touch(dest);
        }
        if let Instruction::Declare { source, .. } = instr {
            self.touch(source);
        }
        instr.encode(&mut self.code);
        self
    }

    /// Append a raw word, e.g. to produce a malformed stream
    pub fn raw(&mut self, word: Word) -> &mut Self {
        self.code.push(word);
        self
    }

    pub fn load_const(&mut self, dest: u64, type_tag: TypeTag, bytes: &[u8]) -> &mut Self {
        let constant = self.constant(bytes);
        self.push(Instruction::LoadConst {
            dest: Reg(dest),
            type_tag,
            constant,
        })
    }

    pub fn load_string(&mut self, dest: u64, text: &str) -> &mut Self {
        self.load_const(dest, TypeTag::String, text.as_bytes())
    }

    pub fn load_number(&mut self, dest: u64, literal: &str) -> &mut Self {
        self.load_const(dest, TypeTag::Number, literal.as_bytes())
    }

    pub fn declare(&mut self, name: &str, source: u64) -> &mut Self {
        let name = self.constant(name.as_bytes());
        self.push(Instruction::Declare {
            name,
            source: Reg(source),
        })
    }

    pub fn load_null(&mut self, dest: u64) -> &mut Self {
        self.push(Instruction::LoadNull { dest: Reg(dest) })
    }

    fn touch(&mut self, reg: Reg) {
        self.register_count = self.register_count.max(reg.0.saturating_add(1));
    }

    /// Finish the container
    pub fn build(&self) -> Result<Container> {
        let header = Header {
            version: self.version,
            register_count: self.register_count,
            constants_size: self.constants.len() as u64,
            bytecode_word_count: self.code.len() as u64,
            ..Header::new()
        };
        Container::new(
            header,
            ConstantPool::new(self.constants.clone()),
            self.code.clone(),
        )
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
