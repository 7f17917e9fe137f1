//! # ARBI Container
//!
//! Header and binary format of a compiled container.

use crate::constants::ConstantPool;
use crate::error::{ArbinError, Result};
use crate::{Word, MAGIC, VERSION, WORD_SIZE};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Container header (36 bytes)
///
/// Binary format (all integers little-endian):
/// ```text
/// Offset  Size  Field
/// ──────────────────────────────────
/// 0x00    4     magic ("ARBI")
/// 0x04    8     version
/// 0x0C    8     register_count
/// 0x14    8     constants_size (bytes)
/// 0x1C    8     bytecode_word_count (words)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic tag: "ARBI"
    pub magic: [u8; 4],

    /// Container version
    pub version: u64,

    /// Number of registers the program needs
    pub register_count: u64,

    /// Constant pool size in bytes
    pub constants_size: u64,

    /// Bytecode size in 64-bit words
    pub bytecode_word_count: u64,
}

impl Header {
    /// Header size in bytes
    pub const SIZE: usize = 36;

    /// Create an empty header with the current version
    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            register_count: 0,
            constants_size: 0,
            bytecode_word_count: 0,
        }
    }

    /// Validate the header
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            return Err(ArbinError::InvalidMagic(self.magic));
        }
        Ok(())
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];

        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..12].copy_from_slice(&self.version.to_le_bytes());
        bytes[12..20].copy_from_slice(&self.register_count.to_le_bytes());
        bytes[20..28].copy_from_slice(&self.constants_size.to_le_bytes());
        bytes[28..36].copy_from_slice(&self.bytecode_word_count.to_le_bytes());

        bytes
    }

    /// Deserialize from bytes.
    ///
    /// The magic is checked before anything else is read.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MAGIC.len() {
            return Err(ArbinError::TruncatedHeader {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(ArbinError::InvalidMagic(magic));
        }

        if bytes.len() < Self::SIZE {
            return Err(ArbinError::TruncatedHeader {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        }

        Ok(Self {
            magic,
            version: read_u64(bytes, 4),
            register_count: read_u64(bytes, 12),
            constants_size: read_u64(bytes, 20),
            bytecode_word_count: read_u64(bytes, 28),
        })
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "Register Count: {}", self.register_count)?;
        writeln!(f, "Constants Size: {} bytes", self.constants_size)?;
        write!(f, "Bytecode Length: {} words", self.bytecode_word_count)
    }
}

/// Little-endian u64 at `at`; caller guarantees `at + 8 <= bytes.len()`
fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; WORD_SIZE];
    buf.copy_from_slice(&bytes[at..at + WORD_SIZE]);
    u64::from_le_bytes(buf)
}

/// A parsed container: header, constant pool, and bytecode words.
///
/// The sections are fixed at construction and always match the header sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    header: Header,
    constants: ConstantPool,
    code: Vec<Word>,
}

impl Container {
    /// Assemble a container from its parts, checking them against the header
    pub fn new(header: Header, constants: ConstantPool, code: Vec<Word>) -> Result<Self> {
        header.validate()?;

        if header.constants_size != constants.len() as u64 {
            return Err(ArbinError::SectionMismatch {
                section: "constants",
                declared: header.constants_size,
                found: constants.len(),
            });
        }

        if header.bytecode_word_count != code.len() as u64 {
            return Err(ArbinError::SectionMismatch {
                section: "bytecode",
                declared: header.bytecode_word_count,
                found: code.len(),
            });
        }

        Ok(Self {
            header,
            constants,
            code,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn constants(&self) -> &ConstantPool {
        &self.constants
    }

    /// Bytecode words
    pub fn code(&self) -> &[Word] {
        &self.code
    }

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(Header::SIZE + self.constants.len() + self.code.len() * WORD_SIZE);

        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(self.constants.as_bytes());
        for &word in &self.code {
            bytes.extend_from_slice(&word.to_le_bytes());
        }

        bytes
    }

    /// Deserialize from bytes.
    ///
    /// Bytes after the declared bytecode section are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = Header::from_bytes(bytes)?;

        let constants_size = usize::try_from(header.constants_size).map_err(|_| {
            ArbinError::SectionTooLarge {
                section: "constants",
                size: header.constants_size,
            }
        })?;
        let code_bytes = usize::try_from(header.bytecode_word_count)
            .ok()
            .and_then(|words| words.checked_mul(WORD_SIZE))
            .ok_or(ArbinError::SectionTooLarge {
                section: "bytecode",
                size: header.bytecode_word_count,
            })?;

        let constants_start = Header::SIZE;
        let constants_end = constants_start
            .checked_add(constants_size)
            .filter(|&end| end <= bytes.len())
            .ok_or(ArbinError::TruncatedConstants {
                expected: header.constants_size,
                found: bytes.len() - constants_start,
            })?;

        let code_end = constants_end
            .checked_add(code_bytes)
            .filter(|&end| end <= bytes.len())
            .ok_or(ArbinError::TruncatedBytecode {
                expected: header.bytecode_word_count,
                found: bytes.len() - constants_end,
            })?;

        let constants = ConstantPool::new(bytes[constants_start..constants_end].to_vec());
        let code = bytes[constants_end..code_end]
            .chunks_exact(WORD_SIZE)
            .map(|chunk| read_u64(chunk, 0))
            .collect();

        Self::new(header, constants, code)
    }

    /// Read a whole container from a reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Read a container file. The file is closed before decoding starts.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}
