//! Constant pool

use crate::error::{ArbinError, Result};
use crate::instruction::ConstRef;
use crate::opcode::TypeTag;
use crate::value::Value;

/// Immutable byte region holding serialized literals.
///
/// Instructions reference it with `(offset, length)` pairs. Slices borrow from the
/// pool; resolved values are always owned copies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstantPool {
    bytes: Vec<u8>,
}

impl ConstantPool {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Pool size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw pool bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bounds-checked slice `[offset, offset + length)`
    pub fn slice(&self, offset: u64, length: u64) -> Result<&[u8]> {
        let out_of_range = || ArbinError::ConstantOutOfRange {
            offset,
            length,
            size: self.bytes.len(),
        };

        let end = offset.checked_add(length).ok_or_else(out_of_range)?;
        if end > self.bytes.len() as u64 {
            return Err(out_of_range());
        }

        // Both bounds are <= len, so they fit in usize
        Ok(&self.bytes[offset as usize..end as usize])
    }

    /// Slice addressed by a constant reference
    #[inline]
    pub fn get(&self, constant: ConstRef) -> Result<&[u8]> {
        self.slice(constant.offset, constant.length)
    }

    /// Decode a constant as UTF-8 text
    pub fn text(&self, constant: ConstRef) -> Result<String> {
        let bytes = self.get(constant)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| ArbinError::InvalidUtf8 {
                offset: constant.offset,
                length: constant.length,
            })
    }

    /// Decode a constant into a typed value
    pub fn value(&self, tag: TypeTag, constant: ConstRef) -> Result<Value> {
        Value::from_constant(tag, self.get(constant)?, constant.offset)
    }
}

impl From<Vec<u8>> for ConstantPool {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}
