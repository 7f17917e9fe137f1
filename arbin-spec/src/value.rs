//! # Register Values
//!
//! Every register holds one [`Value`]. Registers start as [`Value::Null`] and are
//! only changed by instruction execution.

use crate::error::{ArbinError, Result};
use crate::opcode::TypeTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value stored in a register
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// The null value
    #[default]
    Null,
    /// UTF-8 text
    String(String),
    /// Number literal, kept as its decimal text
    Number(String),
}

impl Value {
    /// Decode a constant-pool slice according to its type tag.
    ///
    /// `offset` is only used to report where invalid UTF-8 was found.
    pub fn from_constant(tag: TypeTag, bytes: &[u8], offset: u64) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| ArbinError::InvalidUtf8 {
            offset,
            length: bytes.len() as u64,
        })?;

        Ok(match tag {
            TypeTag::String => Value::String(text.to_owned()),
            TypeTag::Number => Value::Number(text.to_owned()),
        })
    }

    /// Check if this is the null value
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Type tag of a non-null value
    pub fn type_tag(&self) -> Option<TypeTag> {
        match self {
            Value::Null => None,
            Value::String(_) => Some(TypeTag::String),
            Value::Number(_) => Some(TypeTag::Number),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}
