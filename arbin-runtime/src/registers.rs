//! Register file
//!
//! `register_count` [`Value`] slots taken from the container header. Every slot
//! starts as [`Value::Null`]; only the tracer writes to it. Slots are stored
//! sparsely, so memory follows the registers actually written rather than the
//! declared count.

use crate::error::{Result, RuntimeError};
use arbin_spec::{Reg, Value};
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    count: u64,
    // Null slots are never stored
    values: BTreeMap<u64, Value>,
}

impl RegisterFile {
    /// Create `count` null registers
    pub fn new(count: u64) -> Self {
        Self {
            count,
            values: BTreeMap::new(),
        }
    }

    /// Number of registers
    #[inline]
    pub fn len(&self) -> u64 {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check that `reg` is addressable without touching it
    pub fn check(&self, reg: Reg) -> Result<()> {
        if reg.index() < self.count {
            Ok(())
        } else {
            Err(RuntimeError::RegisterOutOfRange {
                index: reg.index(),
                count: self.count,
            })
        }
    }

    /// Read a register
    pub fn get(&self, reg: Reg) -> Result<&Value> {
        self.check(reg)?;
        Ok(self.values.get(&reg.index()).unwrap_or(&NULL))
    }

    /// Write a register
    pub fn set(&mut self, reg: Reg, value: Value) -> Result<()> {
        self.check(reg)?;
        if value.is_null() {
            self.values.remove(&reg.index());
        } else {
            self.values.insert(reg.index(), value);
        }
        Ok(())
    }

    /// Every register in index order, nulls included
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        (0..self.count).map(move |i| self.values.get(&i).unwrap_or(&NULL))
    }

    /// Non-null registers in index order
    pub fn written(&self) -> impl Iterator<Item = (Reg, &Value)> + '_ {
        self.values.iter().map(|(&i, v)| (Reg(i), v))
    }

    /// True when no register holds a value
    pub fn is_all_null(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::ops::Index<u64> for RegisterFile {
    type Output = Value;

    /// Panics if `index` is not below the register count
    fn index(&self, index: u64) -> &Value {
        assert!(
            index < self.count,
            "register r{} out of range ({} registers)",
            index,
            self.count
        );
        self.values.get(&index).unwrap_or(&NULL)
    }
}
