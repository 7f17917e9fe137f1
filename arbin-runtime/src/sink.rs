//! Trace sinks
//!
//! The tracer hands every executed instruction to a [`TraceSink`] together with
//! the operands it resolved. Sinks only observe; register state is owned by the
//! tracer.

use crate::error::Result;
use arbin_disassembler::format;
use arbin_spec::{Header, Instruction, Reg, Value};
use std::io::Write;

/// Operands resolved while executing one instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// LOAD_CONST: value decoded from the constant pool, written to `dest`
    Constant { dest: Reg, value: Value },
    /// DECLARE: name from the constant pool bound to the source register's value
    Binding { name: String, value: Value },
    /// LOAD_NULL: `dest` cleared
    Null { dest: Reg },
}

pub trait TraceSink {
    /// Called once before the first instruction
    fn header(&mut self, _header: &Header) -> Result<()> {
        Ok(())
    }

    /// Called after each instruction has been applied
    fn emit(&mut self, at: usize, instr: &Instruction, resolved: &Resolved) -> Result<()>;

    /// Called once after the last instruction
    fn finish(&mut self, _instructions: usize) -> Result<()> {
        Ok(())
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn header(&mut self, header: &Header) -> Result<()> {
        (**self).header(header)
    }

    fn emit(&mut self, at: usize, instr: &Instruction, resolved: &Resolved) -> Result<()> {
        (**self).emit(at, instr, resolved)
    }

    fn finish(&mut self, instructions: usize) -> Result<()> {
        (**self).finish(instructions)
    }
}

/// Render a value for trace output: strings quoted, numbers bare
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => format!("{:?}", s),
        Value::Number(n) => n.clone(),
    }
}

/// Render one trace line (without newline)
pub fn render_line(at: usize, instr: &Instruction, resolved: &Resolved) -> String {
    let note = match resolved {
        Resolved::Constant { dest, value } => format!("{} = {}", dest, render_value(value)),
        Resolved::Binding { name, value } => format!("let {} = {}", name, render_value(value)),
        Resolved::Null { dest } => format!("{} = null", dest),
    };
    format!("{:04X}  {:<32}  ; {}", at, format(instr), note)
}

/// Writes human-readable trace lines to any writer
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn header(&mut self, header: &Header) -> Result<()> {
        writeln!(self.out, "{}", header)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn emit(&mut self, at: usize, instr: &Instruction, resolved: &Resolved) -> Result<()> {
        writeln!(self.out, "{}", render_line(at, instr, resolved))?;
        Ok(())
    }

    fn finish(&mut self, _instructions: usize) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// One emitted trace event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub at: usize,
    pub instruction: Instruction,
    pub resolved: Resolved,
}

/// Keeps every trace event in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub header: Option<Header>,
    pub records: Vec<TraceRecord>,
    pub finished: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names bound by DECLARE, in order
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.records.iter().filter_map(|r| match &r.resolved {
            Resolved::Binding { name, value } => Some((name.as_str(), value)),
            _ => None,
        })
    }
}

impl TraceSink for RecordingSink {
    fn header(&mut self, header: &Header) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn emit(&mut self, at: usize, instr: &Instruction, resolved: &Resolved) -> Result<()> {
        self.records.push(TraceRecord {
            at,
            instruction: *instr,
            resolved: resolved.clone(),
        });
        Ok(())
    }

    fn finish(&mut self, _instructions: usize) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
