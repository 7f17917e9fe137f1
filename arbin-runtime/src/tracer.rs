//! Fetch-decode loop over a container

use crate::error::Result;
use crate::registers::RegisterFile;
use crate::sink::{Resolved, TraceSink};
use arbin_disassembler::step;
use arbin_spec::{Container, Instruction, VERSION};

/// Tracer configuration
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Pass the header to the sink before the first instruction
    pub show_header: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self { show_header: true }
    }
}

/// Result of a completed run
#[derive(Debug)]
pub struct TraceReport<S> {
    /// Number of instructions executed
    pub instructions: usize,

    /// Register file after the last instruction
    pub registers: RegisterFile,

    /// The sink, handed back to the caller
    pub sink: S,
}

/// Walks the bytecode of one container, applying each instruction to the
/// register file and reporting it to a sink.
pub struct Tracer<'c, S: TraceSink> {
    container: &'c Container,
    registers: RegisterFile,
    sink: S,
    config: TraceConfig,
    cursor: usize,
    executed: usize,
}

impl<'c, S: TraceSink> Tracer<'c, S> {
    /// Create a tracer with every register set to null
    pub fn new(container: &'c Container, sink: S, config: TraceConfig) -> Self {
        let header = container.header();
        if header.version != VERSION {
            tracing::warn!(
                version = header.version,
                expected = VERSION,
                "unexpected container version"
            );
        }

        Self {
            container,
            registers: RegisterFile::new(header.register_count),
            sink,
            config,
            cursor: 0,
            executed: 0,
        }
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Cursor of the next instruction
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True once the cursor has reached the end of the bytecode
    pub fn is_done(&self) -> bool {
        self.cursor >= self.container.code().len()
    }

    /// Decode and apply the instruction at the cursor.
    ///
    /// Operands are resolved and checked before anything is written, so a
    /// failing instruction changes no register and emits nothing.
    pub fn step(&mut self) -> Result<Instruction> {
        let at = self.cursor;
        let (instr, next) = step(self.container.code(), at)?;
        tracing::debug!(at, instr = ?instr, "execute");

        let resolved = self.execute(&instr)?;
        self.sink.emit(at, &instr, &resolved)?;

        self.cursor = next;
        self.executed += 1;
        Ok(instr)
    }

    fn execute(&mut self, instr: &Instruction) -> Result<Resolved> {
        let pool = self.container.constants();

        match *instr {
            Instruction::LoadConst {
                dest,
                type_tag,
                constant,
            } => {
                let value = pool.value(type_tag, constant)?;
                self.registers.set(dest, value.clone())?;
                Ok(Resolved::Constant { dest, value })
            }
            Instruction::Declare { name, source } => {
                // Observational only: the register file is not touched
                let name = pool.text(name)?;
                let value = self.registers.get(source)?.clone();
                Ok(Resolved::Binding { name, value })
            }
            Instruction::LoadNull { dest } => {
                self.registers.set(dest, arbin_spec::Value::Null)?;
                Ok(Resolved::Null { dest })
            }
        }
    }

    /// Run until the cursor reaches the bytecode word count
    pub fn run(mut self) -> Result<TraceReport<S>> {
        if self.config.show_header {
            self.sink.header(self.container.header())?;
        }

        while !self.is_done() {
            self.step()?;
        }

        self.sink.finish(self.executed)?;
        tracing::info!(instructions = self.executed, "trace complete");

        Ok(TraceReport {
            instructions: self.executed,
            registers: self.registers,
            sink: self.sink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;
    use crate::sink::RecordingSink;
    use arbin_spec::{ContainerBuilder, ErrorKind, Reg, Value};

    fn run(container: &Container) -> Result<TraceReport<RecordingSink>> {
        Tracer::new(container, RecordingSink::new(), TraceConfig::default()).run()
    }

    #[test]
    fn test_config_default() {
        let config = TraceConfig::default();
        assert!(config.show_header);
    }

    #[test]
    fn test_registers_start_null() {
        let container = ContainerBuilder::new().registers(5).build().unwrap();
        let tracer = Tracer::new(&container, RecordingSink::new(), TraceConfig::default());
        assert_eq!(tracer.registers().len(), 5);
        assert!(tracer.registers().is_all_null());
        assert!(tracer.is_done());
    }

    #[test]
    fn test_load_const_string() {
        let mut builder = ContainerBuilder::new();
        builder.load_string(0, "hi");
        let report = run(&builder.build().unwrap()).unwrap();

        assert_eq!(report.instructions, 1);
        assert_eq!(report.registers[0], Value::from("hi"));
        assert_eq!(
            report.sink.records[0].resolved,
            Resolved::Constant {
                dest: Reg(0),
                value: Value::from("hi"),
            }
        );
    }

    #[test]
    fn test_declare_does_not_mutate() {
        let mut builder = ContainerBuilder::new();
        builder.load_string(0, "hi").declare("x", 0).declare("y", 1);
        let container = builder.build().unwrap();

        let mut tracer = Tracer::new(&container, RecordingSink::new(), TraceConfig::default());
        tracer.step().unwrap();
        let before = tracer.registers().clone();
        tracer.step().unwrap();
        tracer.step().unwrap();
        assert_eq!(tracer.registers(), &before);

        let report = tracer.run().unwrap();
        let bindings: Vec<_> = report.sink.bindings().collect();
        assert_eq!(bindings, vec![("x", &Value::from("hi")), ("y", &Value::Null)]);
    }

    #[test]
    fn test_load_null_only_target() {
        let mut builder = ContainerBuilder::new();
        builder
            .load_string(0, "a")
            .load_string(1, "b")
            .load_string(2, "c")
            .load_null(1);
        let report = run(&builder.build().unwrap()).unwrap();

        assert_eq!(report.registers[0], Value::from("a"));
        assert_eq!(report.registers[1], Value::Null);
        assert_eq!(report.registers[2], Value::from("c"));
    }

    #[test]
    fn test_failing_instruction_has_no_effect() {
        let mut builder = ContainerBuilder::new();
        builder.load_string(0, "ok");
        // dest r0 is valid but the constant span is not
        builder.push(Instruction::LoadConst {
            dest: Reg(0),
            type_tag: arbin_spec::TypeTag::String,
            constant: arbin_spec::ConstRef::new(1, 100),
        });
        builder.load_null(0);
        let container = builder.build().unwrap();

        let mut sink = RecordingSink::new();
        let mut tracer = Tracer::new(&container, &mut sink, TraceConfig::default());
        tracer.step().unwrap();
        let err = tracer.step().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(tracer.registers()[0], Value::from("ok"));
        assert_eq!(tracer.cursor(), 5);
        drop(tracer);

        assert_eq!(sink.records.len(), 1);
    }

    #[test]
    fn test_register_out_of_range() {
        // Header declares a single register, instruction targets r1
        let mut builder = ContainerBuilder::new();
        builder.load_null(1);
        let built = builder.build().unwrap();
        let mut header = built.header().clone();
        header.register_count = 1;
        let container =
            Container::new(header, built.constants().clone(), built.code().to_vec()).unwrap();

        let err = run(&container).unwrap_err();
        assert!(matches!(err, RuntimeError::RegisterOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn test_huge_register_count_runs() {
        // Only written registers take memory, whatever the header declares
        let mut builder = ContainerBuilder::new().registers(u64::MAX);
        builder.load_string(u64::MAX - 1, "top").load_null(0);
        let report = run(&builder.build().unwrap()).unwrap();

        assert_eq!(report.instructions, 2);
        assert_eq!(report.registers.len(), u64::MAX);
        assert_eq!(report.registers[u64::MAX - 1], Value::from("top"));
        assert_eq!(report.registers[0], Value::Null);
    }

    #[test]
    fn test_header_hook() {
        let container = ContainerBuilder::new().build().unwrap();
        let report = run(&container).unwrap();
        assert_eq!(report.sink.header.as_ref(), Some(container.header()));
        assert!(report.sink.finished);

        let config = TraceConfig { show_header: false };
        let report = Tracer::new(&container, RecordingSink::new(), config)
            .run()
            .unwrap();
        assert!(report.sink.header.is_none());
    }
}
