//! Main disassembler logic

use crate::decoder::Decoder;
use crate::error::Result;
use crate::formatter::{format, format_words};
use arbin_spec::Container;

/// Disassemble a container into a static listing.
///
/// Constants are shown by reference only; nothing is executed. Fails on the
/// first instruction that cannot be decoded.
pub fn disassemble(container: &Container) -> Result<String> {
    let header = container.header();
    let code = container.code();
    let mut output = String::new();

    output.push_str("; ARBI Disassembly\n");
    output.push_str(&format!("; Version: {}\n", header.version));
    output.push_str(&format!("; Registers: {}\n", header.register_count));
    output.push_str(&format!("; Constants: {} bytes\n", header.constants_size));
    output.push_str(&format!("; Bytecode: {} words\n", header.bytecode_word_count));
    output.push('\n');

    let mut count = 0usize;
    for item in Decoder::new(code) {
        let (at, instr) = item?;

        // Word offset
        output.push_str(&format!("{:04X}:  ", at));

        // Raw words
        output.push_str(&format!("{:<24}  ", format_words(&code[at..at + instr.width()])));

        output.push_str(&format(&instr));
        output.push('\n');
        count += 1;
    }

    output.push_str(&format!("; {} instructions\n", count));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbin_spec::ContainerBuilder;

    #[test]
    fn test_disassemble_simple() {
        let mut builder = ContainerBuilder::new();
        builder.load_string(0, "hi").declare("x", 0).load_null(0);
        let container = builder.build().unwrap();

        let asm = disassemble(&container).unwrap();
        assert!(asm.contains("0000:  FE 0 FE 2 0"));
        assert!(asm.contains("load_const r0, string [0+2]"));
        assert!(asm.contains("0005:"));
        assert!(asm.contains("declare [2+1], r0"));
        assert!(asm.contains("0009:"));
        assert!(asm.contains("load_null r0"));
        assert!(asm.contains("; 3 instructions"));
    }

    #[test]
    fn test_disassemble_empty() {
        let container = ContainerBuilder::new().build().unwrap();
        let asm = disassemble(&container).unwrap();
        assert!(asm.contains("; 0 instructions"));
    }

    #[test]
    fn test_disassemble_fails_fast() {
        let mut builder = ContainerBuilder::new();
        builder.load_null(0).raw(1234).load_null(1);
        let container = builder.build().unwrap();
        assert!(disassemble(&container).is_err());
    }
}
