//! Instruction formatting to assembly text

use arbin_spec::Instruction;

/// Format instruction as assembly text
pub fn format(instr: &Instruction) -> String {
    match instr {
        Instruction::LoadConst {
            dest,
            type_tag,
            constant,
        } => format!("load_const {}, {} {}", dest, type_tag, constant),
        Instruction::Declare { name, source } => format!("declare {}, {}", name, source),
        Instruction::LoadNull { dest } => format!("load_null {}", dest),
    }
}

/// Format instruction words as space-separated hex
pub fn format_words(words: &[u64]) -> String {
    words
        .iter()
        .map(|w| format!("{:X}", w))
        .collect::<Vec<_>>()
        .join(" ")
}
