//! Integration tests for the ARBI disassembler
//!
//! Tests the complete decode workflow including:
//! - Positional decoding of variable-width instructions
//! - Output formatting
//! - Error handling for malformed streams

use arbin_disassembler::{decode, disassemble, format, step, Decoder, DisassemblerError};
use arbin_spec::{
    ConstRef, Container, ContainerBuilder, ErrorKind, Instruction, Opcode, Reg, TypeTag,
};
use proptest::prelude::*;

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_mixed_stream() {
    let words = [
        Opcode::LoadConst.to_u64(), 0, TypeTag::String.to_u64(), 2, 0,
        Opcode::Declare.to_u64(), 1, 2, 0,
        Opcode::LoadNull.to_u64(), 1,
        Opcode::LoadConst.to_u64(), 1, TypeTag::Number.to_u64(), 3, 3,
    ];

    let instrs = decode(&words).unwrap();
    assert_eq!(
        instrs,
        vec![
            Instruction::LoadConst {
                dest: Reg(0),
                type_tag: TypeTag::String,
                constant: ConstRef::new(0, 2),
            },
            Instruction::Declare {
                name: ConstRef::new(2, 1),
                source: Reg(0),
            },
            Instruction::LoadNull { dest: Reg(1) },
            Instruction::LoadConst {
                dest: Reg(1),
                type_tag: TypeTag::Number,
                constant: ConstRef::new(3, 3),
            },
        ]
    );
}

#[test]
fn test_decoder_cursors() {
    let mut builder = ContainerBuilder::new();
    builder.load_null(0).load_string(1, "a").declare("b", 1).load_null(2);
    let container = builder.build().unwrap();

    let cursors: Vec<usize> = Decoder::new(container.code())
        .map(|item| item.unwrap().0)
        .collect();
    assert_eq!(cursors, vec![0, 2, 7, 11]);
}

#[test]
fn test_decoder_final_cursor_is_word_count() {
    let mut builder = ContainerBuilder::new();
    builder.load_string(0, "x").load_null(0);
    let container = builder.build().unwrap();

    let mut decoder = Decoder::new(container.code());
    while let Some(item) = decoder.next() {
        item.unwrap();
    }
    assert_eq!(decoder.cursor() as u64, container.header().bytecode_word_count);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_unknown_opcode_is_not_skipped() {
    let words = [Opcode::LoadNull.to_u64(), 0, 0xDEAD, Opcode::LoadNull.to_u64(), 1];
    let err = decode(&words).unwrap_err();
    assert!(matches!(err, DisassemblerError::UnknownOpcode { tag: 0xDEAD, at: 2 }));
    assert_eq!(err.kind(), ErrorKind::UnknownOpcode);
}

#[test]
fn test_type_tag_space_is_separate() {
    // LOAD_NULL's opcode value is not a type tag
    let words = [Opcode::LoadConst.to_u64(), 0, Opcode::LoadNull.to_u64(), 0, 0];
    let err = step(&words, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownTypeTag);
}

#[test]
fn test_jump_does_not_consume_words() {
    let words = [Opcode::Jump.to_u64(), 5];
    let err = step(&words, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_truncated_tail_instruction() {
    let words = [Opcode::LoadNull.to_u64(), 0, Opcode::Declare.to_u64(), 1];
    let err = decode(&words).unwrap_err();
    assert!(matches!(
        err,
        DisassemblerError::TruncatedInstruction { opcode: Opcode::Declare, at: 2, needed: 3, available: 1 }
    ));
    assert_eq!(err.kind(), ErrorKind::Format);
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn test_disassemble_listing() {
    let mut builder = ContainerBuilder::new();
    builder.load_number(0, "42").declare("answer", 0);
    let container = builder.build().unwrap();

    let asm = disassemble(&container).unwrap();
    let lines: Vec<&str> = asm.lines().filter(|l| !l.starts_with(';') && !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0000:"));
    assert!(lines[0].ends_with("load_const r0, number [0+2]"));
    assert!(lines[1].starts_with("0005:"));
    assert!(lines[1].ends_with("declare [2+6], r0"));
}

#[test]
fn test_disassemble_from_bytes() {
    let mut builder = ContainerBuilder::new();
    builder.load_null(3);
    let bytes = builder.build().unwrap().to_bytes();

    let container = Container::from_bytes(&bytes).unwrap();
    let asm = disassemble(&container).unwrap();
    assert!(asm.contains("; Registers: 4"));
    assert!(asm.contains(&format(&Instruction::LoadNull { dest: Reg(3) })));
}

// ============================================================================
// Roundtrip Properties
// ============================================================================

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    let reg = (0u64..16).prop_map(Reg);
    let constant = (0u64..1024, 0u64..64).prop_map(|(o, l)| ConstRef::new(o, l));
    let type_tag = prop_oneof![Just(TypeTag::String), Just(TypeTag::Number)];

    prop_oneof![
        (reg.clone(), type_tag, constant.clone()).prop_map(|(dest, type_tag, constant)| {
            Instruction::LoadConst { dest, type_tag, constant }
        }),
        (constant, reg.clone()).prop_map(|(name, source)| Instruction::Declare { name, source }),
        reg.prop_map(|dest| Instruction::LoadNull { dest }),
    ]
}

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(instrs in proptest::collection::vec(arb_instruction(), 0..32)) {
        let mut words = Vec::new();
        for instr in &instrs {
            instr.encode(&mut words);
        }
        prop_assert_eq!(decode(&words).unwrap(), instrs);
    }

    #[test]
    fn prop_step_width(instr in arb_instruction()) {
        let words = instr.to_words();
        let (decoded, next) = step(&words, 0).unwrap();
        prop_assert_eq!(decoded, instr);
        prop_assert_eq!(next, words.len());
    }
}
