//! Container format round-trip and error-path tests

use bytecode::{
    BytecodeError, Constant, Instruction, Number, OpCode, Operand, Program, MAGIC_HEADER,
};

fn sample_program() -> Program {
    let mut program = Program::new();
    program.add_constant(Constant::Number(Number::Int(-64)));
    program.add_constant(Constant::Number(Number::Int(63)));
    program.add_constant(Constant::Number(Number::Int(1000)));
    program.add_constant(Constant::Number(Number::Float(3.25)));
    program.add_constant(Constant::Str("short".to_string()));
    program.add_constant(Constant::Str("s".repeat(300)));
    program.add_constant(Constant::FuncPtr(4));
    program.add_constant(Constant::Bool(true));
    program.add_constant(Constant::Bool(false));
    program.add_constant(Constant::Nil);

    program.emit_with_arg(OpCode::Constant, Operand::Const(0), 1);
    program.emit_with_arg(OpCode::SetGlobal, Operand::Str("total".to_string()), 1);
    program.emit_with_arg(OpCode::GetLocal, Operand::Int(3), 2);
    program.emit_with_arg(OpCode::SetLocal, Operand::Int(-1), 2);
    program.emit_with_arg(OpCode::Constant, Operand::Float(2.5), 3);
    program.emit_with_arg(OpCode::Call, Operand::Str("print".to_string()), 3);
    program.emit_with_arg(OpCode::MakeFunc, Operand::Const(6), 4);
    program.emit(OpCode::Return, 5);
    program.emit(OpCode::Halt, 16_000);
    program
}

#[test]
fn test_round_trip_preserves_program() {
    let program = sample_program();
    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    assert_eq!(program, restored);
}

#[test]
fn test_encode_is_length_stable() {
    let program = sample_program();
    let first = program.to_bytes().unwrap();
    let second = Program::from_bytes(&first).unwrap().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_magic_constant_value() {
    assert_eq!(MAGIC_HEADER, 0x4C4C_4243);
}

#[test]
fn test_zeroed_stream_is_bad_magic() {
    let result = Program::from_bytes(&[0x00; 32]);
    assert!(matches!(result, Err(BytecodeError::BadMagic)));
}

#[test]
fn test_minor_version_bump_is_accepted() {
    let mut bytes = Program::new().to_bytes().unwrap();
    bytes[4] = 0x35;
    assert!(Program::from_bytes(&bytes).is_ok());
}

#[test]
fn test_major_version_bump_is_rejected() {
    let mut bytes = Program::new().to_bytes().unwrap();
    bytes[4] = 0x40;
    assert!(matches!(
        Program::from_bytes(&bytes),
        Err(BytecodeError::IncompatibleVersion { major: 4, minor: 0 })
    ));
}

#[test]
fn test_small_int_constant_bit_layout() {
    let mut program = Program::new();
    program.add_constant(Constant::Number(Number::Int(-1)));
    let bytes = program.to_bytes().unwrap();

    // magic LSB-first, version, one constant, no instructions, then the
    // record: 3-bit tag 0, small flag, seven ones, zero padding.
    assert_eq!(
        bytes,
        vec![0x43, 0x42, 0x4C, 0x4C, 0x30, 0x01, 0x00, 0xF8, 0x07]
    );

    let restored = Program::from_bytes(&bytes).unwrap();
    assert_eq!(restored.constants, vec![Constant::Number(Number::Int(-1))]);
}

#[test]
fn test_small_int_boundaries() {
    let mut program = Program::new();
    program.add_constant(Constant::Number(Number::Int(-64)));
    program.add_constant(Constant::Number(Number::Int(63)));
    program.add_constant(Constant::Number(Number::Int(64)));
    program.add_constant(Constant::Number(Number::Int(-65)));

    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();

    assert_eq!(restored.constants[0], Constant::Number(Number::Int(-64)));
    assert_eq!(restored.constants[1], Constant::Number(Number::Int(63)));
    // Out-of-range integers travel as doubles and come back as floats,
    // still equal under the numeric rule.
    assert_eq!(restored.constants[2], Constant::Number(Number::Float(64.0)));
    assert_eq!(restored.constants[3], Constant::Number(Number::Int(-65)));
}

#[test]
fn test_long_string_constant() {
    let text = "x".repeat(70_000);
    let mut program = Program::new();
    program.add_constant(Constant::Str(text.clone()));

    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.constants, vec![Constant::Str(text)]);
}

#[test]
fn test_integral_float_operand_becomes_int() {
    let mut program = Program::new();
    program.emit_with_arg(OpCode::SetLocal, Operand::Float(12.0), 1);
    program.emit_with_arg(OpCode::Constant, Operand::Float(1e300), 2);

    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();

    assert_eq!(restored.instructions[0].arg, Some(Operand::Int(12)));
    assert_eq!(restored.instructions[1].arg, Some(Operand::Float(1e300)));
    // Retagging preserves operand semantics.
    assert_eq!(program.instructions, restored.instructions);
}

#[test]
fn test_line_numbers_survive() {
    let mut program = Program::new();
    for line in [1u16, 127, 128, 255, 4000, 16_383] {
        program.emit(OpCode::Pop, line);
    }
    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    let lines: Vec<u16> = restored.instructions.iter().map(|i| i.line).collect();
    assert_eq!(lines, vec![1, 127, 128, 255, 4000, 16_383]);
}

#[test]
fn test_truncation_anywhere_reports_eof() {
    let bytes = sample_program().to_bytes().unwrap();
    for cut in 0..bytes.len().saturating_sub(1) {
        let result = Program::from_bytes(&bytes[..cut]);
        assert!(
            matches!(
                result,
                Err(BytecodeError::UnexpectedEof) | Err(BytecodeError::BadMagic)
            ),
            "cut at {} must fail cleanly",
            cut
        );
    }
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.llbytecode");

    let program = sample_program();
    program.save(&path).unwrap();
    let restored = Program::load(&path).unwrap();

    assert_eq!(program, restored);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Program::load(dir.path().join("missing.llbytecode"));
    assert!(matches!(result, Err(BytecodeError::Io(_))));
}

#[test]
fn test_load_garbage_file_is_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.llbytecode");
    std::fs::write(&path, [0u8; 64]).unwrap();
    assert!(matches!(
        Program::load(&path),
        Err(BytecodeError::BadMagic)
    ));
}

#[test]
fn test_instruction_equality_uses_numeric_rule() {
    let a = Instruction::with_arg(OpCode::SetLocal, Operand::Float(7.0), 1);
    let b = Instruction::with_arg(OpCode::SetLocal, Operand::Int(7), 1);
    assert_eq!(a, b);
}
