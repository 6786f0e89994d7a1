//! Bytecode core for the lightlang toolchain
//!
//! This crate provides the instruction and constant model, the bit-packed
//! binary container, and the optimization passes for lightlang bytecode.
//!
//! # Features
//!
//! - Stack-based bytecode instruction set
//! - Bit-level container format with variable-length integer encodings
//! - Optimization passes (constant folding, symbol renaming, dead-store
//!   cleanup, constant-pool garbage collection)
//!
//! # Example
//!
//! ```
//! use bytecode::{Constant, Number, OpCode, Operand, Program};
//!
//! let mut program = Program::new();
//!
//! // Add constants
//! let a = program.add_constant(Constant::Number(Number::Int(2)));
//! let b = program.add_constant(Constant::Number(Number::Int(3)));
//!
//! // Emit instructions
//! program.emit_with_arg(OpCode::Constant, Operand::Const(a as u32), 1);
//! program.emit_with_arg(OpCode::Constant, Operand::Const(b as u32), 1);
//! program.emit(OpCode::Add, 1);
//! program.emit(OpCode::Halt, 1);
//!
//! // Optimize
//! program.optimize(None);
//!
//! // Serialize
//! let bytes = program.to_bytes().unwrap();
//! let restored = Program::from_bytes(&bytes).unwrap();
//! assert_eq!(program.instructions, restored.instructions);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codec;
pub mod constant;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod optimizer;
pub mod program;
pub mod symbols;

// Re-export main types at crate root
pub use bitio::{BitReader, BitWriter};
pub use codec::{BytecodeReader, BytecodeWriter, MAGIC_HEADER, VERSION_MAJOR, VERSION_MINOR};
pub use constant::{Constant, Number};
pub use error::{BytecodeError, Result};
pub use instruction::{Instruction, Operand};
pub use opcode::OpCode;
pub use optimizer::{optimize_bytecode, Optimizer};
pub use program::Program;
pub use symbols::{SymbolTable, Type};
