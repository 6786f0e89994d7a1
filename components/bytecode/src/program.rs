//! Compiled bytecode container
//!
//! Holds the instruction stream and constant pool produced by the
//! emitter, and carries them through optimization and (de)serialization.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::codec::{BytecodeReader, BytecodeWriter};
use crate::constant::Constant;
use crate::error::Result;
use crate::instruction::{Instruction, Operand};
use crate::opcode::OpCode;
use crate::optimizer::Optimizer;
use crate::symbols::SymbolTable;

/// A compiled program: instruction stream plus constant pool
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Sequence of bytecode instructions
    pub instructions: Vec<Instruction>,
    /// Constant pool for literal values
    pub constants: Vec<Constant>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction without an operand
    pub fn emit(&mut self, op: OpCode, line: u16) {
        self.instructions.push(Instruction::new(op, line));
    }

    /// Append an instruction with an operand
    pub fn emit_with_arg(&mut self, op: OpCode, arg: Operand, line: u16) {
        self.instructions.push(Instruction::with_arg(op, arg, line));
    }

    /// Append a constant to the pool and return its index
    pub fn add_constant(&mut self, value: Constant) -> usize {
        let idx = self.constants.len();
        self.constants.push(value);
        idx
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Get the number of constants
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    /// Run the optimization passes in place, rewriting symbol-table keys
    /// when a table is supplied
    pub fn optimize(&mut self, symbols: Option<&mut SymbolTable>) {
        let instructions = std::mem::take(&mut self.instructions);
        let constants = std::mem::take(&mut self.constants);
        let (instructions, constants) =
            Optimizer::new(instructions, constants, symbols).optimize();
        self.instructions = instructions;
        self.constants = constants;
    }

    /// Serialize to the bit-packed container format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut writer = BytecodeWriter::new(&mut bytes);
        writer.write_bytecode(&self.instructions, &self.constants)?;
        Ok(bytes)
    }

    /// Deserialize from the bit-packed container format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (instructions, constants) = BytecodeReader::new(bytes).read_bytecode()?;
        Ok(Self {
            instructions,
            constants,
        })
    }

    /// Write the container to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BytecodeWriter::new(BufWriter::new(file));
        writer.write_bytecode(&self.instructions, &self.constants)
    }

    /// Read a container from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let (instructions, constants) =
            BytecodeReader::new(std::io::BufReader::new(file)).read_bytecode()?;
        Ok(Self {
            instructions,
            constants,
        })
    }
}
