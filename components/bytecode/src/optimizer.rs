//! Bytecode optimization passes
//!
//! Runs constant folding, symbol renaming, and dead-store cleanup to a
//! fixed point on the instruction count, then garbage-collects the
//! constant pool. Passes only transform or leave the stream unchanged;
//! they never fail.

use std::collections::HashMap;

use crate::constant::{Constant, Number};
use crate::instruction::{Instruction, Operand};
use crate::opcode::OpCode;
use crate::symbols::SymbolTable;

/// Bytecode optimizer driving the pass pipeline
pub struct Optimizer<'a> {
    instructions: Vec<Instruction>,
    constants: Vec<Constant>,
    symbols: Option<&'a mut SymbolTable>,
}

impl<'a> Optimizer<'a> {
    /// Create an optimizer over an instruction stream and constant pool.
    /// When a symbol table is supplied, the renaming pass keeps it in
    /// sync with the rewritten instruction operands.
    pub fn new(
        instructions: Vec<Instruction>,
        constants: Vec<Constant>,
        symbols: Option<&'a mut SymbolTable>,
    ) -> Self {
        Self {
            instructions,
            constants,
            symbols,
        }
    }

    /// Run the passes until the instruction count stabilizes, then
    /// collect constant-pool garbage and return the transformed pair
    pub fn optimize(mut self) -> (Vec<Instruction>, Vec<Constant>) {
        loop {
            let original_len = self.instructions.len();

            self.fold_constants();
            self.rename_symbols();
            self.remove_dead_stores();

            if self.instructions.len() == original_len {
                break;
            }
        }

        self.collect_garbage();

        (self.instructions, self.constants)
    }

    /// Replace `Constant a, Constant b, <arith>` windows with a single
    /// load of the computed value
    fn fold_constants(&mut self) {
        let mut i = 0;
        while i < self.instructions.len() {
            // A successful fold re-examines the same index so adjacent
            // windows collapse in one sweep.
            if !self.try_fold_window(i) {
                i += 1;
            }
        }
    }

    fn try_fold_window(&mut self, i: usize) -> bool {
        if i + 2 >= self.instructions.len() {
            return false;
        }
        if self.instructions[i].op != OpCode::Constant
            || self.instructions[i + 1].op != OpCode::Constant
            || !self.instructions[i + 2].op.is_arithmetic()
        {
            return false;
        }

        let idx1 = match self.instructions[i].arg.as_ref().and_then(Operand::const_index) {
            Some(idx) if idx < self.constants.len() => idx,
            _ => return false,
        };
        let idx2 = match self.instructions[i + 1].arg.as_ref().and_then(Operand::const_index) {
            Some(idx) if idx < self.constants.len() => idx,
            _ => return false,
        };

        let (a, b) = match (self.constants[idx1].as_number(), self.constants[idx2].as_number()) {
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        let folded = match fold_arithmetic(a, b, self.instructions[i + 2].op) {
            Some(n) => n,
            None => return false,
        };

        let new_idx = self.constants.len() as u32;
        self.constants.push(Constant::Number(folded));

        let line = self.instructions[i].line;
        self.instructions[i] = Instruction::with_arg(OpCode::Constant, Operand::Const(new_idx), line);
        self.instructions.drain(i + 1..i + 3);
        true
    }

    /// Rewrite user-chosen global and local names to short canonical
    /// identifiers, leaving builtin names untouched
    fn rename_symbols(&mut self) {
        let mut global_usage: HashMap<String, usize> = HashMap::new();
        let mut local_usage: HashMap<usize, usize> = HashMap::new();

        for inst in &self.instructions {
            match inst.op {
                OpCode::GetGlobal | OpCode::SetGlobal => {
                    if let Some(name) = inst.arg.as_ref().and_then(Operand::as_str) {
                        *global_usage.entry(name.to_string()).or_insert(0) += 1;
                    }
                }
                OpCode::GetLocal | OpCode::SetLocal => {
                    if let Some(slot) = inst.arg.as_ref().and_then(Operand::local_slot) {
                        *local_usage.entry(slot).or_insert(0) += 1;
                    }
                }
                OpCode::Call => {
                    if let Some(name) = inst.arg.as_ref().and_then(Operand::as_str) {
                        if !name.is_empty() {
                            *global_usage.entry(name.to_string()).or_insert(0) += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        // Most-used globals take the shortest canonical names. Ties break
        // on name order so identical inputs rename identically.
        let mut ranked: Vec<(String, usize)> = global_usage
            .into_iter()
            .filter(|(name, _)| !builtins::is_builtin(name))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut global_names: HashMap<String, String> = HashMap::new();
        for (counter, (name, _)) in ranked.into_iter().enumerate() {
            global_names.insert(name, format!("g{}", counter + 1));
        }

        let mut slots: Vec<usize> = local_usage.into_keys().collect();
        slots.sort_unstable();
        let mut local_names: HashMap<usize, String> = HashMap::new();
        for (counter, slot) in slots.into_iter().enumerate() {
            local_names.insert(slot, format!("l{}", counter + 1));
        }

        // Local slot operands stay as-is; only string operands and the
        // symbol-table keys change.
        for inst in &mut self.instructions {
            match inst.op {
                OpCode::GetGlobal | OpCode::SetGlobal | OpCode::Call => {
                    if let Some(Operand::Str(name)) = inst.arg.as_mut() {
                        if let Some(new_name) = global_names.get(name.as_str()) {
                            *name = new_name.clone();
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(symbols) = self.symbols.as_deref_mut() {
            let mut moved = Vec::new();
            for (old, new) in &global_names {
                if let Some(tag) = symbols.globals.remove(old) {
                    moved.push((new.clone(), tag));
                }
            }
            for (new, tag) in moved {
                symbols.globals.insert(new, tag);
            }

            if !local_names.is_empty() {
                let old: Vec<(String, usize)> = symbols.locals.drain().collect();
                for (name, slot) in old {
                    let key = local_names.get(&slot).cloned().unwrap_or(name);
                    symbols.locals.insert(key, slot);
                }
            }
        }
    }

    /// Delete stores to names and slots that are never read. A store
    /// immediately followed by `MakeFunc` is a function definition and is
    /// always kept.
    fn remove_dead_stores(&mut self) {
        let mut global_usage: HashMap<String, usize> = HashMap::new();
        let mut local_usage: HashMap<usize, usize> = HashMap::new();

        for inst in &self.instructions {
            match inst.op {
                OpCode::GetGlobal => {
                    if let Some(name) = inst.arg.as_ref().and_then(Operand::as_str) {
                        *global_usage.entry(name.to_string()).or_insert(0) += 1;
                    }
                }
                OpCode::SetGlobal => {
                    if let Some(name) = inst.arg.as_ref().and_then(Operand::as_str) {
                        global_usage.entry(name.to_string()).or_insert(0);
                    }
                }
                OpCode::GetLocal => {
                    if let Some(slot) = inst.arg.as_ref().and_then(Operand::local_slot) {
                        *local_usage.entry(slot).or_insert(0) += 1;
                    }
                }
                OpCode::SetLocal => {
                    if let Some(slot) = inst.arg.as_ref().and_then(Operand::local_slot) {
                        local_usage.entry(slot).or_insert(0);
                    }
                }
                OpCode::Call => {
                    if let Some(name) = inst.arg.as_ref().and_then(Operand::as_str) {
                        if !name.is_empty() {
                            *global_usage.entry(name.to_string()).or_insert(0) += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        let len = self.instructions.len();
        let mut keep = vec![true; len];

        for i in 0..len {
            match self.instructions[i].op {
                OpCode::SetGlobal => {
                    let name = match self.instructions[i].arg.as_ref().and_then(Operand::as_str) {
                        Some(name) => name,
                        None => continue,
                    };
                    let is_func_def =
                        i + 1 < len && self.instructions[i + 1].op == OpCode::MakeFunc;
                    if global_usage.get(name).copied() == Some(0) && !is_func_def {
                        keep[i] = false;
                        // The preceding load is the discarded value.
                        if i > 0 && self.instructions[i - 1].op == OpCode::Constant {
                            keep[i - 1] = false;
                        }
                    }
                }
                OpCode::SetLocal => {
                    let slot = match self.instructions[i].arg.as_ref().and_then(Operand::local_slot)
                    {
                        Some(slot) => slot,
                        None => continue,
                    };
                    if local_usage.get(&slot).copied() == Some(0) {
                        keep[i] = false;
                        if i > 0 && self.instructions[i - 1].op == OpCode::Constant {
                            keep[i - 1] = false;
                        }
                    }
                }
                _ => {}
            }
        }

        let mut flags = keep.into_iter();
        self.instructions.retain(|_| flags.next().unwrap());
    }

    /// Rebuild the constant pool to hold only constants referenced by
    /// `Constant` or `MakeFunc` instructions, rewriting their operands
    fn collect_garbage(&mut self) {
        let mut used = vec![false; self.constants.len()];
        for inst in &self.instructions {
            if matches!(inst.op, OpCode::Constant | OpCode::MakeFunc) {
                if let Some(idx) = inst.arg.as_ref().and_then(Operand::const_index) {
                    if idx < used.len() {
                        used[idx] = true;
                    }
                }
            }
        }

        let mut old_to_new: Vec<Option<u32>> = Vec::with_capacity(self.constants.len());
        let mut compacted = Vec::new();
        for (constant, is_used) in self.constants.drain(..).zip(used) {
            if is_used {
                old_to_new.push(Some(compacted.len() as u32));
                compacted.push(constant);
            } else {
                old_to_new.push(None);
            }
        }
        self.constants = compacted;

        for inst in &mut self.instructions {
            match inst.op {
                OpCode::Constant => {
                    if let Some(Operand::Const(idx)) = inst.arg.as_mut() {
                        // A dangling reference falls back to slot zero.
                        *idx = old_to_new
                            .get(*idx as usize)
                            .copied()
                            .flatten()
                            .unwrap_or(0);
                    }
                }
                OpCode::MakeFunc => {
                    if let Some(Operand::Const(idx)) = inst.arg.as_mut() {
                        if let Some(Some(new_idx)) = old_to_new.get(*idx as usize) {
                            *idx = *new_idx;
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn fold_arithmetic(a: f64, b: f64, op: OpCode) -> Option<Number> {
    let result = match op {
        OpCode::Add => a + b,
        OpCode::Sub => a - b,
        OpCode::Mul => a * b,
        OpCode::Div => {
            if b == 0.0 {
                return None;
            }
            a / b
        }
        _ => return None,
    };
    Some(Number::from_f64(result))
}

/// Optimize an instruction stream and constant pool in one call
pub fn optimize_bytecode(
    instructions: Vec<Instruction>,
    constants: Vec<Constant>,
    symbols: Option<&mut SymbolTable>,
) -> (Vec<Instruction>, Vec<Constant>) {
    Optimizer::new(instructions, constants, symbols).optimize()
}
