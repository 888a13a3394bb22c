//! Opcode definitions for the Intcode instruction set.
//!
//! The opcode lives in the low two decimal digits of an instruction's first
//! cell. Each opcode consumes a fixed number of operand cells.

use crate::Cell;

/// Identifies the operation to perform.
///
/// The discriminant is the two-digit code found in memory.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `mem[op2] = op0 + op1`
    Add = 1,
    /// `mem[op2] = op0 * op1`
    Mul = 2,
    /// Blocking read: `mem[op0] = input`.
    In = 3,
    /// Blocking write: `output = op0`.
    Out = 4,
    /// Jump to `op1` if `op0 != 0`.
    Jnz = 5,
    /// Jump to `op1` if `op0 == 0`.
    Jz = 6,
    /// `mem[op2] = (op0 < op1) as Cell`
    Slt = 7,
    /// `mem[op2] = (op0 == op1) as Cell`
    Seq = 8,
    /// `relative_base += op0`
    Rbaddr = 9,
    /// Stop execution.
    Halt = 99,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Add,
    Opcode::Mul,
    Opcode::In,
    Opcode::Out,
    Opcode::Jnz,
    Opcode::Jz,
    Opcode::Slt,
    Opcode::Seq,
    Opcode::Rbaddr,
    Opcode::Halt,
];

impl TryFrom<Cell> for Opcode {
    /// The unrecognised code.
    type Error = Cell;

    fn try_from(value: Cell) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Mul),
            3 => Ok(Opcode::In),
            4 => Ok(Opcode::Out),
            5 => Ok(Opcode::Jnz),
            6 => Ok(Opcode::Jz),
            7 => Ok(Opcode::Slt),
            8 => Ok(Opcode::Seq),
            9 => Ok(Opcode::Rbaddr),
            99 => Ok(Opcode::Halt),
            _ => Err(value),
        }
    }
}

impl Opcode {
    /// Number of operand cells that follow the opcode cell.
    pub fn operand_count(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::Slt | Opcode::Seq => 3,
            Opcode::Jnz | Opcode::Jz => 2,
            Opcode::In | Opcode::Out | Opcode::Rbaddr => 1,
            Opcode::Halt => 0,
        }
    }

    /// Total cells occupied by the instruction, opcode cell included.
    pub fn width(&self) -> usize {
        1 + self.operand_count()
    }

    /// Returns the disassembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Mul => "mul",
            Opcode::In => "in",
            Opcode::Out => "out",
            Opcode::Jnz => "jnz",
            Opcode::Jz => "jz",
            Opcode::Slt => "slt",
            Opcode::Seq => "seq",
            Opcode::Rbaddr => "rbaddr",
            Opcode::Halt => "halt",
        }
    }
}
