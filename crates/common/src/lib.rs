//! Intcode common types and instruction decoding.
//!
//! This crate provides the foundational data structures for the Intcode
//! machine:
//!
//! - [`Cell`] — the signed 64-bit unit of storage, code, and data
//! - [`Opcode`] — the ten opcodes and their operand counts
//! - [`Mode`] — per-operand addressing modes
//! - [`Instruction`] — a decoded instruction, read fresh from memory each cycle
//! - [`Program`] — an immutable sequence of cells
//! - [`DecodeError`] — errors from decoding an instruction
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;

/// The sole unit of storage. Opcodes, operands, and data are all cells.
pub type Cell = i64;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{Instruction, Operand, MAX_OPERANDS};
pub use mode::Mode;
pub use opcode::Opcode;
pub use program::Program;
