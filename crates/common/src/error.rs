//! Decode errors for Intcode instructions.

use crate::Cell;
use thiserror::Error;

/// Errors that occur while decoding the instruction at a memory address.
///
/// Every variant carries the address of the instruction's first cell
/// (`at`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two decimal digits of the first cell name no opcode.
    #[error("unknown opcode {value} at address {at}")]
    UnknownOpcode { at: usize, value: Cell },

    /// A consumed operand carries a mode digit other than 0, 1, or 2.
    #[error("invalid addressing mode {digit} for operand {operand} at address {at}")]
    InvalidMode {
        at: usize,
        operand: usize,
        digit: Cell,
    },

    /// The instruction extends past the end of memory.
    #[error("instruction of width {width} at address {at} runs past end of memory (length {len})")]
    Truncated { at: usize, width: usize, len: usize },
}
