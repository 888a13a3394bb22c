//! Runtime errors for the Intcode machine.
//!
//! Suspension on input or output is not an error; it is reported through
//! [`State`](crate::State). Everything here is a fault: a malformed program
//! or a driver misusing the machine. Retrying never helps. Errors raised
//! while an instruction executes carry its address (`at`).

use intcode_common::{Cell, DecodeError, Mode};
use thiserror::Error;

/// Faults raised while constructing, driving, or executing a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The instruction at the program counter could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A read, write, or jump target fell outside the memory image.
    #[error("address {address} out of range (capacity {capacity}) at instruction {at}")]
    AddressOutOfRange {
        at: usize,
        address: Cell,
        capacity: usize,
    },

    /// An operand used as a memory address is not in an addressing mode.
    /// Writing through an immediate operand lands here.
    #[error("{mode:?} operand cannot be used as an address at instruction {at}")]
    NotAddressable { at: usize, mode: Mode },

    /// `set_input` called while a previous input is still unconsumed.
    #[error("input already pending")]
    InputPending,

    /// `get_output` called with nothing in the output slot.
    #[error("no output pending")]
    NoOutput,

    /// `run` called on a machine that has already halted.
    #[error("machine has halted")]
    Halted,

    /// A machine cannot be built from an empty program.
    #[error("program is empty")]
    EmptyProgram,

    /// Memory capacity is smaller than the program.
    #[error("memory capacity {capacity} is smaller than program length {len}")]
    MemoryTooSmall { capacity: usize, len: usize },

    /// The batch driver ran out of queued input.
    #[error("input requested at instruction {at} and none available")]
    InputExhausted { at: usize },

    /// The batch driver hit its configured step limit before the program halted.
    #[error("step limit {limit} exceeded")]
    StepLimitExceeded { limit: u64 },
}
