//! Intcode virtual machine — executes cell programs with suspendable I/O.
//!
//! The machine has:
//! - A fixed-capacity memory image shared by code and data
//! - A program counter and a relative base for relative addressing
//! - Single-slot input and output registers
//!
//! Execution is cooperative. [`Machine::run`] returns whenever the machine
//! needs input, has produced output, halts, or exhausts its budget. The
//! driver services the I/O slot and calls `run` again.
//!
//! # Usage
//!
//! ```
//! use intcode_common::Program;
//! use intcode_vm::{Machine, State};
//!
//! // in [5]; out [5]; halt
//! let mut machine = Machine::new(Program::new(vec![3, 5, 4, 5, 99, 0])).unwrap();
//!
//! assert_eq!(machine.run(None).unwrap(), State::WaitingForInput);
//! machine.set_input(7).unwrap();
//! assert_eq!(machine.run(None).unwrap(), State::WaitingForOutput);
//! assert_eq!(machine.get_output().unwrap(), 7);
//! assert_eq!(machine.run(None).unwrap(), State::Halted);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;

pub use config::{MachineConfig, DEFAULT_MEMORY_SIZE};
pub use error::RuntimeError;
pub use machine::{Machine, State};

use intcode_common::{Cell, Program};

/// Run a program to completion on a fresh machine, feeding it `input` in
/// order and collecting every output.
///
/// # Errors
///
/// [`RuntimeError::InputExhausted`] if the program asks for more input than
/// was supplied, or any fault raised during execution.
pub fn run(program: &Program, input: &[Cell]) -> Result<Vec<Cell>, RuntimeError> {
    run_with_config(program, input, &MachineConfig::default())
}

/// Like [`run`], with explicit memory size and step limit.
///
/// # Errors
///
/// Additionally returns [`RuntimeError::StepLimitExceeded`] when
/// `config.step_limit` instructions execute without the program halting.
pub fn run_with_config(
    program: &Program,
    input: &[Cell],
    config: &MachineConfig,
) -> Result<Vec<Cell>, RuntimeError> {
    let mut machine = Machine::with_config(program.clone(), config)?;
    let mut input = input.iter().copied();
    let mut output = Vec::new();

    loop {
        let budget = config
            .step_limit
            .map(|limit| limit.saturating_sub(machine.steps()));

        match machine.run(budget)? {
            State::Halted => return Ok(output),
            State::WaitingForInput => {
                let value = input
                    .next()
                    .ok_or(RuntimeError::InputExhausted { at: machine.pc() })?;
                machine.set_input(value)?;
            }
            State::WaitingForOutput => output.push(machine.get_output()?),
            State::Paused | State::Executing => {
                return Err(RuntimeError::StepLimitExceeded {
                    limit: config.step_limit.unwrap_or_default(),
                })
            }
        }
    }
}
