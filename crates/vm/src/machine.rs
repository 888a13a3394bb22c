//! Machine state: memory image, program counter, relative base, I/O slots.

use std::fmt;

use crate::config::{MachineConfig, DEFAULT_MEMORY_SIZE};
use crate::error::RuntimeError;
use crate::memory::Memory;
use intcode_common::{Cell, Instruction, Program};
use tracing::debug;

/// Where the machine is in its run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Not running. Initial state, and the result of an exhausted budget.
    Paused,
    /// Inside `run`. Never returned to a caller.
    Executing,
    /// `halt` executed. Terminal.
    Halted,
    /// Blocked on `in` with an empty input slot. PC still names the `in`.
    WaitingForInput,
    /// An output value is ready, or `out` is blocked behind an undrained one.
    WaitingForOutput,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::Paused => "paused",
            State::Executing => "executing",
            State::Halted => "halted",
            State::WaitingForInput => "waiting for input",
            State::WaitingForOutput => "waiting for output",
        })
    }
}

/// An Intcode machine.
///
/// Owns its program, memory image, and I/O slots. A driver calls
/// [`run`](Machine::run), services whichever slot the returned [`State`]
/// names, and calls `run` again.
#[derive(Debug, Clone)]
pub struct Machine {
    /// The pristine program, reloaded on reset.
    pub(crate) program: Program,
    pub(crate) memory: Memory,
    /// Address of the next instruction.
    pub(crate) pc: usize,
    pub(crate) relative_base: Cell,
    pub(crate) state: State,
    /// Single-slot input register.
    pub(crate) input: Option<Cell>,
    /// Single-slot output register.
    pub(crate) output: Option<Cell>,
    /// Instructions executed since the last reset.
    pub(crate) steps: u64,
}

impl Machine {
    /// Create a machine with [`DEFAULT_MEMORY_SIZE`] cells of memory.
    pub fn new(program: Program) -> Result<Self, RuntimeError> {
        Self::with_capacity(program, DEFAULT_MEMORY_SIZE)
    }

    /// Create a machine using the memory size from `config`.
    pub fn with_config(program: Program, config: &MachineConfig) -> Result<Self, RuntimeError> {
        Self::with_capacity(program, config.memory_size)
    }

    /// Create a machine with `capacity` cells of memory.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::EmptyProgram`] if `program` has no cells, and
    /// [`RuntimeError::MemoryTooSmall`] if it does not fit in `capacity`.
    pub fn with_capacity(program: Program, capacity: usize) -> Result<Self, RuntimeError> {
        if program.is_empty() {
            return Err(RuntimeError::EmptyProgram);
        }
        if capacity < program.len() {
            return Err(RuntimeError::MemoryTooSmall {
                capacity,
                len: program.len(),
            });
        }

        let mut machine = Self {
            program,
            memory: Memory::new(capacity),
            pc: 0,
            relative_base: 0,
            state: State::Paused,
            input: None,
            output: None,
            steps: 0,
        };
        machine.reset();
        Ok(machine)
    }

    /// Reload the program into zeroed memory and clear all registers and
    /// I/O slots. The machine returns to [`State::Paused`].
    pub fn reset(&mut self) {
        self.memory.load(&self.program);
        self.pc = 0;
        self.relative_base = 0;
        self.state = State::Paused;
        self.input = None;
        self.output = None;
        self.steps = 0;
        debug!(
            len = self.program.len(),
            capacity = self.memory.capacity(),
            "machine reset"
        );
    }

    /// Place a value in the input slot.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::InputPending`] if the previous input has not been
    /// consumed yet.
    pub fn set_input(&mut self, value: Cell) -> Result<(), RuntimeError> {
        if self.input.is_some() {
            return Err(RuntimeError::InputPending);
        }
        self.input = Some(value);
        Ok(())
    }

    /// Take the value from the output slot, leaving it empty.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NoOutput`] if the slot is empty.
    pub fn get_output(&mut self) -> Result<Cell, RuntimeError> {
        self.output.take().ok_or(RuntimeError::NoOutput)
    }

    /// Read a memory cell directly, for inspection.
    ///
    /// No instruction is executing, so the `at` of an
    /// [`RuntimeError::AddressOutOfRange`] is the current PC, not a
    /// faulting instruction.
    pub fn read_memory(&self, address: usize) -> Result<Cell, RuntimeError> {
        self.memory.read(address_cell(address), self.pc)
    }

    /// Patch a memory cell directly. Errors carry the current PC as `at`,
    /// as for [`read_memory`](Machine::read_memory).
    pub fn write_memory(&mut self, address: usize, value: Cell) -> Result<(), RuntimeError> {
        self.memory.write(address_cell(address), value, self.pc)
    }

    /// Decode the instruction at the program counter without executing it.
    pub fn decode_current(&self) -> Result<Instruction, RuntimeError> {
        Ok(Instruction::decode(self.memory.cells(), self.pc)?)
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn relative_base(&self) -> Cell {
        self.relative_base
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn capacity(&self) -> usize {
        self.memory.capacity()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Instructions executed since the last reset, re-blocked ones included.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True while an input value waits to be consumed.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// True while an output value waits to be drained.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}

/// Addresses past `Cell::MAX` saturate, which is always out of range.
fn address_cell(address: usize) -> Cell {
    Cell::try_from(address).unwrap_or(Cell::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(cells: Vec<Cell>) -> Machine {
        Machine::new(Program::new(cells)).unwrap()
    }

    #[test]
    fn new_machine_is_paused_at_zero() {
        let m = machine(vec![99]);
        assert_eq!(m.state(), State::Paused);
        assert_eq!(m.pc(), 0);
        assert_eq!(m.relative_base(), 0);
        assert_eq!(m.capacity(), DEFAULT_MEMORY_SIZE);
        assert!(!m.has_input());
        assert!(!m.has_output());
    }

    #[test]
    fn empty_program_rejected() {
        assert_eq!(
            Machine::new(Program::default()).unwrap_err(),
            RuntimeError::EmptyProgram
        );
    }

    #[test]
    fn capacity_smaller_than_program_rejected() {
        assert_eq!(
            Machine::with_capacity(Program::new(vec![1, 0, 0, 0, 99]), 4).unwrap_err(),
            RuntimeError::MemoryTooSmall {
                capacity: 4,
                len: 5
            }
        );
    }

    #[test]
    fn capacity_equal_to_program_accepted() {
        let m = Machine::with_capacity(Program::new(vec![1, 0, 0, 0, 99]), 5).unwrap();
        assert_eq!(m.capacity(), 5);
    }

    #[test]
    fn with_config_uses_memory_size() {
        let config = MachineConfig::default().with_memory_size(32);
        let m = Machine::with_config(Program::new(vec![99]), &config).unwrap();
        assert_eq!(m.capacity(), 32);
    }

    #[test]
    fn memory_holds_program_then_zeroes() {
        let m = Machine::with_capacity(Program::new(vec![104, 5, 99]), 5).unwrap();
        assert_eq!(m.read_memory(0), Ok(104));
        assert_eq!(m.read_memory(2), Ok(99));
        assert_eq!(m.read_memory(4), Ok(0));
    }

    #[test]
    fn memory_access_is_bounds_checked() {
        let mut m = Machine::with_capacity(Program::new(vec![99]), 2).unwrap();
        assert!(matches!(
            m.read_memory(2),
            Err(RuntimeError::AddressOutOfRange { address: 2, .. })
        ));
        assert!(matches!(
            m.write_memory(usize::MAX, 1),
            Err(RuntimeError::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn set_input_twice_faults() {
        let mut m = machine(vec![99]);
        m.set_input(1).unwrap();
        assert!(m.has_input());
        assert_eq!(m.set_input(2), Err(RuntimeError::InputPending));
    }

    #[test]
    fn get_output_when_empty_faults() {
        let mut m = machine(vec![99]);
        assert_eq!(m.get_output(), Err(RuntimeError::NoOutput));
    }

    #[test]
    fn reset_restores_program_and_clears_slots() {
        let mut m = machine(vec![99, 0]);
        m.write_memory(1, 55).unwrap();
        m.write_memory(100, 7).unwrap();
        m.set_input(3).unwrap();
        m.output = Some(4);
        m.pc = 1;
        m.relative_base = 12;
        m.state = State::Halted;

        m.reset();

        assert_eq!(m.read_memory(1), Ok(0));
        assert_eq!(m.read_memory(100), Ok(0));
        assert_eq!(m.pc(), 0);
        assert_eq!(m.relative_base(), 0);
        assert_eq!(m.state(), State::Paused);
        assert!(!m.has_input());
        assert!(!m.has_output());
        assert_eq!(m.program().cells(), &[99, 0]);
    }

    #[test]
    fn driver_access_errors_report_current_pc() {
        let mut m = Machine::with_capacity(Program::new(vec![1101, 0, 0, 0, 99]), 5).unwrap();
        m.run(Some(1)).unwrap();
        assert_eq!(
            m.read_memory(9),
            Err(RuntimeError::AddressOutOfRange {
                at: 4,
                address: 9,
                capacity: 5
            })
        );
    }

    #[test]
    fn decode_current_reads_at_pc() {
        let m = machine(vec![1101, 2, 3, 0, 99]);
        let instr = m.decode_current().unwrap();
        assert_eq!(instr.opcode, intcode_common::Opcode::Add);
    }

    #[test]
    fn state_display() {
        assert_eq!(State::WaitingForInput.to_string(), "waiting for input");
        assert_eq!(State::Halted.to_string(), "halted");
    }
}
