//! Fetch/decode/execute loop and opcode dispatch.

use crate::error::RuntimeError;
use crate::machine::{Machine, State};
use intcode_common::{Cell, Instruction, Mode, Opcode, Operand};
use tracing::{debug, trace};

impl Machine {
    /// Execute until the machine halts, blocks on I/O, or `budget`
    /// instructions have been executed.
    ///
    /// Returns the state the machine stopped in: [`State::Halted`],
    /// [`State::WaitingForInput`], [`State::WaitingForOutput`], or
    /// [`State::Paused`] when the budget ran out. `Some(0)` executes nothing.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::Halted`] if the machine has already halted, or any
    /// fault raised by the instruction being executed. After a fault the
    /// machine is left [`State::Paused`] with PC on the faulting instruction.
    pub fn run(&mut self, budget: Option<u64>) -> Result<State, RuntimeError> {
        if self.state == State::Halted {
            return Err(RuntimeError::Halted);
        }

        self.state = State::Executing;
        let mut remaining = budget;

        while self.state == State::Executing {
            if remaining == Some(0) {
                self.state = State::Paused;
                break;
            }

            if let Err(e) = self.step() {
                self.state = State::Paused;
                return Err(e);
            }

            if let Some(n) = remaining.as_mut() {
                *n -= 1;
            }
        }

        Ok(self.state)
    }

    /// Decode and execute the instruction at PC.
    fn step(&mut self) -> Result<(), RuntimeError> {
        let instr = Instruction::decode(self.memory.cells(), self.pc)?;
        trace!(
            pc = self.pc,
            relative_base = self.relative_base,
            op = instr.opcode.mnemonic(),
            operands = ?instr.operands(),
            "step"
        );
        self.steps += 1;

        let [a, b, c] = instr.operands;
        match instr.opcode {
            Opcode::Add => self.exec_binary(a, b, c, |x, y| x.wrapping_add(y))?,
            Opcode::Mul => self.exec_binary(a, b, c, |x, y| x.wrapping_mul(y))?,
            Opcode::Slt => self.exec_binary(a, b, c, |x, y| Cell::from(x < y))?,
            Opcode::Seq => self.exec_binary(a, b, c, |x, y| Cell::from(x == y))?,
            Opcode::In => self.exec_in(a)?,
            Opcode::Out => self.exec_out(a)?,
            Opcode::Jnz => self.exec_jump(a, b, |v| v != 0)?,
            Opcode::Jz => self.exec_jump(a, b, |v| v == 0)?,
            Opcode::Rbaddr => {
                let delta = self.read_operand(a)?;
                self.relative_base = self.relative_base.wrapping_add(delta);
                self.pc += instr.width();
            }
            Opcode::Halt => {
                self.state = State::Halted;
                self.pc += instr.width();
                debug!(pc = self.pc, steps = self.steps, "halted");
            }
        }

        Ok(())
    }

    /// `dst = op(lhs, rhs)`. Width 4.
    fn exec_binary(
        &mut self,
        lhs: Operand,
        rhs: Operand,
        dst: Operand,
        op: impl Fn(Cell, Cell) -> Cell,
    ) -> Result<(), RuntimeError> {
        let x = self.read_operand(lhs)?;
        let y = self.read_operand(rhs)?;
        self.write_operand(dst, op(x, y))?;
        self.pc += Opcode::Add.width();
        Ok(())
    }

    fn exec_in(&mut self, dst: Operand) -> Result<(), RuntimeError> {
        let Some(value) = self.input else {
            // PC stays on the `in`; it is decoded again on the next run.
            self.state = State::WaitingForInput;
            debug!(pc = self.pc, "waiting for input");
            return Ok(());
        };

        self.write_operand(dst, value)?;
        self.input = None;
        self.pc += Opcode::In.width();
        Ok(())
    }

    fn exec_out(&mut self, src: Operand) -> Result<(), RuntimeError> {
        if self.output.is_some() {
            // Previous value not drained yet. Re-block without overwriting.
            self.state = State::WaitingForOutput;
            debug!(pc = self.pc, "output slot still full");
            return Ok(());
        }

        let value = self.read_operand(src)?;
        self.output = Some(value);
        self.pc += Opcode::Out.width();
        self.state = State::WaitingForOutput;
        debug!(pc = self.pc, value, "output ready");
        Ok(())
    }

    fn exec_jump(
        &mut self,
        test: Operand,
        target: Operand,
        taken: impl Fn(Cell) -> bool,
    ) -> Result<(), RuntimeError> {
        let value = self.read_operand(test)?;
        if taken(value) {
            let address = self.read_operand(target)?;
            self.pc = self.memory.index(address, self.pc)?;
        } else {
            self.pc += Opcode::Jnz.width();
        }
        Ok(())
    }

    /// Effective address of a positional or relative operand.
    fn address(&self, operand: Operand) -> Result<Cell, RuntimeError> {
        match operand.mode {
            Mode::Positional => Ok(operand.value),
            // Saturation lands outside memory, so overflow still faults.
            Mode::Relative => Ok(self.relative_base.saturating_add(operand.value)),
            Mode::Immediate | Mode::None => Err(RuntimeError::NotAddressable {
                at: self.pc,
                mode: operand.mode,
            }),
        }
    }

    fn read_operand(&self, operand: Operand) -> Result<Cell, RuntimeError> {
        match operand.mode {
            Mode::Immediate => Ok(operand.value),
            _ => {
                let address = self.address(operand)?;
                self.memory.read(address, self.pc)
            }
        }
    }

    fn write_operand(&mut self, operand: Operand, value: Cell) -> Result<(), RuntimeError> {
        let address = self.address(operand)?;
        self.memory.write(address, value, self.pc)
    }
}
