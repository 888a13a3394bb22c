//! Instruction decoding for the Intcode instruction set.
//!
//! An instruction is variable width. Its first cell encodes the opcode and
//! up to three addressing-mode digits:
//! ```text
//!   ABCDE
//!   A      mode of operand 2 (ten-thousands digit)
//!    B     mode of operand 1 (thousands digit)
//!     C    mode of operand 0 (hundreds digit)
//!      DE  opcode (low two digits)
//! ```
//! The next `operand_count` cells are the raw operand values.
//!
//! Decoding is pure: it reads memory and returns a fresh [`Instruction`]
//! without touching any machine state. A blocked `in` is therefore retried
//! by decoding the same address again.

use crate::error::DecodeError;
use crate::mode::Mode;
use crate::opcode::Opcode;
use crate::Cell;

/// Maximum number of operands any opcode consumes.
pub const MAX_OPERANDS: usize = 3;

/// A raw operand value paired with its addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub mode: Mode,
    pub value: Cell,
}

impl Operand {
    /// An unused operand slot.
    pub const NONE: Operand = Operand {
        mode: Mode::None,
        value: 0,
    };

    pub fn new(mode: Mode, value: Cell) -> Self {
        Self { mode, value }
    }
}

/// A single decoded Intcode instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Operand slots. Slots past `opcode.operand_count()` are [`Operand::NONE`].
    pub operands: [Operand; MAX_OPERANDS],
}

impl Instruction {
    /// Create an instruction from its opcode and consumed operands.
    ///
    /// # Panics
    ///
    /// Panics if `operands.len()` differs from `opcode.operand_count()`.
    pub fn new(opcode: Opcode, operands: &[Operand]) -> Self {
        assert_eq!(
            operands.len(),
            opcode.operand_count(),
            "{} takes {} operand(s)",
            opcode.mnemonic(),
            opcode.operand_count()
        );
        let mut slots = [Operand::NONE; MAX_OPERANDS];
        slots[..operands.len()].copy_from_slice(operands);
        Self {
            opcode,
            operands: slots,
        }
    }

    /// Decode the instruction starting at `memory[pc]`.
    ///
    /// Reads exactly `1 + operand_count` cells. Mode digits of unconsumed
    /// slots are ignored.
    pub fn decode(memory: &[Cell], pc: usize) -> Result<Self, DecodeError> {
        let head = *memory.get(pc).ok_or(DecodeError::Truncated {
            at: pc,
            width: 1,
            len: memory.len(),
        })?;

        let opcode =
            Opcode::try_from(head % 100).map_err(|value| DecodeError::UnknownOpcode { at: pc, value })?;

        let width = opcode.width();
        let raw = memory
            .get(pc + 1..pc + width)
            .ok_or(DecodeError::Truncated {
                at: pc,
                width,
                len: memory.len(),
            })?;

        let mut operands = [Operand::NONE; MAX_OPERANDS];
        let mut divisor = 100;
        for (index, &value) in raw.iter().enumerate() {
            let digit = (head / divisor) % 10;
            let mode = Mode::try_from(digit).map_err(|digit| DecodeError::InvalidMode {
                at: pc,
                operand: index,
                digit,
            })?;
            operands[index] = Operand::new(mode, value);
            divisor *= 10;
        }

        Ok(Self { opcode, operands })
    }

    /// The operands this opcode consumes.
    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.opcode.operand_count()]
    }

    /// Cells occupied by this instruction.
    pub fn width(&self) -> usize {
        self.opcode.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(value: Cell) -> Operand {
        Operand::new(Mode::Positional, value)
    }

    fn imm(value: Cell) -> Operand {
        Operand::new(Mode::Immediate, value)
    }

    fn rel(value: Cell) -> Operand {
        Operand::new(Mode::Relative, value)
    }

    // --- Mode digits ---

    #[test]
    fn decode_all_positional() {
        let instr = Instruction::decode(&[1, 9, 10, 3], 0).unwrap();
        assert_eq!(
            instr,
            Instruction::new(Opcode::Add, &[pos(9), pos(10), pos(3)])
        );
    }

    #[test]
    fn decode_mixed_modes_read_left_to_right() {
        // 1002: op0 positional, op1 immediate, op2 positional
        let instr = Instruction::decode(&[1002, 4, 3, 4, 33], 0).unwrap();
        assert_eq!(instr.opcode, Opcode::Mul);
        assert_eq!(instr.operands(), &[pos(4), imm(3), pos(4)]);
    }

    #[test]
    fn decode_relative_in_third_slot() {
        let instr = Instruction::decode(&[21101, 1, 2, -3], 0).unwrap();
        assert_eq!(instr.operands(), &[imm(1), imm(2), rel(-3)]);
    }

    #[test]
    fn decode_at_nonzero_pc() {
        let memory = [99, 99, 104, 1125899906842624, 99];
        let instr = Instruction::decode(&memory, 2).unwrap();
        assert_eq!(instr, Instruction::new(Opcode::Out, &[imm(1125899906842624)]));
    }

    #[test]
    fn halt_consumes_no_operands() {
        let instr = Instruction::decode(&[99], 0).unwrap();
        assert_eq!(instr.opcode, Opcode::Halt);
        assert!(instr.operands().is_empty());
        assert_eq!(instr.operands, [Operand::NONE; MAX_OPERANDS]);
        assert_eq!(instr.width(), 1);
    }

    #[test]
    fn unused_slots_are_none_even_with_mode_digits() {
        // 22204: out with stray digits in the unused slots.
        let instr = Instruction::decode(&[22204, 5], 0).unwrap();
        assert_eq!(instr.operands[0], rel(5));
        assert_eq!(instr.operands[1], Operand::NONE);
        assert_eq!(instr.operands[2], Operand::NONE);
    }

    #[test]
    fn stray_invalid_digit_in_unused_slot_is_ignored() {
        let instr = Instruction::decode(&[90109, 7], 0).unwrap();
        assert_eq!(instr, Instruction::new(Opcode::Rbaddr, &[imm(7)]));
    }

    #[test]
    fn input_consumes_one_operand() {
        let instr = Instruction::decode(&[203, -1], 0).unwrap();
        assert_eq!(instr, Instruction::new(Opcode::In, &[rel(-1)]));
        assert_eq!(instr.width(), 2);
    }

    // --- Rejection ---

    #[test]
    fn decode_rejects_unknown_opcode() {
        assert_eq!(
            Instruction::decode(&[1, 0, 0, 0, 42], 4),
            Err(DecodeError::UnknownOpcode { at: 4, value: 42 })
        );
    }

    #[test]
    fn decode_rejects_negative_head() {
        assert_eq!(
            Instruction::decode(&[-1], 0),
            Err(DecodeError::UnknownOpcode { at: 0, value: -1 })
        );
    }

    #[test]
    fn decode_rejects_invalid_mode_digit() {
        assert_eq!(
            Instruction::decode(&[1301, 0, 0, 0], 0),
            Err(DecodeError::InvalidMode {
                at: 0,
                operand: 0,
                digit: 3
            })
        );
        assert_eq!(
            Instruction::decode(&[90001, 0, 0, 0], 0),
            Err(DecodeError::InvalidMode {
                at: 0,
                operand: 2,
                digit: 9
            })
        );
    }

    #[test]
    fn decode_rejects_truncated_operands() {
        assert_eq!(
            Instruction::decode(&[1, 0, 0], 0),
            Err(DecodeError::Truncated {
                at: 0,
                width: 4,
                len: 3
            })
        );
    }

    #[test]
    fn decode_rejects_pc_past_end() {
        assert_eq!(
            Instruction::decode(&[99], 1),
            Err(DecodeError::Truncated {
                at: 1,
                width: 1,
                len: 1
            })
        );
    }

    #[test]
    #[should_panic(expected = "add takes 3 operand(s)")]
    fn new_rejects_wrong_operand_count() {
        Instruction::new(Opcode::Add, &[pos(0)]);
    }
}
