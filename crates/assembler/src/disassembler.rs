//! Disassembler: decoded instructions → human-readable text.
//!
//! Operand syntax:
//! ```text
//! [12]       positional
//! #12        immediate
//! [rb + 12]  relative, non-negative offset
//! [rb - 12]  relative, negative offset
//! ```

use intcode_common::{Instruction, Mode, Operand, Program};

/// Render one instruction as mnemonic plus operands, e.g. `add [4], #3, [rb + 2]`.
pub fn disassemble(instr: &Instruction) -> String {
    let operands: Vec<String> = instr.operands().iter().map(operand_text).collect();
    if operands.is_empty() {
        instr.opcode.mnemonic().to_string()
    } else {
        format!("{} {}", instr.opcode.mnemonic(), operands.join(", "))
    }
}

/// Disassemble a whole program by linear sweep from address 0.
///
/// One line per instruction, prefixed by its address. A cell that does not
/// decode becomes a `.data` line and the sweep moves on by one cell, so
/// data interleaved with code does not stop the listing.
pub fn listing(program: &Program) -> String {
    let cells = program.cells();
    let mut lines = Vec::new();
    let mut pc = 0;

    while pc < cells.len() {
        match Instruction::decode(cells, pc) {
            Ok(instr) => {
                lines.push(format!("{pc:>5}: {}", disassemble(&instr)));
                pc += instr.width();
            }
            Err(_) => {
                lines.push(format!("{pc:>5}: .data {}", cells[pc]));
                pc += 1;
            }
        }
    }

    let mut result = lines.join("\n");
    if !result.is_empty() {
        result.push('\n');
    }
    result
}

fn operand_text(operand: &Operand) -> String {
    match operand.mode {
        Mode::Positional => format!("[{}]", operand.value),
        Mode::Immediate => format!("#{}", operand.value),
        Mode::Relative if operand.value < 0 => {
            format!("[rb - {}]", operand.value.unsigned_abs())
        }
        Mode::Relative => format!("[rb + {}]", operand.value),
        Mode::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_common::Opcode;

    fn op(mode: Mode, value: i64) -> Operand {
        Operand::new(mode, value)
    }

    #[test]
    fn halt_has_no_operands() {
        assert_eq!(disassemble(&Instruction::new(Opcode::Halt, &[])), "halt");
    }

    #[test]
    fn all_three_modes() {
        let instr = Instruction::new(
            Opcode::Add,
            &[
                op(Mode::Positional, 4),
                op(Mode::Immediate, 3),
                op(Mode::Relative, 2),
            ],
        );
        assert_eq!(disassemble(&instr), "add [4], #3, [rb + 2]");
    }

    #[test]
    fn negative_relative_offset() {
        let instr = Instruction::new(Opcode::Out, &[op(Mode::Relative, -1)]);
        assert_eq!(disassemble(&instr), "out [rb - 1]");
    }

    #[test]
    fn relative_offset_at_minimum() {
        let instr = Instruction::new(Opcode::Rbaddr, &[op(Mode::Relative, i64::MIN)]);
        assert_eq!(disassemble(&instr), "rbaddr [rb - 9223372036854775808]");
    }

    #[test]
    fn negative_immediate() {
        let instr = Instruction::new(
            Opcode::Jz,
            &[op(Mode::Immediate, -7), op(Mode::Positional, 0)],
        );
        assert_eq!(disassemble(&instr), "jz #-7, [0]");
    }

    #[test]
    fn empty_listing() {
        assert_eq!(listing(&Program::default()), "");
    }

    #[test]
    fn listing_addresses_follow_widths() {
        let program = Program::new(vec![3, 9, 1002, 9, 2, 9, 4, 9, 99]);
        assert_eq!(
            listing(&program),
            "    0: in [9]\n    2: mul [9], #2, [9]\n    6: out [9]\n    8: halt\n"
        );
    }

    #[test]
    fn listing_marks_undecodable_cells_as_data() {
        let program = Program::new(vec![99, 0, 42, 104]);
        assert_eq!(
            listing(&program),
            "    0: halt\n    1: .data 0\n    2: .data 42\n    3: .data 104\n"
        );
    }
}
