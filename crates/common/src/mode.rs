//! Addressing modes for instruction operands.
//!
//! Mode digits sit in the hundreds, thousands, and ten-thousands places of
//! the instruction's first cell, for operands 0, 1, and 2 respectively.

use crate::Cell;

/// How an operand's raw value is turned into a value or an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// The operand is an address; read or write the cell there.
    Positional,
    /// The operand is the value itself. Never a valid write target.
    Immediate,
    /// The operand is an offset from the relative base.
    Relative,
    /// Slot not consumed by the opcode.
    None,
}

impl TryFrom<Cell> for Mode {
    /// The unrecognised digit.
    type Error = Cell;

    fn try_from(digit: Cell) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Mode::Positional),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            _ => Err(digit),
        }
    }
}

impl Mode {
    /// Whether an operand in this mode names a memory cell that can be
    /// written.
    pub fn is_writable(&self) -> bool {
        matches!(self, Mode::Positional | Mode::Relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_modes() {
        assert_eq!(Mode::try_from(0), Ok(Mode::Positional));
        assert_eq!(Mode::try_from(1), Ok(Mode::Immediate));
        assert_eq!(Mode::try_from(2), Ok(Mode::Relative));
    }

    #[test]
    fn other_digits_rejected() {
        for digit in 3..=9 {
            assert_eq!(Mode::try_from(digit), Err(digit));
        }
        assert_eq!(Mode::try_from(-1), Err(-1));
    }

    #[test]
    fn only_addressing_modes_are_writable() {
        assert!(Mode::Positional.is_writable());
        assert!(Mode::Relative.is_writable());
        assert!(!Mode::Immediate.is_writable());
        assert!(!Mode::None.is_writable());
    }
}
