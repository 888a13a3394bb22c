//! Program representation for Intcode cell streams.
//!
//! A program is the flat sequence of cells a machine is loaded with. Code
//! and data are not distinguished.

use std::fmt;

use crate::Cell;

/// An Intcode program: the cells copied into low memory on reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    cells: Vec<Cell>,
}

impl Program {
    /// Create a new program from a vector of cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The program's cells, lowest address first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the program.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the program has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<Cell>> for Program {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

/// Comma-separated cells, the same format the loader reads.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
