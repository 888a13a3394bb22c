//! The memory image: a fixed-capacity, zero-initialised array of cells.

use crate::error::RuntimeError;
use intcode_common::{Cell, Program};

/// Bounds-checked cell storage owned by one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Cell>,
}

impl Memory {
    /// Allocate `capacity` zeroed cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity],
        }
    }

    /// Zero every cell, then copy `program` into the low addresses.
    ///
    /// The caller guarantees `program.len() <= capacity`.
    pub fn load(&mut self, program: &Program) {
        self.cells.fill(0);
        self.cells[..program.len()].copy_from_slice(program.cells());
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// The whole image, for the decoder.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert a signed address to an index, or fault.
    pub fn index(&self, address: Cell, at: usize) -> Result<usize, RuntimeError> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index < self.cells.len())
            .ok_or(RuntimeError::AddressOutOfRange {
                at,
                address,
                capacity: self.cells.len(),
            })
    }

    /// Read the cell at `address`. `at` is the faulting instruction's address.
    pub fn read(&self, address: Cell, at: usize) -> Result<Cell, RuntimeError> {
        let index = self.index(address, at)?;
        Ok(self.cells[index])
    }

    /// Write `value` to the cell at `address`.
    pub fn write(&mut self, address: Cell, value: Cell, at: usize) -> Result<(), RuntimeError> {
        let index = self.index(address, at)?;
        self.cells[index] = value;
        Ok(())
    }
}
