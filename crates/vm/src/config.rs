//! Machine configuration.

/// Memory capacity used when none is given, in cells.
pub const DEFAULT_MEMORY_SIZE: usize = 16384;

/// Settings for building and driving a [`Machine`](crate::Machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of cells in the memory image. Must be at least the program length.
    pub memory_size: usize,
    /// Maximum instructions the batch driver executes before giving up.
    /// `None` runs until the program halts.
    pub step_limit: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            step_limit: None,
        }
    }
}

impl MachineConfig {
    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = Some(step_limit);
        self
    }
}
