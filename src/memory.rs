use std::collections::HashMap;

use crate::program::Program;

/// Sparse word-addressed memory. Addresses that were never written read as 0.
///
/// Programs routinely address far past their loaded extent, so memory is a
/// map rather than a buffer that would need resizing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    cells: HashMap<u64, i64>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, address: u64) -> i64 {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    pub fn set(&mut self, address: u64, value: i64) {
        self.cells.insert(address, value);
    }

    /// Number of addresses that have been loaded or written.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Dense copy of addresses `0..len`.
    pub fn to_vec(&self, len: usize) -> Vec<i64> {
        (0..len as u64).map(|address| self.get(address)).collect()
    }
}

impl From<&Program> for Memory {
    fn from(program: &Program) -> Self {
        let cells = program
            .words()
            .iter()
            .enumerate()
            .map(|(address, &word)| (address as u64, word))
            .collect();
        Self { cells }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritten_reads_zero() {
        let memory = Memory::new();
        assert_eq!(memory.get(0), 0);
        assert_eq!(memory.get(1 << 40), 0);
        assert!(memory.is_empty());
    }

    #[test]
    fn test_write_far_past_program() {
        let mut memory = Memory::from(&Program::from(vec![1, 2, 3]));
        memory.set(1_000_000, -7);
        assert_eq!(memory.get(1_000_000), -7);
        assert_eq!(memory.len(), 4);
    }

    #[test]
    fn test_loaded_from_program() {
        let memory = Memory::from(&Program::from(vec![1, 0, 0, 0, 99]));
        assert_eq!(memory.to_vec(5), vec![1, 0, 0, 0, 99]);
        // Reading past the end pads with zeros and materializes nothing.
        assert_eq!(memory.to_vec(7), vec![1, 0, 0, 0, 99, 0, 0]);
        assert_eq!(memory.len(), 5);
    }
}
