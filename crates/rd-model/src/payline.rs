//! Payline definitions

use serde::{Deserialize, Serialize};

/// A payline: one row index per reel, read left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Row position for each reel (e.g. `[1, 0, 0, 0, 1]` for a shallow "V")
    pub rows: Vec<u8>,
}

impl Payline {
    pub fn new(index: u8, rows: Vec<u8>) -> Self {
        Self { index, rows }
    }

    /// A straight line (same row across all reels)
    pub fn straight(index: u8, row: u8, reel_count: u8) -> Self {
        Self {
            index,
            rows: vec![row; reel_count as usize],
        }
    }

    /// Whether this line fits a grid of the given shape. Invalid lines are
    /// skipped at evaluation time rather than failing the spin.
    pub fn is_valid_for(&self, reels: u8, rows: u8) -> bool {
        self.rows.len() == reels as usize && self.rows.iter().all(|&r| r < rows)
    }
}

/// The default 10-line set for a 5×3 grid.
pub fn standard_10_paylines() -> Vec<Payline> {
    vec![
        // Straight lines
        Payline::straight(0, 1, 5), // Middle
        Payline::straight(1, 0, 5), // Top
        Payline::straight(2, 2, 5), // Bottom
        // V shapes
        Payline::new(3, vec![0, 1, 2, 1, 0]),
        Payline::new(4, vec![2, 1, 0, 1, 2]),
        // Zigzag
        Payline::new(5, vec![0, 0, 1, 2, 2]),
        Payline::new(6, vec![2, 2, 1, 0, 0]),
        Payline::new(7, vec![1, 0, 0, 0, 1]),
        Payline::new(8, vec![1, 2, 2, 2, 1]),
        // W shape
        Payline::new(9, vec![0, 1, 0, 1, 0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_repeats_row() {
        let line = Payline::straight(0, 1, 5);
        assert_eq!(line.rows, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn validity_checks_arity_and_range() {
        let line = Payline::new(0, vec![0, 1, 2, 1, 0]);
        assert!(line.is_valid_for(5, 3));
        assert!(!line.is_valid_for(4, 3)); // wrong reel count
        assert!(!line.is_valid_for(5, 2)); // row 2 out of range
    }

    #[test]
    fn standard_set_is_valid_for_5x3() {
        for line in standard_10_paylines() {
            assert!(line.is_valid_for(5, 3), "line {} invalid", line.index);
        }
    }
}
