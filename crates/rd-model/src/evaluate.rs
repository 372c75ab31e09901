//! Win evaluation — pure functions over the stopped grid
//!
//! No wild substitution in this core: a line's run breaks the moment the
//! symbol changes. Scatters are counted anywhere on the grid, independent of
//! paylines; the orchestrator decides what a qualifying count means.

use serde::{Deserialize, Serialize};

use crate::grid::SymbolGrid;
use crate::payline::Payline;
use crate::paytable::Paytable;
use crate::symbol::SymbolId;

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: u8,
    /// Winning symbol
    pub symbol: SymbolId,
    /// Consecutive match count from reel 0
    pub count: u8,
    /// Win amount (pay multiplier × bet-per-line)
    pub win_amount: f64,
    /// Winning cells, `(reel, row)`
    pub positions: Vec<(u8, u8)>,
}

/// Result of evaluating one stopped grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinResult {
    /// Total win across all qualifying lines
    pub total_win: f64,
    /// Per-line win records
    pub line_wins: Vec<LineWin>,
    /// Scatter symbols anywhere on the grid
    pub scatter_count: u8,
    /// Scatter cells, `(reel, row)`
    pub scatter_positions: Vec<(u8, u8)>,
}

impl WinResult {
    /// Check if anything paid
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Does the scatter count meet the feature threshold?
    pub fn qualifies_for_feature(&self, min_scatter_count: u8) -> bool {
        self.scatter_count >= min_scatter_count
    }
}

/// Evaluate one payline against the grid.
///
/// Pays only for a consecutive run of the *same* symbol from reel 0, run
/// length ≥ 3, and only if the paytable has an entry for that symbol at that
/// length. Lines that don't fit the grid are skipped with a warning.
pub fn line_win(
    grid: &SymbolGrid,
    line: &Payline,
    paytable: &Paytable,
    bet_per_line: f64,
) -> Option<LineWin> {
    if !line.is_valid_for(grid.reels() as u8, grid.rows() as u8) {
        log::warn!(
            "payline {} does not fit a {}x{} grid, skipping",
            line.index,
            grid.reels(),
            grid.rows()
        );
        return None;
    }

    let first = grid.symbol_at(0, line.rows[0] as usize);

    let mut count = 0u8;
    let mut positions = Vec::new();
    for (reel, &row) in line.rows.iter().enumerate() {
        if grid.symbol_at(reel, row as usize) != first {
            break;
        }
        count += 1;
        positions.push((reel as u8, row));
    }

    if count < 3 {
        return None;
    }

    let pay = paytable.pay_for(first, count);
    if pay <= 0.0 {
        return None;
    }

    Some(LineWin {
        line_index: line.index,
        symbol: first.clone(),
        count,
        win_amount: pay * bet_per_line,
        positions,
    })
}

/// Count scatter symbols anywhere on the grid
pub fn scatter_positions(grid: &SymbolGrid, scatter: &SymbolId) -> Vec<(u8, u8)> {
    let mut positions = Vec::new();
    for reel in 0..grid.reels() {
        for row in 0..grid.rows() {
            if grid.symbol_at(reel, row) == scatter {
                positions.push((reel as u8, row as u8));
            }
        }
    }
    positions
}

/// Evaluate the full grid: all paylines plus the scatter count.
///
/// Pure — applying the result to game state and driving presentation is the
/// orchestrator's responsibility.
pub fn evaluate_win(
    grid: &SymbolGrid,
    paylines: &[Payline],
    paytable: &Paytable,
    scatter: &SymbolId,
    bet_per_line: f64,
) -> WinResult {
    let line_wins: Vec<LineWin> = paylines
        .iter()
        .filter_map(|line| line_win(grid, line, paytable, bet_per_line))
        .collect();

    let total_win = line_wins.iter().map(|w| w.win_amount).sum();
    let scatter_positions = scatter_positions(grid, scatter);

    WinResult {
        total_win,
        line_wins,
        scatter_count: scatter_positions.len() as u8,
        scatter_positions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: [[&str; 5]; 3]) -> SymbolGrid {
        // rows are given visually (top/middle/bottom); transpose to [reel][row]
        let cells = (0..5)
            .map(|reel| (0..3).map(|row| SymbolId::new(rows[row][reel])).collect())
            .collect();
        SymbolGrid::from_cells(cells)
    }

    fn paytable() -> Paytable {
        Paytable::new()
            .with_entry("FACE1", &[5.0, 25.0, 100.0])
            .with_entry("CUP", &[2.0, 10.0, 40.0])
    }

    #[test]
    fn run_breaks_at_first_mismatch() {
        // Scenario: FACE1 on reels 0-2, CUP on reel 3, FACE1 again on reel 4.
        let grid = grid_from([
            ["RING", "RING", "RING", "RING", "RING"],
            ["FACE1", "FACE1", "FACE1", "CUP", "FACE1"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        let line = Payline::straight(0, 1, 5);

        let win = line_win(&grid, &line, &paytable(), 2.0).unwrap();
        assert_eq!(win.count, 3);
        assert_eq!(win.symbol.as_str(), "FACE1");
        assert_eq!(win.win_amount, 5.0 * 2.0);
        assert_eq!(win.positions, vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn no_paytable_entry_pays_zero() {
        let grid = grid_from([
            ["RING", "RING", "RING", "RING", "RING"],
            ["ANKH", "ANKH", "ANKH", "ANKH", "ANKH"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        let line = Payline::straight(0, 1, 5);
        // ANKH has no entry in this paytable
        assert!(line_win(&grid, &line, &paytable(), 1.0).is_none());
    }

    #[test]
    fn two_of_a_kind_is_not_a_win() {
        let grid = grid_from([
            ["RING", "RING", "RING", "RING", "RING"],
            ["FACE1", "FACE1", "CUP", "FACE1", "FACE1"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        let line = Payline::straight(0, 1, 5);
        assert!(line_win(&grid, &line, &paytable(), 1.0).is_none());
    }

    #[test]
    fn full_line_pays_five_of_a_kind() {
        let grid = grid_from([
            ["RING", "RING", "RING", "RING", "RING"],
            ["CUP", "CUP", "CUP", "CUP", "CUP"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        let line = Payline::straight(0, 1, 5);
        let win = line_win(&grid, &line, &paytable(), 1.0).unwrap();
        assert_eq!(win.count, 5);
        assert_eq!(win.win_amount, 40.0);
    }

    #[test]
    fn invalid_line_is_skipped() {
        let grid = grid_from([
            ["RING", "RING", "RING", "RING", "RING"],
            ["CUP", "CUP", "CUP", "CUP", "CUP"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        // Row 7 is out of range for 3 rows
        let bad = Payline::new(0, vec![7, 7, 7, 7, 7]);
        assert!(line_win(&grid, &bad, &paytable(), 1.0).is_none());

        // evaluate_win keeps going past the bad line
        let result = evaluate_win(
            &grid,
            &[bad, Payline::straight(1, 1, 5)],
            &paytable(),
            &SymbolId::new("SCATTER"),
            1.0,
        );
        assert_eq!(result.line_wins.len(), 1);
        assert_eq!(result.total_win, 40.0);
    }

    #[test]
    fn scatters_count_anywhere_on_the_grid() {
        let grid = grid_from([
            ["SCATTER", "RING", "RING", "RING", "RING"],
            ["FACE1", "FACE1", "SCATTER", "CUP", "FACE1"],
            ["RING", "RING", "RING", "SCATTER", "RING"],
        ]);
        let result = evaluate_win(
            &grid,
            &standard_lines(),
            &paytable(),
            &SymbolId::new("SCATTER"),
            1.0,
        );
        assert_eq!(result.scatter_count, 3);
        assert!(result.qualifies_for_feature(3));
        assert!(!result.qualifies_for_feature(4));
        assert_eq!(
            result.scatter_positions,
            vec![(0, 0), (2, 1), (3, 2)]
        );
    }

    fn standard_lines() -> Vec<Payline> {
        crate::payline::standard_10_paylines()
    }

    #[test]
    fn totals_sum_over_qualifying_lines() {
        let grid = grid_from([
            ["CUP", "CUP", "CUP", "RING", "RING"],
            ["FACE1", "FACE1", "FACE1", "FACE1", "CUP"],
            ["RING", "RING", "RING", "RING", "RING"],
        ]);
        let lines = vec![Payline::straight(0, 0, 5), Payline::straight(1, 1, 5)];
        let result = evaluate_win(
            &grid,
            &lines,
            &paytable(),
            &SymbolId::new("SCATTER"),
            1.0,
        );
        // CUP x3 on top (2.0) + FACE1 x4 on middle (25.0)
        assert_eq!(result.total_win, 27.0);
        assert_eq!(result.line_wins.len(), 2);
        assert!(result.is_win());
    }
}
