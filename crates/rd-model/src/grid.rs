//! The derived symbol grid

use serde::{Deserialize, Serialize};

use crate::strip::ReelStrip;
use crate::symbol::SymbolId;

/// The visible symbol window, `[reel][row]`, derived from each reel's stop
/// index. Only meaningful when every reel is at rest — the engine guards
/// construction behind that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolGrid {
    cells: Vec<Vec<SymbolId>>,
}

impl SymbolGrid {
    /// Build the window from per-reel stop indices. Row `r` of reel `i` is
    /// `strips[i].symbol_at(stops[i] + r)`, wrapping around the strip.
    pub fn from_stops<S>(strips: &[S], stops: &[usize], rows: u8) -> Self
    where
        S: std::borrow::Borrow<ReelStrip>,
    {
        let cells = strips
            .iter()
            .zip(stops)
            .map(|(strip, &stop)| {
                (0..rows as usize)
                    .map(|row| strip.borrow().symbol_at(stop + row).clone())
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Build directly from cells (tests, scripted scenarios)
    pub fn from_cells(cells: Vec<Vec<SymbolId>>) -> Self {
        Self { cells }
    }

    /// Number of reels (columns)
    pub fn reels(&self) -> usize {
        self.cells.len()
    }

    /// Number of rows, zero for an empty grid
    pub fn rows(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Symbol at a cell
    pub fn symbol_at(&self, reel: usize, row: usize) -> &SymbolId {
        &self.cells[reel][row]
    }

    /// One reel's visible column, top to bottom
    pub fn column(&self, reel: usize) -> &[SymbolId] {
        &self.cells[reel]
    }
}
