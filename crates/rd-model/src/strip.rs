//! Reel strips — fixed circular symbol sequences

use serde::{Deserialize, Serialize};

use crate::symbol::SymbolId;

/// A reel strip: the fixed, circular sequence of symbols on one reel.
///
/// Immutable after configuration load. Indexing wraps with modulo, so the
/// visible window at stop index `s` is `symbol_at(s + row)` for each row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelStrip {
    /// Symbol ids in strip order
    symbols: Vec<SymbolId>,
}

impl ReelStrip {
    /// Create a new strip
    pub fn new(symbols: Vec<SymbolId>) -> Self {
        Self { symbols }
    }

    /// Build a strip from string ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(|s| SymbolId::new(s)).collect())
    }

    /// Symbol at a position, wrapping around the strip
    pub fn symbol_at(&self, position: usize) -> &SymbolId {
        &self.symbols[position % self.symbols.len()]
    }

    /// Strip length
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All strip positions holding the given symbol, in strip order
    pub fn positions_of(&self, symbol: &SymbolId) -> Vec<usize> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| *s == symbol)
            .map(|(i, _)| i)
            .collect()
    }

    /// Iterate the strip once
    pub fn iter(&self) -> impl Iterator<Item = &SymbolId> {
        self.symbols.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_at_wraps() {
        let strip = ReelStrip::from_ids(["A", "B", "C", "D", "E"]);
        assert_eq!(strip.symbol_at(0).as_str(), "A");
        assert_eq!(strip.symbol_at(5).as_str(), "A");
        assert_eq!(strip.symbol_at(7).as_str(), "C");
    }

    #[test]
    fn positions_of_finds_all_occurrences() {
        let strip = ReelStrip::from_ids(["A", "B", "A", "C", "A"]);
        assert_eq!(strip.positions_of(&SymbolId::new("A")), vec![0, 2, 4]);
        assert!(strip.positions_of(&SymbolId::new("Z")).is_empty());
    }
}
