//! Symbol identifiers

use serde::{Deserialize, Serialize};

/// A symbol identifier, e.g. `"FACE1"`, `"CUP"`, `"SCATTER"`.
///
/// Strips, the paytable and the grid all speak in these ids; what a symbol
/// looks like is the presentation layer's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub String);

impl SymbolId {
    /// Create a new symbol id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SymbolId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
