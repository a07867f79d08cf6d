//! Sorting state

use serde::Deserialize;
use serde::Serialize;

/// One key of a multi-column sort.
///
/// # Example
///
/// ```
/// use runway_table::state::SortEntry;
///
/// // Newest first, then by name
/// let sorting = vec![SortEntry::desc("createdOn"), SortEntry::asc("name")];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortEntry {
    /// Column identifier.
    pub id: String,
    /// Whether the column sorts descending.
    pub desc: bool,
}

/// Sort keys in priority order (first = primary).
pub type SortingState = Vec<SortEntry>;

impl SortEntry {
    /// Creates an ascending sort on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: false,
        }
    }

    /// Creates a descending sort on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            desc: true,
        }
    }

    /// Returns the same column sorted the other way.
    pub fn flipped(&self) -> Self {
        Self {
            id: self.id.clone(),
            desc: !self.desc,
        }
    }
}
