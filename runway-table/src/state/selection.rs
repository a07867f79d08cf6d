//! Row selection state.
//!
//! Selection is keyed by row id, so it stays stable while filters, sorting
//! and pagination change which rows are visible.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Selection mode of a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// No selection allowed
    #[default]
    None,
    /// Single row selection
    Single,
    /// Multiple rows can be selected
    Multiple,
}

impl SelectionMode {
    /// Mode used when row selection is enabled or disabled in config.
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        }
    }
}

/// Id-based row selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    selected: BTreeSet<String>,
}

impl RowSelection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from a `rowId -> selected` map, keeping only `true` entries.
    pub fn from_map(map: &BTreeMap<String, bool>) -> Self {
        Self {
            selected: map
                .iter()
                .filter(|(_, selected)| **selected)
                .map(|(id, _)| id.clone())
                .collect(),
        }
    }

    /// Returns the selection as a `rowId -> true` map.
    pub fn to_map(&self) -> BTreeMap<String, bool> {
        self.selected.iter().map(|id| (id.clone(), true)).collect()
    }

    /// Get all selected ids, sorted.
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Sets whether a row is selected.
    ///
    /// In [`SelectionMode::Single`] selecting a row deselects every other
    /// row; in [`SelectionMode::None`] nothing changes.
    pub fn set_selected(&mut self, id: &str, selected: bool, mode: SelectionMode) {
        match (mode, selected) {
            (SelectionMode::None, _) => {}
            (_, false) => {
                self.selected.remove(id);
            }
            (SelectionMode::Single, true) => {
                self.selected.clear();
                self.selected.insert(id.to_string());
            }
            (SelectionMode::Multiple, true) => {
                self.selected.insert(id.to_string());
            }
        }
    }

    /// Toggle selection of a row.
    pub fn toggle(&mut self, id: &str, mode: SelectionMode) {
        let selected = self.is_selected(id);
        self.set_selected(id, !selected, mode);
    }

    /// Select all rows from the provided ids.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.selected.extend(ids.into_iter().map(str::to_string));
    }

    /// Returns `true` if every one of `ids` is selected (and there is at least one).
    pub fn all_selected<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> bool {
        let mut any = false;
        for id in ids {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_replaces() {
        let mut selection = RowSelection::new();
        selection.toggle("a", SelectionMode::Single);
        selection.toggle("b", SelectionMode::Single);
        assert_eq!(selection.selected(), vec!["b".to_string()]);
    }

    #[test]
    fn test_multiple_mode_accumulates() {
        let mut selection = RowSelection::new();
        selection.toggle("a", SelectionMode::Multiple);
        selection.toggle("b", SelectionMode::Multiple);
        selection.toggle("a", SelectionMode::Multiple);
        assert_eq!(selection.selected(), vec!["b".to_string()]);
    }

    #[test]
    fn test_none_mode_ignores() {
        let mut selection = RowSelection::new();
        selection.toggle("a", SelectionMode::None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_map_round_trip() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), true);
        map.insert("b".to_string(), false);
        let selection = RowSelection::from_map(&map);
        assert_eq!(selection.len(), 1);
        assert!(selection.all_selected(["a"]));
        assert!(!selection.all_selected(std::iter::empty::<&str>()));
    }
}
