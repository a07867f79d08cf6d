//! Column definitions

use serde::Deserialize;
use serde::Serialize;

/// Filter type tag of a column.
///
/// Selects the filter widget, the shape of the column's
/// [`FilterValue`](crate::state::FilterValue) and the predicate used to
/// evaluate it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    /// Range over epoch milliseconds.
    Date,
    /// Range over seconds.
    Duration,
    /// Range over raw numbers.
    Number,
    /// Equality against one of the column's distinct values.
    Options,
    /// Equality against a typed string.
    StrEquals,
    /// No column filter; only reachable through the global search.
    #[default]
    Text,
}

impl ColumnType {
    /// Returns `true` for column types filtered by a `[min, max]` range.
    pub fn is_range(self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::Duration | ColumnType::Number)
    }
}

/// Definition of one table column.
///
/// # Example
///
/// ```
/// use runway_table::model::{ColumnDef, ColumnType};
///
/// let columns = vec![
///     ColumnDef::new("name", "Name"),
///     ColumnDef::new("status", "Status").with_type(ColumnType::Options),
///     ColumnDef::new("createdOn", "Created").with_type(ColumnType::Date),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column identifier, used in URL state and as the row value key.
    pub id: String,
    /// Display header.
    pub header: String,
    /// Filter type tag.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Whether the column can be sorted.
    #[serde(default = "default_true")]
    pub sortable: bool,
    /// Whether the global search looks at this column.
    #[serde(default = "default_true")]
    pub searchable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDef {
    /// Creates a sortable, searchable text column.
    pub fn new(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            column_type: ColumnType::Text,
            sortable: true,
            searchable: true,
        }
    }

    /// Sets the filter type tag.
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Disables sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Excludes this column from the global search.
    pub fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }
}

/// Finds a column by id.
pub fn find_column<'a>(columns: &'a [ColumnDef], id: &str) -> Option<&'a ColumnDef> {
    columns.iter().find(|column| column.id == id)
}
