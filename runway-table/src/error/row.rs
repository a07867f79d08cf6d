//! Row parsing error types

/// Errors that can occur when reading rows from JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    /// The dataset was not a JSON array.
    #[error("Expected a JSON array of rows")]
    NotAnArray,

    /// A row was not a JSON object.
    #[error("Expected a JSON object for each row")]
    NotAnObject,

    /// A row had no string or numeric `id` field.
    #[error("Row is missing an 'id' field")]
    MissingId,

    /// A field could not be read as its column's type.
    #[error("Row '{row}' has an invalid value for column '{column}'")]
    InvalidValue { row: String, column: String },
}

impl RowError {
    /// Creates a new invalid value error.
    pub fn invalid_value(row: impl Into<String>, column: impl Into<String>) -> Self {
        Self::InvalidValue {
            row: row.into(),
            column: column.into(),
        }
    }
}
