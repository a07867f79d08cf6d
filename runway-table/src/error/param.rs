//! URL parameter error types

/// Errors that can occur when reading a typed value out of URL parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// The parameter held something other than a non-negative integer.
    #[error("Parameter '{name}' is not a valid number: {value:?}")]
    InvalidNumber { name: String, value: String },

    /// The parameter was a number but outside its allowed range.
    #[error("Parameter '{name}' is out of range: {value}")]
    OutOfRange { name: String, value: usize },
}

impl ParamError {
    /// Creates a new invalid number error.
    pub fn invalid_number(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a new out of range error.
    pub fn out_of_range(name: impl Into<String>, value: usize) -> Self {
        Self::OutOfRange {
            name: name.into(),
            value,
        }
    }
}
