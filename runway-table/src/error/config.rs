//! Table configuration error types

/// Errors reported by [`TableConfig::validate`](crate::TableConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No page sizes were configured.
    #[error("At least one page size is required")]
    NoPageSizes,

    /// A configured page size was zero.
    #[error("Page sizes must be positive")]
    ZeroPageSize,

    /// The query key prefix was empty or contained characters that clash with
    /// the key separator.
    #[error("Invalid query key prefix: {0:?}")]
    InvalidPrefix(String),

    /// The UTC offset used for date inputs is not a real offset.
    #[error("UTC offset out of range: {0} minutes")]
    InvalidUtcOffset(i32),
}
