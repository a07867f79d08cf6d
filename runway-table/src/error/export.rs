//! Export error types

/// Errors that can occur while exporting rows.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing a CSV record failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered CSV was not valid UTF-8.
    #[error("Exported CSV is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
