//! Column filter codec error types

/// Errors that can occur while decoding a `colfilter` parameter.
///
/// The public decoding path is fail-open and never surfaces these; they exist
/// so the cause of a discarded value can be logged and tested.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value was not valid percent-encoding.
    #[error("Invalid percent-encoding: {0}")]
    Percent(#[from] std::string::FromUtf8Error),

    /// The value was not valid base64.
    #[error("Invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes were not valid UTF-8.
    #[error("Decoded filter payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The decoded text was not the expected JSON shape.
    #[error("Invalid filter JSON: {0}")]
    Json(#[from] serde_json::Error),
}
