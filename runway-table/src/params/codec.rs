//! Column filter codec.
//!
//! Column filters travel in a single URL parameter as base64 of a JSON array
//! of `{"i": columnId, "v": value}` objects.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::error::CodecError;
use crate::state::ColumnFilter;
use crate::state::ColumnFiltersState;
use crate::state::FilterValue;
use crate::state::normalize_column_filters;

#[derive(Serialize, Deserialize)]
struct WireFilter {
    i: String,
    v: FilterValue,
}

/// Encodes column filters as base64 of `[{"i": .., "v": ..}, ..]`.
pub fn encode_column_filters(filters: &[ColumnFilter]) -> String {
    let wire: Vec<WireFilter> = filters
        .iter()
        .map(|filter| WireFilter {
            i: filter.id.clone(),
            v: filter.value.clone(),
        })
        .collect();
    // Strings, numbers and bools always serialize.
    let json = serde_json::to_string(&wire).unwrap_or_else(|_| "[]".to_string());
    STANDARD.encode(json)
}

/// Decodes column filters, reporting why a value could not be read.
///
/// The value may still be percent-encoded. A `+` turned into a space by a
/// careless copy/paste is restored before base64 decoding.
pub fn try_decode_column_filters(value: &str) -> Result<ColumnFiltersState, CodecError> {
    let unescaped = urlencoding::decode(value)?;
    let base64 = unescaped.trim().replace(' ', "+");
    let bytes = STANDARD.decode(base64.as_bytes())?;
    let json = std::str::from_utf8(&bytes)?;
    let wire: Vec<WireFilter> = serde_json::from_str(json)?;

    Ok(normalize_column_filters(
        wire.into_iter()
            .map(|item| ColumnFilter {
                id: item.i,
                value: item.v,
            })
            .collect(),
    ))
}

/// Decodes column filters, yielding an empty set for anything malformed.
///
/// A broken `colfilter` parameter silently clears the filters rather than
/// breaking the page.
pub fn decode_column_filters(value: &str) -> ColumnFiltersState {
    match try_decode_column_filters(value) {
        Ok(filters) => filters,
        Err(e) => {
            debug!("Discarding unreadable column filters {:?}: {}", value, e);
            Vec::new()
        }
    }
}
