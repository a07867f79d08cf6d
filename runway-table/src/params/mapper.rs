//! Typed table state to and from URL parameters.
//!
//! Every getter is fail-open: missing or malformed parameters yield the
//! default state. Every setter returns a new parameter set in which the keys
//! it owns were removed and then re-added only when they differ from the
//! default, so URLs stay minimal.

use log::debug;

use super::UrlParams;
use super::codec::decode_column_filters;
use super::codec::encode_column_filters;
use super::keys;
use super::prefixed_name;
use crate::error::ParamError;
use crate::state::ColumnFilter;
use crate::state::ColumnFiltersState;
use crate::state::PaginationState;
use crate::state::SortEntry;
use crate::state::SortingState;
use crate::state::TableState;

fn parse_count(name: &str, value: &str) -> Result<usize, ParamError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ParamError::invalid_number(name, value))
}

fn read_count(params: &UrlParams, name: &str, default: usize, allow_zero: bool) -> usize {
    let Some(raw) = params.get_str(name) else {
        return default;
    };
    if raw.is_empty() {
        return default;
    }
    let parsed = parse_count(name, raw).and_then(|value| {
        if value == 0 && !allow_zero {
            Err(ParamError::out_of_range(name, value))
        } else {
            Ok(value)
        }
    });
    match parsed {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring pagination parameter: {}", e);
            default
        }
    }
}

/// Reads `pageSize` / `pageIndex`.
pub fn get_pagination_params(
    params: &UrlParams,
    default_page_size: usize,
    prefix: Option<&str>,
) -> PaginationState {
    let page_size_name = prefixed_name(keys::PAGE_SIZE, prefix);
    let page_index_name = prefixed_name(keys::PAGE_INDEX, prefix);

    PaginationState::new(
        read_count(params, &page_index_name, 0, true),
        read_count(params, &page_size_name, default_page_size, false),
    )
}

/// Writes `pageSize` / `pageIndex`, omitting the default size and page zero.
pub fn set_pagination_params(
    state: &PaginationState,
    params: &UrlParams,
    default_page_size: usize,
    prefix: Option<&str>,
) -> UrlParams {
    let page_size_name = prefixed_name(keys::PAGE_SIZE, prefix);
    let page_index_name = prefixed_name(keys::PAGE_INDEX, prefix);

    let mut next = params.clone();
    next.remove(&page_size_name);
    next.remove(&page_index_name);
    if state.page_size != default_page_size {
        next.insert(page_size_name, state.page_size.to_string());
    }
    if state.page_index != 0 {
        next.insert(page_index_name, state.page_index.to_string());
    }
    next
}

/// Reads the parallel `sortCol[]` / `sortDesc[]` arrays.
///
/// Arrays of different lengths are treated as no sorting at all.
pub fn get_sort_params(params: &UrlParams, prefix: Option<&str>) -> SortingState {
    let sort_col_name = prefixed_name(keys::SORT_COL, prefix);
    let sort_desc_name = prefixed_name(keys::SORT_DESC, prefix);

    let cols = params.get_all(&sort_col_name);
    let descs = params.get_all(&sort_desc_name);

    if cols.is_empty() {
        return Vec::new();
    }
    if cols.len() != descs.len() {
        debug!(
            "Ignoring sort parameters: {} columns but {} directions",
            cols.len(),
            descs.len()
        );
        return Vec::new();
    }

    cols.iter()
        .zip(descs)
        .map(|(col, desc)| SortEntry {
            id: col.clone(),
            desc: desc == "true",
        })
        .collect()
}

/// Writes the parallel `sortCol[]` / `sortDesc[]` arrays.
pub fn set_sort_params(state: &[SortEntry], params: &UrlParams, prefix: Option<&str>) -> UrlParams {
    let sort_col_name = prefixed_name(keys::SORT_COL, prefix);
    let sort_desc_name = prefixed_name(keys::SORT_DESC, prefix);

    let mut next = params.clone();
    next.remove(&sort_col_name);
    next.remove(&sort_desc_name);
    for sort in state {
        next.push(sort_col_name.clone(), sort.id.clone());
        next.push(sort_desc_name.clone(), sort.desc.to_string());
    }
    next
}

/// Reads the global search text. Absent and empty both mean no filter.
pub fn get_global_filter_param(params: &UrlParams, prefix: Option<&str>) -> Option<String> {
    let name = prefixed_name(keys::SEARCH, prefix);
    params
        .get_str(&name)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Writes the global search text, removing the key for an empty search.
pub fn set_global_filter_param(
    state: Option<&str>,
    params: &UrlParams,
    prefix: Option<&str>,
) -> UrlParams {
    let name = prefixed_name(keys::SEARCH, prefix);
    let mut next = params.clone();
    next.remove(&name);
    if let Some(search) = state.filter(|s| !s.is_empty()) {
        next.insert(name, search);
    }
    next
}

/// Reads the encoded column filters.
pub fn get_column_filter_param(params: &UrlParams, prefix: Option<&str>) -> ColumnFiltersState {
    let name = prefixed_name(keys::COLUMN_FILTER, prefix);
    match params.get_str(&name) {
        Some(value) if !value.is_empty() => decode_column_filters(value),
        _ => Vec::new(),
    }
}

/// Writes the encoded column filters, removing the key when there are none.
pub fn set_column_filter_param(
    state: &[ColumnFilter],
    params: &UrlParams,
    prefix: Option<&str>,
) -> UrlParams {
    let name = prefixed_name(keys::COLUMN_FILTER, prefix);
    let mut next = params.clone();
    next.remove(&name);
    if !state.is_empty() {
        next.insert(name, encode_column_filters(state));
    }
    next
}

/// Reads every URL-backed part of a table's state.
///
/// Row selection and expansion are not URL-backed and come back empty.
pub fn read_table_state(
    params: &UrlParams,
    default_page_size: usize,
    prefix: Option<&str>,
) -> TableState {
    TableState {
        pagination: get_pagination_params(params, default_page_size, prefix),
        sorting: get_sort_params(params, prefix),
        column_filters: get_column_filter_param(params, prefix),
        global_filter: get_global_filter_param(params, prefix),
        ..TableState::default()
    }
}

/// Writes every URL-backed part of a table's state.
pub fn write_table_state(
    state: &TableState,
    params: &UrlParams,
    default_page_size: usize,
    prefix: Option<&str>,
) -> UrlParams {
    let next = set_pagination_params(&state.pagination, params, default_page_size, prefix);
    let next = set_sort_params(&state.sorting, &next, prefix);
    let next = set_column_filter_param(&state.column_filters, &next, prefix);
    set_global_filter_param(state.global_filter.as_deref(), &next, prefix)
}
