//! Backend query strings for server-side tables.
//!
//! The backend expects `col_gte=..&col_lte=..` for ranges, `col_eq=..` for
//! scalar filters, a 1-based `pageIndex`, and the same parallel
//! `sortCol[]` / `sortDesc[]` arrays the table keeps in its own URL.

use crate::row_model::RELEVANCE_COLUMN;
use crate::state::ColumnFilter;
use crate::state::ColumnFiltersState;
use crate::state::FilterValue;
use crate::state::SortEntry;
use crate::state::SortingState;
use crate::state::TableState;

/// Everything a backend needs to produce one page of rows.
///
/// Unset parts are left out of the query entirely.
///
/// # Example
///
/// ```
/// use runway_table::query::TableQuery;
/// use runway_table::state::ColumnFilter;
/// use runway_table::state::FilterValue;
///
/// let query = TableQuery::new()
///     .with_page_index(0)
///     .with_page_size(25)
///     .with_filter(vec![ColumnFilter::new("rows", FilterValue::at_least(10.0))]);
///
/// assert_eq!(query.to_query_string(), "rows_gte=10&pageIndex=1&pageSize=25");
/// assert_eq!(query.to_url("/api/jobs"), "/api/jobs?rows_gte=10&pageIndex=1&pageSize=25");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableQuery {
    /// Zero-based page index; sent 1-based.
    pub page_index: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<SortingState>,
    /// Column filters. The search term is only sent along with a filter list.
    pub filter: Option<ColumnFiltersState>,
    pub search: Option<String>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the query for a table's current state.
    pub fn from_state(state: &TableState) -> Self {
        Self {
            page_index: Some(state.pagination.page_index),
            page_size: Some(state.pagination.page_size),
            sort: Some(state.sorting.clone()),
            filter: Some(state.column_filters.clone()),
            search: state.global_filter.clone(),
        }
    }

    pub fn with_page_index(mut self, page_index: usize) -> Self {
        self.page_index = Some(page_index);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_sort(mut self, sort: SortingState) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, filter: ColumnFiltersState) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Renders the query without a leading `?`.
    pub fn to_query_string(&self) -> String {
        make_table_state_url_query(self)
    }

    /// Renders `{path}?{query}`.
    pub fn to_url(&self, path: &str) -> String {
        make_data_url(path, self)
    }
}

/// One query segment per filter: `id_gte=..&id_lte=..` for ranges (open
/// sides omitted) and `id_eq=..` (URL-encoded) for scalars.
///
/// A range with both sides open yields an empty segment.
pub fn make_filter_query(filters: &[ColumnFilter]) -> Vec<String> {
    filters
        .iter()
        .map(|filter| match &filter.value {
            FilterValue::Range(min, max) => [(min, "gte"), (max, "lte")]
                .into_iter()
                .filter_map(|(bound, op)| bound.map(|v| format!("{}_{}={}", filter.id, op, v)))
                .collect::<Vec<_>>()
                .join("&"),
            scalar => format!(
                "{}_eq={}",
                filter.id,
                urlencoding::encode(&scalar.to_display_string())
            ),
        })
        .collect()
}

/// One `sortCol[]=..&sortDesc[]=..` segment per sort key.
pub fn make_sort_query(sort: &[SortEntry]) -> Vec<String> {
    sort.iter()
        .map(|s| format!("sortCol[]={}&sortDesc[]={}", s.id, s.desc))
        .collect()
}

/// Renders a backend query: filters (plus the search as an `ftSearch`
/// filter), 1-based page index, page size, then sort keys.
pub fn make_table_state_url_query(query: &TableQuery) -> String {
    let mut segments = Vec::new();

    if let Some(filter) = &query.filter {
        let mut filter = filter.clone();
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            filter.push(ColumnFilter::new(RELEVANCE_COLUMN, search));
        }
        segments.extend(make_filter_query(&filter));
    }
    if let Some(page_index) = query.page_index {
        segments.push(format!("pageIndex={}", page_index + 1));
    }
    if let Some(page_size) = query.page_size {
        segments.push(format!("pageSize={}", page_size));
    }
    if let Some(sort) = &query.sort {
        segments.extend(make_sort_query(sort));
    }

    segments.retain(|segment| !segment.is_empty());
    segments.join("&")
}

/// Prefixes a rendered query with `{path}?`.
pub fn make_data_url(path: &str, query: &TableQuery) -> String {
    format!("{}?{}", path, make_table_state_url_query(query))
}
