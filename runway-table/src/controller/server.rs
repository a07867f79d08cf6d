//! Controller for tables whose rows are filtered, sorted and paginated by a
//! backend.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Navigator;
use super::SettingsVisibility;
use super::shared::TableCore;
use crate::config::TableConfig;
use crate::model::ColumnDef;
use crate::model::ColumnType;
use crate::model::TableRow;
use crate::model::find_column;
use crate::params::UrlParams;
use crate::query::TableQuery;
use crate::row_model::RELEVANCE_COLUMN;
use crate::row_model::VisibleRow;
use crate::row_model::expand_rows;
use crate::state::ColumnFiltersState;
use crate::state::FilterValue;
use crate::state::PaginationState;
use crate::state::RowSelection;
use crate::state::SelectionMode;
use crate::state::SortingState;
use crate::state::TableState;
use crate::state::Updater;

/// Faceted data a backend reports for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetedValue {
    /// Numeric bounds, for range columns.
    Bounds { min: f64, max: f64 },
    /// Distinct values, for options columns.
    Values(Vec<String>),
}

/// Faceted data by column id.
pub type FacetedValues = BTreeMap<String, FacetedValue>;

/// Server-side table controller.
///
/// Works like [`TableController`](super::TableController), except that:
///
/// - `data` is already the current page and `row_count` is the backend's total
/// - every write stamps a `{prefix}_{concern}Touched=true` marker
/// - starting a search sorts by relevance first, clearing it drops that sort
/// - faceted values come from the backend
#[derive(Debug)]
pub struct ServerTableController<R> {
    core: TableCore,
    data: Vec<R>,
    row_count: usize,
    faceted_values: FacetedValues,
    expanded: BTreeMap<String, bool>,
}

impl<R: TableRow> ServerTableController<R> {
    pub fn new(
        config: TableConfig,
        columns: Vec<ColumnDef>,
        params: UrlParams,
        navigator: impl Navigator + 'static,
    ) -> Self {
        Self {
            core: TableCore::new(config, columns, params, Box::new(navigator), true),
            data: Vec::new(),
            row_count: 0,
            faceted_values: FacetedValues::new(),
            expanded: BTreeMap::new(),
        }
    }

    /// Hands row selection to the host, see
    /// [`TableController::with_controlled_selection`](super::TableController::with_controlled_selection).
    pub fn with_controlled_selection(
        mut self,
        selection: RowSelection,
        on_change: impl FnMut(&RowSelection) + Send + Sync + 'static,
    ) -> Self {
        self.core.control_selection(selection, Box::new(on_change));
        self
    }

    pub fn config(&self) -> &TableConfig {
        self.core.config()
    }

    /// Configured columns plus the synthetic relevance column.
    pub fn columns(&self) -> Vec<ColumnDef> {
        let mut columns = self.core.columns().to_vec();
        columns.push(ColumnDef::new(RELEVANCE_COLUMN, "Relevance").unsearchable());
        columns
    }

    /// Columns currently shown. The relevance column only shows during a search.
    pub fn visible_columns(&self) -> Vec<ColumnDef> {
        self.columns()
            .into_iter()
            .filter(|column| self.is_column_visible(&column.id))
            .collect()
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        column_id != RELEVANCE_COLUMN || self.core.global_filter().is_some()
    }

    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) {
        self.core.set_columns(columns);
    }

    pub fn params(&self) -> &UrlParams {
        self.core.params()
    }

    /// Rows of the current page as returned by the backend.
    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Replaces the current page of rows and the backend's total row count,
    /// moving back to the last page if the current one no longer exists.
    pub fn set_data(&mut self, data: Vec<R>, row_count: usize) {
        self.data = data;
        self.row_count = row_count;
        self.sync_page_bounds();
    }

    pub fn set_faceted_values(&mut self, faceted_values: FacetedValues) {
        self.faceted_values = faceted_values;
    }

    pub fn sync_from_url(&mut self, params: UrlParams) {
        self.core.sync_from_url(params);
        self.sync_page_bounds();
    }

    pub fn state(&self) -> TableState {
        let mut state = self.core.url_state();
        state.expanded = self.expanded.clone();
        state
    }

    /// The backend query for the current state.
    pub fn query(&self) -> TableQuery {
        TableQuery::from_state(&self.state())
    }

    /// `{path}?{query}` for the current state.
    pub fn data_url(&self, path: &str) -> String {
        self.query().to_url(path)
    }

    pub fn sorting(&self) -> SortingState {
        self.core.sorting()
    }

    pub fn column_filters(&self) -> ColumnFiltersState {
        self.core.column_filters()
    }

    pub fn global_filter(&self) -> Option<String> {
        self.core.global_filter()
    }

    pub fn pagination(&self) -> PaginationState {
        self.core.pagination()
    }

    pub fn set_sorting<'a>(&mut self, updater: impl Into<Updater<'a, SortingState>>) -> bool {
        self.core.set_sorting(updater)
    }

    pub fn set_column_filters<'a>(&mut self, updater: impl Into<Updater<'a, ColumnFiltersState>>) -> bool {
        self.core.set_column_filters(updater)
    }

    /// Sets the global search. Starting a search puts a descending relevance
    /// sort first; clearing it removes that sort.
    pub fn set_global_filter<'a>(&mut self, updater: impl Into<Updater<'a, Option<String>>>) -> bool {
        self.core.set_global_filter(updater)
    }

    pub fn clear_global_filter(&mut self) -> bool {
        self.set_global_filter(None)
    }

    pub fn set_pagination<'a>(&mut self, updater: impl Into<Updater<'a, PaginationState>>) -> bool {
        let changed = self.core.set_pagination(updater);
        self.sync_page_bounds() || changed
    }

    pub fn set_column_filter(&mut self, column_id: &str, value: Option<FilterValue>) -> bool {
        self.core.set_column_filter(column_id, value)
    }

    pub fn toggle_sort(&mut self, column_id: &str, multi: bool) -> bool {
        self.core.toggle_sort(column_id, multi)
    }

    pub fn remove_sort(&mut self, column_id: &str) -> bool {
        self.core.remove_sort(column_id)
    }

    /// Moves to a page, clamped to the last page of `row_count`.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let changed = self.core.set_page_index(page_index);
        self.sync_page_bounds() || changed
    }

    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let changed = self.core.set_page_size(page_size);
        self.sync_page_bounds() || changed
    }

    /// `ceil(row_count / page_size)`.
    pub fn page_count(&self) -> usize {
        self.pagination().page_count(self.row_count)
    }

    /// Moves to the last page when the current page index is past it.
    pub fn sync_page_bounds(&mut self) -> bool {
        let page_count = self.page_count();
        self.core.sync_page_bounds(page_count)
    }

    pub fn prune_stale(&mut self) -> bool {
        self.core.prune_stale()
    }

    /// Rows to show: the backend's page with expanded sub-rows inlined.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_, R>> {
        expand_rows(&self.data, &self.expanded)
    }

    fn column_type(&self, column_id: &str) -> Option<ColumnType> {
        find_column(self.core.columns(), column_id).map(|column| column.column_type)
    }

    /// Distinct values the backend reported for an options column.
    pub fn faceted_unique_values(&self, column_id: &str) -> BTreeMap<String, usize> {
        match (self.column_type(column_id), self.faceted_values.get(column_id)) {
            (Some(ColumnType::Options), Some(FacetedValue::Values(values))) => {
                values.iter().map(|value| (value.clone(), 1)).collect()
            }
            _ => BTreeMap::new(),
        }
    }

    /// Bounds the backend reported for a range column.
    pub fn faceted_min_max(&self, column_id: &str) -> Option<(f64, f64)> {
        match (self.column_type(column_id), self.faceted_values.get(column_id)) {
            (Some(column_type), Some(FacetedValue::Bounds { min, max })) if column_type.is_range() => {
                Some((*min, *max))
            }
            _ => None,
        }
    }

    pub fn settings(&self) -> &SettingsVisibility {
        self.core.settings()
    }

    pub fn settings_mut(&mut self) -> &mut SettingsVisibility {
        self.core.settings_mut()
    }

    pub fn pending_filter_column(&self) -> Option<&str> {
        self.core.pending_filter_column()
    }

    pub fn set_pending_filter_column(&mut self, column_id: Option<String>) {
        self.core.set_pending_filter_column(column_id);
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.core.selection_mode()
    }

    pub fn row_selection(&self) -> &RowSelection {
        self.core.row_selection()
    }

    pub fn set_row_selection<'a>(&mut self, updater: impl Into<Updater<'a, RowSelection>>) {
        self.core.set_row_selection(updater);
    }

    pub fn sync_row_selection(&mut self, selection: RowSelection) {
        self.core.sync_row_selection(selection);
    }

    pub fn toggle_row_selected(&mut self, row_id: &str) {
        self.core.toggle_row_selected(row_id);
    }

    /// Selects every row of the current page, or deselects them if all are
    /// already selected.
    pub fn toggle_all_page_rows_selected(&mut self) {
        let ids = self.data.iter().map(|row| row.id()).collect();
        self.core.toggle_all_selected(ids);
    }

    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.expanded.get(row_id).copied().unwrap_or(false)
    }

    pub fn toggle_expanded(&mut self, row_id: &str) {
        if self.is_expanded(row_id) {
            self.expanded.remove(row_id);
        } else {
            self.expanded.insert(row_id.to_string(), true);
        }
    }
}
