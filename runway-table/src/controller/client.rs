//! Controller for tables whose rows are all in memory

use std::collections::BTreeMap;

use super::Navigator;
use super::SettingsVisibility;
use super::shared::TableCore;
use crate::config::TableConfig;
use crate::model::ColumnDef;
use crate::model::TableRow;
use crate::params::UrlParams;
use crate::row_model;
use crate::row_model::RowModel;
use crate::state::ColumnFiltersState;
use crate::state::FilterValue;
use crate::state::PaginationState;
use crate::state::RowSelection;
use crate::state::SelectionMode;
use crate::state::SortingState;
use crate::state::TableState;
use crate::state::Updater;

/// Client-side table controller.
///
/// Sorting, filters, search and pagination live in the URL; the controller
/// filters, sorts and paginates `data` locally on every [`row_model`] call.
///
/// # Example
///
/// ```
/// use runway_table::TableConfig;
/// use runway_table::TableController;
/// use runway_table::UrlParams;
/// use runway_table::controller::MemoryHistory;
/// use runway_table::model::ColumnDef;
/// use runway_table::model::JsonRow;
///
/// let history = MemoryHistory::new();
/// let mut table: TableController<JsonRow> = TableController::new(
///     TableConfig::default(),
///     vec![ColumnDef::new("name", "Name")],
///     UrlParams::new(),
///     history.clone(),
/// );
/// table.toggle_sort("name", false);
/// assert_eq!(history.current().unwrap().to_query_string(), "sortCol%5B%5D=name&sortDesc%5B%5D=false");
/// ```
///
/// [`row_model`]: TableController::row_model
#[derive(Debug)]
pub struct TableController<R> {
    core: TableCore,
    data: Vec<R>,
    expanded: BTreeMap<String, bool>,
}

impl<R: TableRow> TableController<R> {
    /// Creates a controller for a table showing `columns`, starting from the
    /// current URL parameters.
    pub fn new(
        config: TableConfig,
        columns: Vec<ColumnDef>,
        params: UrlParams,
        navigator: impl Navigator + 'static,
    ) -> Self {
        Self {
            core: TableCore::new(config, columns, params, Box::new(navigator), false),
            data: Vec::new(),
            expanded: BTreeMap::new(),
        }
    }

    /// Sets the initial rows.
    pub fn with_data(mut self, data: Vec<R>) -> Self {
        self.set_data(data);
        self
    }

    /// Hands row selection to the host: the controller shows `selection` and
    /// reports changes to `on_change` instead of applying them.
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

    pub fn columns(&self) -> &[ColumnDef] {
        self.core.columns()
    }

    /// Replaces the column set. Stale sort keys and filters are left in the
    /// URL until [`prune_stale`](Self::prune_stale) runs; reads ignore them.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) {
        self.core.set_columns(columns);
    }

    pub fn params(&self) -> &UrlParams {
        self.core.params()
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Replaces the rows, moving back to the last page if the current one
    /// no longer exists.
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
        self.sync_page_bounds();
    }

    /// Adopts parameters that changed outside the controller (back/forward
    /// navigation, a pasted link).
    pub fn sync_from_url(&mut self, params: UrlParams) {
        self.core.sync_from_url(params);
        self.sync_page_bounds();
    }

    /// Full current state.
    pub fn state(&self) -> TableState {
        let mut state = self.core.url_state();
        state.expanded = self.expanded.clone();
        state
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

    /// Returns `true` if a navigation was requested.
    pub fn set_sorting<'a>(&mut self, updater: impl Into<Updater<'a, SortingState>>) -> bool {
        self.core.set_sorting(updater)
    }

    /// Returns `true` if a navigation was requested.
    pub fn set_column_filters<'a>(&mut self, updater: impl Into<Updater<'a, ColumnFiltersState>>) -> bool {
        let changed = self.core.set_column_filters(updater);
        self.sync_page_bounds() || changed
    }

    /// Sets the global search. An empty string clears it.
    pub fn set_global_filter<'a>(&mut self, updater: impl Into<Updater<'a, Option<String>>>) -> bool {
        let changed = self.core.set_global_filter(updater);
        self.sync_page_bounds() || changed
    }

    pub fn clear_global_filter(&mut self) -> bool {
        self.set_global_filter(None)
    }

    pub fn set_pagination<'a>(&mut self, updater: impl Into<Updater<'a, PaginationState>>) -> bool {
        let changed = self.core.set_pagination(updater);
        self.sync_page_bounds() || changed
    }

    /// Sets or clears (`None` or an empty string) one column's filter.
    pub fn set_column_filter(&mut self, column_id: &str, value: Option<FilterValue>) -> bool {
        let changed = self.core.set_column_filter(column_id, value);
        self.sync_page_bounds() || changed
    }

    /// Sorts by a column, flipping its direction if it is already sorted.
    ///
    /// With `multi` (and multi-sort enabled) the column is added after the
    /// existing sort keys instead of replacing them. Unknown and unsortable
    /// columns are ignored.
    pub fn toggle_sort(&mut self, column_id: &str, multi: bool) -> bool {
        self.core.toggle_sort(column_id, multi)
    }

    pub fn remove_sort(&mut self, column_id: &str) -> bool {
        self.core.remove_sort(column_id)
    }

    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let changed = self.core.set_page_index(page_index);
        self.sync_page_bounds() || changed
    }

    /// Changes the page size. Only configured page sizes are accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let changed = self.core.set_page_size(page_size);
        self.sync_page_bounds() || changed
    }

    /// Moves to the last page when the current page index is past it.
    pub fn sync_page_bounds(&mut self) -> bool {
        let page_count = self.page_count();
        self.core.sync_page_bounds(page_count)
    }

    /// Removes sort keys and filters on columns the table no longer has.
    pub fn prune_stale(&mut self) -> bool {
        let changed = self.core.prune_stale();
        self.sync_page_bounds() || changed
    }

    /// Runs the rows through the current state.
    pub fn row_model(&self) -> RowModel<'_, R> {
        RowModel::build(&self.data, self.core.columns(), &self.state())
    }

    pub fn page_count(&self) -> usize {
        self.row_model().page_count()
    }

    /// Distinct values of a column under every other active filter.
    pub fn faceted_unique_values(&self, column_id: &str) -> BTreeMap<String, usize> {
        row_model::faceted_unique_values(&self.data, self.core.columns(), &self.state(), column_id)
    }

    /// Numeric bounds of a column under every other active filter.
    pub fn faceted_min_max(&self, column_id: &str) -> Option<(f64, f64)> {
        row_model::faceted_min_max(&self.data, self.core.columns(), &self.state(), column_id)
    }

    pub fn settings(&self) -> &SettingsVisibility {
        self.core.settings()
    }

    pub fn settings_mut(&mut self) -> &mut SettingsVisibility {
        self.core.settings_mut()
    }

    /// Column whose filter editor is open, if any.
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

    /// Replaces the selection shown by a host-controlled table.
    pub fn sync_row_selection(&mut self, selection: RowSelection) {
        self.core.sync_row_selection(selection);
    }

    pub fn toggle_row_selected(&mut self, row_id: &str) {
        self.core.toggle_row_selected(row_id);
    }

    fn page_row_ids(&self) -> Vec<String> {
        self.row_model()
            .page_rows()
            .iter()
            .map(|visible| visible.row.id())
            .collect()
    }

    /// Selects every row on the current page, or deselects them if all are
    /// already selected.
    pub fn toggle_all_page_rows_selected(&mut self) {
        let ids = self.page_row_ids();
        self.core.toggle_all_selected(ids);
    }

    pub fn is_all_page_rows_selected(&self) -> bool {
        let ids = self.page_row_ids();
        self.core.row_selection().all_selected(ids.iter().map(String::as_str))
    }

    pub fn is_expanded(&self, row_id: &str) -> bool {
        self.expanded.get(row_id).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, row_id: &str, expanded: bool) {
        if expanded {
            self.expanded.insert(row_id.to_string(), true);
        } else {
            self.expanded.remove(row_id);
        }
    }

    pub fn toggle_expanded(&mut self, row_id: &str) {
        let expanded = self.is_expanded(row_id);
        self.set_expanded(row_id, !expanded);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::controller::MemoryHistory;
    use crate::model::ColumnType;
    use crate::model::JsonRow;
    use crate::state::SortEntry;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("rows", "Rows").with_type(ColumnType::Number),
        ]
    }

    fn rows(count: usize) -> Vec<JsonRow> {
        (0..count)
            .map(|i| JsonRow::new(i.to_string()).set("name", format!("Run {i}")).set("rows", i as f64))
            .collect()
    }

    fn controller(params: &str, history: &MemoryHistory) -> TableController<JsonRow> {
        TableController::new(
            TableConfig::default(),
            columns(),
            UrlParams::parse(params),
            history.clone(),
        )
    }

    #[test]
    fn test_equal_value_does_not_navigate() {
        let history = MemoryHistory::new();
        let mut table = controller("", &history);

        assert!(table.set_sorting(vec![SortEntry::desc("rows")]));
        assert!(!table.set_sorting(vec![SortEntry::desc("rows")]));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_functional_update() {
        let history = MemoryHistory::new();
        let mut table = controller("pageIndex=1", &history).with_data(rows(50));

        table.set_pagination(Updater::update(|old: &PaginationState| PaginationState {
            page_index: old.page_index + 1,
            ..*old
        }));
        assert_eq!(table.pagination().page_index, 2);
    }

    #[test]
    fn test_toggle_sort() {
        let history = MemoryHistory::new();
        let mut table = controller("", &history);

        table.toggle_sort("name", false);
        assert_eq!(table.sorting(), vec![SortEntry::asc("name")]);
        table.toggle_sort("name", false);
        assert_eq!(table.sorting(), vec![SortEntry::desc("name")]);
        table.toggle_sort("rows", true);
        assert_eq!(table.sorting(), vec![SortEntry::desc("name"), SortEntry::asc("rows")]);
        table.toggle_sort("rows", false);
        assert_eq!(table.sorting(), vec![SortEntry::desc("name"), SortEntry::desc("rows")]);
        table.remove_sort("name");
        assert_eq!(table.sorting(), vec![SortEntry::desc("rows")]);
        assert!(!table.toggle_sort("missing", false));
    }

    #[test]
    fn test_page_clamped_when_data_shrinks() {
        let history = MemoryHistory::new();
        let mut table = controller("pageIndex=9", &history);

        table.set_data(rows(25));
        assert_eq!(table.page_count(), 3);
        assert_eq!(table.pagination().page_index, 2);
        assert_eq!(history.current().unwrap().get_str("pageIndex"), Some("2"));
    }

    #[test]
    fn test_filter_change_clamps_page() {
        let history = MemoryHistory::new();
        let mut table = controller("pageIndex=4", &history).with_data(rows(100));
        assert_eq!(table.pagination().page_index, 4);

        table.set_column_filter("rows", Some(FilterValue::at_most(9.0)));
        assert_eq!(table.pagination().page_index, 0);
        assert!(table.params().get_str("pageIndex").is_none());
    }

    #[test]
    fn test_page_size_keeps_top_row() {
        let history = MemoryHistory::new();
        let mut table = controller("pageIndex=3", &history).with_data(rows(100));

        assert!(table.set_page_size(25));
        assert_eq!(table.pagination(), PaginationState::new(1, 25));
        assert!(!table.set_page_size(33));
    }

    #[test]
    fn test_settings_initially_open_with_filters() {
        let history = MemoryHistory::new();
        let table = controller("sortCol[]=name&sortDesc[]=true", &history);
        assert!(!table.settings().is_open());

        let mut table = controller("sortCol[]=name&sortCol[]=rows&sortDesc[]=true&sortDesc[]=false", &history);
        assert!(table.settings().is_open());
        table.settings_mut().toggle_advanced();
        assert!(!table.settings().is_open());
    }

    #[test]
    fn test_prune_stale() {
        let history = MemoryHistory::new();
        let mut table = controller("sortCol[]=gone&sortCol[]=name&sortDesc[]=true&sortDesc[]=false", &history);

        assert!(table.prune_stale());
        assert_eq!(table.sorting(), vec![SortEntry::asc("name")]);
        assert!(!table.prune_stale());
    }

    #[test]
    fn test_internal_selection() {
        let history = MemoryHistory::new();
        let mut table = controller("", &history).with_data(rows(3));
        assert_eq!(table.selection_mode(), SelectionMode::Single);

        table.toggle_row_selected("0");
        table.toggle_row_selected("1");
        assert_eq!(table.row_selection().selected(), vec!["1"]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_controlled_selection_reports_changes() {
        let history = MemoryHistory::new();
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);
        let mut table = TableController::new(
            TableConfig::default().with_row_selection(true),
            columns(),
            UrlParams::new(),
            history.clone(),
        )
        .with_data(rows(3))
        .with_controlled_selection(RowSelection::new(), move |next: &RowSelection| {
            sink.lock().unwrap().push(next.selected());
        });

        table.toggle_all_page_rows_selected();
        assert!(table.row_selection().is_empty());
        assert_eq!(reported.lock().unwrap().as_slice(), &[vec!["0", "1", "2"]]);

        let mut host_state = RowSelection::new();
        host_state.select_all(["0", "1", "2"]);
        table.sync_row_selection(host_state);
        assert!(table.is_all_page_rows_selected());
    }

    #[test]
    fn test_expansion() {
        let history = MemoryHistory::new();
        let data = vec![JsonRow::new("p").with_sub_row(JsonRow::new("c"))];
        let mut table = controller("", &history).with_data(data);

        assert_eq!(table.row_model().row_count(), 1);
        table.toggle_expanded("p");
        assert_eq!(table.row_model().row_count(), 2);
        assert!(table.state().is_expanded("p"));
    }
}
