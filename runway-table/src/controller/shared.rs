//! State handling shared by the client-side and server-side controllers

use std::fmt;

use log::debug;
use log::trace;

use super::Navigator;
use crate::config::TableConfig;
use crate::model::ColumnDef;
use crate::model::find_column;
use crate::params::UrlParams;
use crate::params::keys;
use crate::params::mapper;
use crate::params::prefixed_name;
use crate::row_model::RELEVANCE_COLUMN;
use crate::state::ColumnFiltersState;
use crate::state::FilterValue;
use crate::state::PaginationState;
use crate::state::RowSelection;
use crate::state::SelectionMode;
use crate::state::SortEntry;
use crate::state::SortingState;
use crate::state::TableState;
use crate::state::Updater;
use crate::state::with_column_filter;

/// Callback receiving the next row selection of a host-controlled table.
pub type SelectionChange = Box<dyn FnMut(&RowSelection) + Send + Sync>;

/// Whether the advanced settings panel (sorts and filters) is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsVisibility {
    open: bool,
}

impl SettingsVisibility {
    /// Creates the visibility, open or closed.
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_advanced(&mut self) {
        self.open = !self.open;
    }

    pub fn show_advanced(&mut self) {
        self.open = true;
    }

    pub fn hide_advanced(&mut self) {
        self.open = false;
    }
}

enum SelectionSource {
    Internal(RowSelection),
    Controlled {
        selection: RowSelection,
        on_change: SelectionChange,
    },
}

impl SelectionSource {
    fn current(&self) -> &RowSelection {
        match self {
            SelectionSource::Internal(selection) => selection,
            SelectionSource::Controlled { selection, .. } => selection,
        }
    }
}

impl fmt::Debug for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSource::Internal(selection) => f.debug_tuple("Internal").field(selection).finish(),
            SelectionSource::Controlled { selection, .. } => {
                f.debug_struct("Controlled").field("selection", selection).finish_non_exhaustive()
            }
        }
    }
}

/// URL-backed state plus the view state that does not belong in the URL.
///
/// With `touch_markers` set every write also stamps the concern's
/// `{prefix}_{concern}Touched` flag, and starting or clearing a search adds
/// or removes the relevance sort.
pub(crate) struct TableCore {
    config: TableConfig,
    columns: Vec<ColumnDef>,
    params: UrlParams,
    navigator: Box<dyn Navigator>,
    touch_markers: bool,
    settings: SettingsVisibility,
    pending_filter_column: Option<String>,
    selection: SelectionSource,
}

impl fmt::Debug for TableCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCore")
            .field("config", &self.config)
            .field("columns", &self.columns)
            .field("params", &self.params)
            .field("touch_markers", &self.touch_markers)
            .field("settings", &self.settings)
            .field("pending_filter_column", &self.pending_filter_column)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl TableCore {
    pub(crate) fn new(
        config: TableConfig,
        columns: Vec<ColumnDef>,
        params: UrlParams,
        navigator: Box<dyn Navigator>,
        touch_markers: bool,
    ) -> Self {
        let mut core = Self {
            config,
            columns,
            params,
            navigator,
            touch_markers,
            settings: SettingsVisibility::default(),
            pending_filter_column: None,
            selection: SelectionSource::Internal(RowSelection::new()),
        };
        core.settings = SettingsVisibility::new(core.url_state().has_advanced_settings());
        core
    }

    pub(crate) fn config(&self) -> &TableConfig {
        &self.config
    }

    pub(crate) fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub(crate) fn set_columns(&mut self, columns: Vec<ColumnDef>) {
        self.columns = columns;
    }

    pub(crate) fn params(&self) -> &UrlParams {
        &self.params
    }

    fn prefix(&self) -> Option<&str> {
        self.config.prefix()
    }

    /// Adopts parameters that changed outside the controller.
    pub(crate) fn sync_from_url(&mut self, params: UrlParams) {
        self.params = params;
    }

    pub(crate) fn url_state(&self) -> TableState {
        let mut state = mapper::read_table_state(&self.params, self.config.default_page_size(), self.prefix());
        state.row_selection = self.selection.current().clone();
        state
    }

    pub(crate) fn sorting(&self) -> SortingState {
        mapper::get_sort_params(&self.params, self.prefix())
    }

    pub(crate) fn column_filters(&self) -> ColumnFiltersState {
        mapper::get_column_filter_param(&self.params, self.prefix())
    }

    pub(crate) fn global_filter(&self) -> Option<String> {
        mapper::get_global_filter_param(&self.params, self.prefix())
    }

    pub(crate) fn pagination(&self) -> PaginationState {
        mapper::get_pagination_params(&self.params, self.config.default_page_size(), self.prefix())
    }

    /// Navigates to `next` unless it equals the current parameters.
    fn commit(&mut self, mut next: UrlParams, touched: &str) -> bool {
        if next == self.params {
            return false;
        }
        if self.touch_markers {
            next.insert(prefixed_name(touched, self.prefix()), "true");
        }
        trace!("Navigating to ?{}", next.to_query_string());
        self.navigator.navigate(&next);
        self.params = next;
        true
    }

    pub(crate) fn set_sorting<'a>(&mut self, updater: impl Into<Updater<'a, SortingState>>) -> bool {
        let sorting = updater.into().apply(&self.sorting());
        let next = mapper::set_sort_params(&sorting, &self.params, self.prefix());
        self.commit(next, keys::SORT_TOUCHED)
    }

    pub(crate) fn set_column_filters<'a>(
        &mut self,
        updater: impl Into<Updater<'a, ColumnFiltersState>>,
    ) -> bool {
        let filters = updater.into().apply(&self.column_filters());
        let next = mapper::set_column_filter_param(&filters, &self.params, self.prefix());
        self.commit(next, keys::COLUMN_FILTER_TOUCHED)
    }

    pub(crate) fn set_global_filter<'a>(&mut self, updater: impl Into<Updater<'a, Option<String>>>) -> bool {
        let previous = self.global_filter();
        let value = updater
            .into()
            .apply(&previous)
            .filter(|value| !value.is_empty());

        let mut base = self.params.clone();
        if self.touch_markers {
            let sorting = self.sorting();
            let searching = value.is_some();
            let sorting = if searching && previous.is_none() {
                std::iter::once(SortEntry::desc(RELEVANCE_COLUMN))
                    .chain(sorting.into_iter().filter(|sort| sort.id != RELEVANCE_COLUMN))
                    .collect()
            } else if !searching {
                sorting
                    .into_iter()
                    .filter(|sort| sort.id != RELEVANCE_COLUMN)
                    .collect()
            } else {
                sorting
            };
            base = mapper::set_sort_params(&sorting, &base, self.prefix());
        }

        let next = mapper::set_global_filter_param(value.as_deref(), &base, self.prefix());
        self.commit(next, keys::GLOBAL_FILTER_TOUCHED)
    }

    pub(crate) fn set_pagination<'a>(&mut self, updater: impl Into<Updater<'a, PaginationState>>) -> bool {
        let pagination = updater.into().apply(&self.pagination());
        let next = mapper::set_pagination_params(
            &pagination,
            &self.params,
            self.config.default_page_size(),
            self.prefix(),
        );
        self.commit(next, keys::SORT_TOUCHED)
    }

    pub(crate) fn set_column_filter(&mut self, column_id: &str, value: Option<FilterValue>) -> bool {
        let column_id = column_id.to_string();
        self.set_column_filters(Updater::update(move |old: &ColumnFiltersState| {
            with_column_filter(old, &column_id, value)
        }))
    }

    /// Sorts by a column, flipping its direction if it is already sorted.
    ///
    /// With `multi` (and multi-sort enabled) a new column is added after the
    /// existing keys; otherwise it replaces them.
    pub(crate) fn toggle_sort(&mut self, column_id: &str, multi: bool) -> bool {
        let Some(column) = find_column(&self.columns, column_id) else {
            debug!("Ignoring sort on unknown column {}", column_id);
            return false;
        };
        if !column.sortable {
            return false;
        }
        let multi = multi && self.config.enable_multi_sort;
        let column_id = column.id.clone();
        self.set_sorting(Updater::update(move |old: &SortingState| {
            if old.iter().any(|sort| sort.id == column_id) {
                old.iter()
                    .map(|sort| if sort.id == column_id { sort.flipped() } else { sort.clone() })
                    .collect()
            } else if multi {
                let mut next = old.clone();
                next.push(SortEntry::asc(column_id));
                next
            } else {
                vec![SortEntry::asc(column_id)]
            }
        }))
    }

    pub(crate) fn remove_sort(&mut self, column_id: &str) -> bool {
        let column_id = column_id.to_string();
        self.set_sorting(Updater::update(move |old: &SortingState| {
            old.iter().filter(|sort| sort.id != column_id).cloned().collect()
        }))
    }

    pub(crate) fn set_page_index(&mut self, page_index: usize) -> bool {
        self.set_pagination(Updater::update(move |old: &PaginationState| PaginationState {
            page_index,
            ..*old
        }))
    }

    /// Changes the page size, keeping the first visible row on screen.
    ///
    /// Sizes that are not offered by the configuration are ignored.
    pub(crate) fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.config.page_sizes.contains(&page_size) {
            debug!("Ignoring unsupported page size {}", page_size);
            return false;
        }
        self.set_pagination(Updater::update(move |old: &PaginationState| {
            let top_row = old.page_index.saturating_mul(old.page_size);
            PaginationState::new(top_row / page_size, page_size)
        }))
    }

    /// Clamps the page index to the last page of `page_count` pages.
    pub(crate) fn sync_page_bounds(&mut self, page_count: usize) -> bool {
        let pagination = self.pagination();
        let last = page_count.saturating_sub(1);
        if pagination.page_index <= last {
            return false;
        }
        debug!(
            "Page index {} is past the last page, moving to {}",
            pagination.page_index, last
        );
        self.set_page_index(last)
    }

    fn is_known_column(&self, column_id: &str) -> bool {
        column_id == RELEVANCE_COLUMN || find_column(&self.columns, column_id).is_some()
    }

    /// Drops sort keys and filters that refer to columns the table no longer has.
    pub(crate) fn prune_stale(&mut self) -> bool {
        let sorting = self.sorting();
        let filters = self.column_filters();
        let (kept_sorting, stale_sorting): (Vec<_>, Vec<_>) =
            sorting.into_iter().partition(|sort| self.is_known_column(&sort.id));
        let (kept_filters, stale_filters): (Vec<_>, Vec<_>) =
            filters.into_iter().partition(|filter| self.is_known_column(&filter.id));
        if stale_sorting.is_empty() && stale_filters.is_empty() {
            return false;
        }
        debug!(
            "Dropping {} stale sort key(s) and {} stale filter(s)",
            stale_sorting.len(),
            stale_filters.len()
        );

        let mut changed = false;
        if !stale_sorting.is_empty() {
            changed |= self.set_sorting(kept_sorting);
        }
        if !stale_filters.is_empty() {
            changed |= self.set_column_filters(kept_filters);
        }
        changed
    }

    pub(crate) fn settings(&self) -> &SettingsVisibility {
        &self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut SettingsVisibility {
        &mut self.settings
    }

    pub(crate) fn pending_filter_column(&self) -> Option<&str> {
        self.pending_filter_column.as_deref()
    }

    pub(crate) fn set_pending_filter_column(&mut self, column_id: Option<String>) {
        self.pending_filter_column = column_id;
    }

    pub(crate) fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_enabled(self.config.enable_row_selection)
    }

    pub(crate) fn row_selection(&self) -> &RowSelection {
        self.selection.current()
    }

    pub(crate) fn control_selection(&mut self, selection: RowSelection, on_change: SelectionChange) {
        self.selection = SelectionSource::Controlled { selection, on_change };
    }

    /// Replaces the selection a host-controlled table shows.
    pub(crate) fn sync_row_selection(&mut self, next: RowSelection) {
        match &mut self.selection {
            SelectionSource::Internal(selection) => *selection = next,
            SelectionSource::Controlled { selection, .. } => *selection = next,
        }
    }

    /// Applies a selection change. Host-controlled selections only report it.
    pub(crate) fn set_row_selection<'a>(&mut self, updater: impl Into<Updater<'a, RowSelection>>) {
        let next = updater.into().apply(self.selection.current());
        match &mut self.selection {
            SelectionSource::Internal(selection) => *selection = next,
            SelectionSource::Controlled { on_change, .. } => on_change(&next),
        }
    }

    pub(crate) fn toggle_row_selected(&mut self, row_id: &str) {
        let mode = self.selection_mode();
        let row_id = row_id.to_string();
        self.set_row_selection(Updater::update(move |old: &RowSelection| {
            let mut next = old.clone();
            next.toggle(&row_id, mode);
            next
        }));
    }

    /// Selects every given row, or clears them all when they are already selected.
    pub(crate) fn toggle_all_selected(&mut self, row_ids: Vec<String>) {
        if self.selection_mode() != SelectionMode::Multiple {
            return;
        }
        self.set_row_selection(Updater::update(move |old: &RowSelection| {
            let mut next = old.clone();
            if old.all_selected(row_ids.iter().map(String::as_str)) {
                for id in &row_ids {
                    next.set_selected(id, false, SelectionMode::Multiple);
                }
            } else {
                next.select_all(row_ids.iter().map(String::as_str));
            }
            next
        }));
    }
}
