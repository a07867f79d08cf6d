//! Client-side row model.
//!
//! Computes what a table shows from its full dataset and canonical state:
//! global search, column filters, multi-key sort, row expansion and
//! pagination, plus faceted values for filter editors.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Range;

use crate::filter::GlobalFilter;
use crate::filter::matches_column_filter;
use crate::model::ColumnDef;
use crate::model::TableRow;
use crate::model::find_column;
use crate::state::FilterValue;
use crate::state::SortEntry;
use crate::state::TableState;

/// Id of the synthetic relevance column sorted by global search rank.
pub const RELEVANCE_COLUMN: &str = "ftSearch";

/// A row as shown by the table.
#[derive(Debug)]
pub struct VisibleRow<'a, R> {
    /// The underlying row.
    pub row: &'a R,
    /// Nesting depth (0 for top-level rows).
    pub depth: usize,
    /// Global search rank, when a search is active and the row matched itself.
    pub rank: Option<u32>,
}

impl<R> Clone for VisibleRow<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for VisibleRow<'_, R> {}

/// Result of running a dataset through the table state.
#[derive(Debug)]
pub struct RowModel<'a, R> {
    rows: Vec<VisibleRow<'a, R>>,
    page: Range<usize>,
    page_size: usize,
}

impl<'a, R: TableRow> RowModel<'a, R> {
    /// Builds the row model for `data` under `state`.
    ///
    /// Filters and sort keys naming unknown columns are ignored.
    pub fn build(data: &'a [R], columns: &[ColumnDef], state: &TableState) -> Self {
        let filtered = filter_rows(data, columns, state, None);
        let sorted = sort_nodes(filtered, columns, &state.sorting);

        let mut rows = Vec::new();
        flatten(&sorted, state, 0, &mut rows);

        Self {
            page: state.pagination.row_range(rows.len()),
            page_size: state.pagination.page_size,
            rows,
        }
    }

    /// All rows after filtering, sorting and expansion, before pagination.
    pub fn rows(&self) -> &[VisibleRow<'a, R>] {
        &self.rows
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[VisibleRow<'a, R>] {
        &self.rows[self.page.clone()]
    }

    /// Number of rows before pagination.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of pages at the current page size.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size.max(1))
    }
}

/// Rows as given, with the sub-rows of expanded rows inlined after their
/// parent. Used when a backend has already filtered, sorted and paginated.
pub fn expand_rows<'a, R: TableRow>(data: &'a [R], expanded: &BTreeMap<String, bool>) -> Vec<VisibleRow<'a, R>> {
    fn walk<'a, R: TableRow>(
        rows: &'a [R],
        expanded: &BTreeMap<String, bool>,
        depth: usize,
        out: &mut Vec<VisibleRow<'a, R>>,
    ) {
        for row in rows {
            out.push(VisibleRow { row, depth, rank: None });
            if expanded.get(&row.id()).copied().unwrap_or(false) {
                walk(row.sub_rows(), expanded, depth + 1, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(data, expanded, 0, &mut out);
    out
}

/// Distinct display values of a column and how often each occurs, over rows
/// matching every active filter except the column's own.
///
/// Null cells are not counted.
pub fn faceted_unique_values<R: TableRow>(
    data: &[R],
    columns: &[ColumnDef],
    state: &TableState,
    column_id: &str,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for row in faceted_rows(data, columns, state, column_id) {
        let cell = row.value(column_id);
        if !cell.is_null() {
            *counts.entry(cell.to_display_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Smallest and largest numeric value of a column, over rows matching every
/// active filter except the column's own.
pub fn faceted_min_max<R: TableRow>(
    data: &[R],
    columns: &[ColumnDef],
    state: &TableState,
    column_id: &str,
) -> Option<(f64, f64)> {
    faceted_rows(data, columns, state, column_id)
        .into_iter()
        .filter_map(|row| row.value(column_id).as_f64())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn faceted_rows<'a, R: TableRow>(
    data: &'a [R],
    columns: &[ColumnDef],
    state: &TableState,
    column_id: &str,
) -> Vec<&'a R> {
    let nodes = filter_rows(data, columns, state, Some(column_id));
    let mut rows = Vec::new();
    collect_all(&nodes, &mut rows);
    rows
}

struct Node<'a, R> {
    row: &'a R,
    rank: Option<u32>,
    children: Vec<Node<'a, R>>,
}

struct RowFilter<'s> {
    global: Option<GlobalFilter>,
    columns: &'s [ColumnDef],
    active: Vec<(&'s ColumnDef, &'s FilterValue)>,
}

impl<'s> RowFilter<'s> {
    fn new(columns: &'s [ColumnDef], state: &'s TableState, exclude: Option<&str>) -> Self {
        let active = state
            .column_filters
            .iter()
            .filter(|filter| Some(filter.id.as_str()) != exclude)
            .filter_map(|filter| find_column(columns, &filter.id).map(|column| (column, &filter.value)))
            .collect();

        Self {
            global: state
                .global_filter
                .as_deref()
                .filter(|query| !query.trim().is_empty())
                .map(GlobalFilter::new),
            columns,
            active,
        }
    }

    /// Returns whether the row passes, and its search rank.
    fn check<R: TableRow>(&mut self, row: &R) -> (bool, Option<u32>) {
        let columns_pass = self
            .active
            .iter()
            .all(|(column, filter)| matches_column_filter(column.column_type, filter, &row.value(&column.id)));
        if !columns_pass {
            return (false, None);
        }
        match &mut self.global {
            Some(global) => {
                let rank = global.rank_row(row, self.columns);
                (rank.is_some(), rank)
            }
            None => (true, None),
        }
    }
}

fn filter_rows<'a, R: TableRow>(
    data: &'a [R],
    columns: &[ColumnDef],
    state: &TableState,
    exclude: Option<&str>,
) -> Vec<Node<'a, R>> {
    let mut filter = RowFilter::new(columns, state, exclude);
    filter_level(data, &mut filter)
}

// A parent stays visible if it matches or any of its descendants does.
fn filter_level<'a, R: TableRow>(rows: &'a [R], filter: &mut RowFilter<'_>) -> Vec<Node<'a, R>> {
    let mut kept = Vec::new();
    for row in rows {
        let children = filter_level(row.sub_rows(), filter);
        let (passes, rank) = filter.check(row);
        if passes || !children.is_empty() {
            kept.push(Node {
                row,
                rank,
                children,
            });
        }
    }
    kept
}

fn sort_nodes<'a, R: TableRow>(
    mut nodes: Vec<Node<'a, R>>,
    columns: &[ColumnDef],
    sorting: &[SortEntry],
) -> Vec<Node<'a, R>> {
    let keys: Vec<&SortEntry> = sorting
        .iter()
        .filter(|sort| {
            sort.id == RELEVANCE_COLUMN
                || find_column(columns, &sort.id).is_some_and(|column| column.sortable)
        })
        .collect();
    if keys.is_empty() {
        return nodes;
    }

    nodes.sort_by(|a, b| compare_nodes(a, b, &keys));
    nodes
        .into_iter()
        .map(|node| Node {
            children: sort_nodes(node.children, columns, sorting),
            ..node
        })
        .collect()
}

fn compare_nodes<R: TableRow>(a: &Node<'_, R>, b: &Node<'_, R>, keys: &[&SortEntry]) -> Ordering {
    for key in keys {
        let ordering = if key.id == RELEVANCE_COLUMN {
            a.rank.cmp(&b.rank)
        } else {
            let (left, right) = (a.row.value(&key.id), b.row.value(&key.id));
            // Nulls stay last in both directions.
            if left.is_null() != right.is_null() {
                return left.sort_cmp(&right);
            }
            left.sort_cmp(&right)
        };
        let ordering = if key.desc { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn flatten<'a, R: TableRow>(
    nodes: &[Node<'a, R>],
    state: &TableState,
    depth: usize,
    out: &mut Vec<VisibleRow<'a, R>>,
) {
    for node in nodes {
        out.push(VisibleRow {
            row: node.row,
            depth,
            rank: node.rank,
        });
        if !node.children.is_empty() && state.is_expanded(&node.row.id()) {
            flatten(&node.children, state, depth + 1, out);
        }
    }
}

fn collect_all<'a, R>(nodes: &[Node<'a, R>], out: &mut Vec<&'a R>) {
    for node in nodes {
        out.push(node.row);
        collect_all(&node.children, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnType;
    use crate::model::JsonRow;
    use crate::state::ColumnFilter;
    use crate::state::PaginationState;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("rows", "Rows").with_type(ColumnType::Number),
            ColumnDef::new("status", "Status").with_type(ColumnType::Options),
        ]
    }

    fn data() -> Vec<JsonRow> {
        vec![
            JsonRow::new("1").set("name", "Fall MAP").set("rows", 5).set("status", "Completed"),
            JsonRow::new("2").set("name", "Spring STAR").set("rows", 10).set("status", "Error"),
            JsonRow::new("3").set("name", "Winter MAP").set("rows", 15).set("status", "Completed"),
        ]
    }

    fn ids<R: TableRow>(rows: &[VisibleRow<'_, R>]) -> Vec<String> {
        rows.iter().map(|r| r.row.id()).collect()
    }

    #[test]
    fn test_range_filter_boundary() {
        let data = data();
        let state = TableState {
            column_filters: vec![ColumnFilter::new("rows", FilterValue::at_least(10.0))],
            ..TableState::default()
        };
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(ids(model.rows()), vec!["2", "3"]);
    }

    #[test]
    fn test_multi_sort() {
        let data = data();
        let state = TableState {
            sorting: vec![SortEntry::asc("status"), SortEntry::desc("rows")],
            ..TableState::default()
        };
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(ids(model.rows()), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_stale_references_ignored() {
        let data = data();
        let state = TableState {
            sorting: vec![SortEntry::desc("gone")],
            column_filters: vec![ColumnFilter::new("gone", "x")],
            ..TableState::default()
        };
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(ids(model.rows()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_pagination() {
        let data = data();
        let state = TableState {
            pagination: PaginationState::new(1, 2),
            ..TableState::default()
        };
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(model.page_count(), 2);
        assert_eq!(ids(model.page_rows()), vec!["3"]);
    }

    #[test]
    fn test_global_filter_and_relevance_sort() {
        let data = data();
        let state = TableState {
            global_filter: Some("map".to_string()),
            sorting: vec![SortEntry::desc(RELEVANCE_COLUMN)],
            ..TableState::default()
        };
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(model.row_count(), 2);
        assert!(model.rows().iter().all(|r| r.rank.is_some()));
    }

    #[test]
    fn test_faceted_values_exclude_own_filter() {
        let data = data();
        let state = TableState {
            column_filters: vec![
                ColumnFilter::new("status", "Completed"),
                ColumnFilter::new("rows", FilterValue::at_most(12.0)),
            ],
            ..TableState::default()
        };

        let statuses = faceted_unique_values(&data, &columns(), &state, "status");
        assert_eq!(statuses.get("Completed"), Some(&1));
        assert_eq!(statuses.get("Error"), Some(&1));

        let bounds = faceted_min_max(&data, &columns(), &state, "rows");
        assert_eq!(bounds, Some((5.0, 15.0)));
    }

    #[test]
    fn test_sub_rows_filter_from_leaves_and_expand() {
        let data = vec![
            JsonRow::new("p")
                .set("name", "District")
                .with_sub_row(JsonRow::new("c1").set("name", "Lincoln MAP"))
                .with_sub_row(JsonRow::new("c2").set("name", "Roosevelt")),
        ];
        let mut state = TableState {
            global_filter: Some("lincoln".to_string()),
            ..TableState::default()
        };

        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(ids(model.rows()), vec!["p"]);

        state.expanded.insert("p".to_string(), true);
        let model = RowModel::build(&data, &columns(), &state);
        assert_eq!(ids(model.rows()), vec!["p", "c1"]);
        assert_eq!(model.rows()[1].depth, 1);
    }
}
