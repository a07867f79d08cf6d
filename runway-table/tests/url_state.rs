use pretty_assertions::assert_eq;
use runway_table::TableConfig;
use runway_table::TableController;
use runway_table::UrlParams;
use runway_table::controller::MemoryHistory;
use runway_table::model::ColumnDef;
use runway_table::model::ColumnType;
use runway_table::model::JsonRow;
use runway_table::model::TableRow;
use runway_table::params::codec::decode_column_filters;
use runway_table::params::codec::encode_column_filters;
use runway_table::params::mapper::read_table_state;
use runway_table::params::mapper::write_table_state;
use runway_table::state::ColumnFilter;
use runway_table::state::FilterValue;
use runway_table::state::PaginationState;
use runway_table::state::SortEntry;
use runway_table::state::TableState;

fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("rows", "Rows").with_type(ColumnType::Number),
        ColumnDef::new("createdAt", "Created").with_type(ColumnType::Date),
        ColumnDef::new("active", "Active").with_type(ColumnType::StrEquals),
    ]
}

fn rows(count: usize) -> Vec<JsonRow> {
    (0..count)
        .map(|i| JsonRow::new(format!("r{i}")).set("name", format!("Run {i}")).set("rows", i as f64))
        .collect()
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_column_filters_round_trip() {
    let filters = vec![
        ColumnFilter::new("name", "Fall MAP"),
        ColumnFilter::new("rows", FilterValue::at_least(10.0)),
        ColumnFilter::new("createdAt", FilterValue::between(1_709_287_200_000.0, 1_709_373_600_000.0)),
        ColumnFilter::new("active", true),
    ];

    let encoded = encode_column_filters(&filters);
    assert_eq!(decode_column_filters(&encoded), filters);
}

#[test]
fn test_table_state_round_trip_through_query_string() {
    let state = TableState {
        pagination: PaginationState::new(2, 50),
        sorting: vec![SortEntry::desc("createdAt"), SortEntry::asc("name")],
        column_filters: vec![ColumnFilter::new("rows", FilterValue::between(5.0, 15.0))],
        global_filter: Some("fall map & more".to_string()),
        ..TableState::default()
    };

    let params = write_table_state(&state, &UrlParams::new(), 10, None);
    let reparsed = UrlParams::parse(&params.to_query_string());
    assert_eq!(reparsed, params);
    assert_eq!(read_table_state(&reparsed, 10, None), state);
}

#[test]
fn test_unrelated_params_survive_writes() {
    let history = MemoryHistory::new();
    let mut table: TableController<JsonRow> =
        TableController::new(TableConfig::default(), columns(), UrlParams::parse("?tab=jobs"), history.clone());

    table.set_global_filter(Some("map".to_string()));
    table.toggle_sort("name", false);

    let current = history.current().unwrap();
    assert_eq!(current.get_str("tab"), Some("jobs"));
    assert_eq!(current.get_str("search"), Some("map"));
}

// ============================================================================
// Minimal URLs
// ============================================================================

#[test]
fn test_default_pagination_omitted() {
    let params = write_table_state(&TableState::default(), &UrlParams::new(), 10, None);
    assert!(params.is_empty());

    let state = TableState {
        pagination: PaginationState::new(0, 25),
        ..TableState::default()
    };
    let params = write_table_state(&state, &UrlParams::new(), 25, Some("jobs"));
    assert!(params.is_empty());
}

#[test]
fn test_clearing_everything_removes_keys() {
    let history = MemoryHistory::new();
    let mut table: TableController<JsonRow> = TableController::new(
        TableConfig::default(),
        columns(),
        UrlParams::parse("search=x&sortCol[]=name&sortDesc[]=true"),
        history.clone(),
    );

    table.set_column_filter("name", Some("a".into()));
    table.set_column_filter("name", Some("".into()));
    table.clear_global_filter();
    table.set_sorting(Vec::<SortEntry>::new());

    assert!(table.params().is_empty());
}

// ============================================================================
// Fail-open reads
// ============================================================================

#[test]
fn test_garbage_params_yield_defaults() {
    let params = UrlParams::parse("colfilter=%%%not-base64&pageIndex=-3&pageSize=0&sortCol[]=name");
    let state = read_table_state(&params, 10, None);

    assert_eq!(state, TableState::default());
}

#[test]
fn test_colfilter_json_of_wrong_shape_is_ignored() {
    // base64 of {"i":"rows"}
    assert!(decode_column_filters("eyJpIjoicm93cyJ9").is_empty());
    assert!(decode_column_filters("").is_empty());
}

// ============================================================================
// Multiple tables on one page
// ============================================================================

#[test]
fn test_prefix_isolation() {
    let history_a = MemoryHistory::new();
    let mut table_a: TableController<JsonRow> = TableController::new(
        TableConfig::default().with_prefix("a"),
        columns(),
        UrlParams::new(),
        history_a.clone(),
    );
    table_a.set_column_filter("rows", Some(FilterValue::at_least(10.0)));
    table_a.set_page_size(25);

    let shared = history_a.current().unwrap();
    assert!(shared.contains_key("a_colfilter"));
    assert!(shared.contains_key("a_pageSize"));

    let history_b = MemoryHistory::new();
    let mut table_b: TableController<JsonRow> = TableController::new(
        TableConfig::default().with_prefix("b"),
        columns(),
        shared.clone(),
        history_b.clone(),
    );
    assert!(table_b.column_filters().is_empty());
    assert_eq!(table_b.pagination(), PaginationState::new(0, 10));

    table_b.toggle_sort("name", false);
    let after = history_b.current().unwrap();
    assert_eq!(after.get("a_colfilter"), shared.get("a_colfilter"));
    assert_eq!(after.get_str("a_pageSize"), Some("25"));
    assert_eq!(after.get_all("b_sortCol"), &["name".to_string()]);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_equal_setter_value_navigates_once() {
    let history = MemoryHistory::new();
    let mut table: TableController<JsonRow> =
        TableController::new(TableConfig::default(), columns(), UrlParams::new(), history.clone());

    let filters = vec![ColumnFilter::new("name", "Run 1")];
    assert!(table.set_column_filters(filters.clone()));
    assert!(!table.set_column_filters(filters));
    assert!(!table.set_page_index(0));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_page_index_clamped_to_last_page() {
    let history = MemoryHistory::new();
    let mut table =
        TableController::new(TableConfig::default(), columns(), UrlParams::parse("pageIndex=9"), history.clone());

    table.set_data(rows(30));
    assert_eq!(table.page_count(), 3);
    assert_eq!(table.pagination().page_index, 2);
    assert_eq!(history.len(), 1);

    let page: Vec<String> = table.row_model().page_rows().iter().map(|r| r.row.id()).collect();
    assert_eq!(page, vec!["r20", "r21", "r22", "r23", "r24", "r25", "r26", "r27", "r28", "r29"]);
}

#[test]
fn test_sync_from_url_clamps() {
    let history = MemoryHistory::new();
    let mut table = TableController::new(TableConfig::default(), columns(), UrlParams::new(), history.clone())
        .with_data(rows(15));

    table.sync_from_url(UrlParams::parse("pageIndex=5"));
    assert_eq!(table.pagination().page_index, 1);
}
