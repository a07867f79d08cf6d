mod cli;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use log::debug;
use log::info;
use runway_table::TableConfig;
use runway_table::TableController;
use runway_table::UrlParams;
use runway_table::controller::MemoryHistory;
use runway_table::export::write_csv;
use runway_table::filter::label::describe_filter;
use runway_table::model::ColumnDef;
use runway_table::model::JsonRow;
use runway_table::model::find_column;
use runway_table::params::codec::encode_column_filters;
use runway_table::params::codec::try_decode_column_filters;
use runway_table::params::mapper::read_table_state;
use runway_table::query::TableQuery;
use runway_table::state::ColumnFiltersState;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::cli::Args;
use crate::cli::Command;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    WriteLogger::init(level, Config::default(), std::io::stderr()).context("Failed to initialize logger")?;

    let config = load_config(args.config.as_deref(), args.prefix)?;

    match args.command {
        Command::View {
            data,
            columns,
            query,
            all,
        } => view(config, &data, &columns, &query, all),
        Command::BackendQuery { query, path } => {
            let params = UrlParams::parse(&query);
            let state = read_table_state(&params, config.default_page_size(), config.prefix());
            let backend = TableQuery::from_state(&state);
            match path {
                Some(path) => println!("{}", backend.to_url(&path)),
                None => println!("{}", backend.to_query_string()),
            }
            Ok(())
        }
        Command::Inspect { query } => {
            let params = UrlParams::parse(&query);
            let state = read_table_state(&params, config.default_page_size(), config.prefix());
            let json = serde_json::json!({
                "pagination": {
                    "pageIndex": state.pagination.page_index,
                    "pageSize": state.pagination.page_size,
                },
                "sorting": state.sorting,
                "columnFilters": state.column_filters,
                "globalFilter": state.global_filter,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Command::EncodeFilters { filters } => {
            let filters: ColumnFiltersState =
                serde_json::from_str(&filters).context("Filters must be a JSON array of {id, value}")?;
            println!("{}", encode_column_filters(&filters));
            Ok(())
        }
        Command::DecodeFilters { value } => {
            let filters = try_decode_column_filters(&value).context("Invalid colfilter value")?;
            println!("{}", serde_json::to_string_pretty(&filters)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, prefix: Option<String>) -> Result<TableConfig> {
    let mut config = match path {
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("Invalid table config in {}", path.display()))?
        }
        None => TableConfig::default(),
    };
    if let Some(prefix) = prefix {
        config = config.with_prefix(prefix);
    }
    config.validate().context("Invalid table config")?;
    debug!("Using table config {:?}", config);
    Ok(config)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn view(config: TableConfig, data: &Path, columns: &Path, query: &str, all: bool) -> Result<()> {
    let columns: Vec<ColumnDef> = serde_json::from_value(read_json(columns)?)
        .with_context(|| format!("Invalid column definitions in {}", columns.display()))?;
    let rows = JsonRow::from_json_array(&read_json(data)?, &columns)
        .with_context(|| format!("Invalid rows in {}", data.display()))?;

    let history = MemoryHistory::new();
    let table = TableController::new(config, columns, UrlParams::parse(query), history.clone()).with_data(rows);
    if let Some(corrected) = history.current() {
        info!("Table state corrected to ?{}", corrected.to_query_string());
    }

    for filter in table.column_filters() {
        if let Some(column) = find_column(table.columns(), &filter.id) {
            let label = describe_filter(column.column_type, Some(&filter.value), table.config().utc_offset());
            info!("Filter {}: {}", column.header, label);
        }
    }
    if let Some(search) = table.global_filter() {
        info!("Search: {}", search);
    }

    let model = table.row_model();
    let visible = if all { model.rows() } else { model.page_rows() };
    info!(
        "Showing {} of {} rows (page {} of {})",
        visible.len(),
        model.row_count(),
        table.pagination().page_index + 1,
        model.page_count().max(1)
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_csv(&mut out, visible.iter().map(|v| v.row), table.columns())?;
    out.flush()?;
    Ok(())
}
