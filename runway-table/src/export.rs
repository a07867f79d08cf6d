//! CSV export of table rows.
//!
//! Cells render through [`CellValue::to_display_string`]: null cells become
//! the literal `null` and dates are written as RFC 3339.
//!
//! [`CellValue::to_display_string`]: crate::model::CellValue::to_display_string

use std::io::Write;

use crate::error::ExportError;
use crate::model::ColumnDef;
use crate::model::TableRow;

/// Writes a header row of column headers, then one record per row.
pub fn write_csv<'r, W, R>(
    writer: W,
    rows: impl IntoIterator<Item = &'r R>,
    columns: &[ColumnDef],
) -> Result<(), ExportError>
where
    W: Write,
    R: TableRow + 'r,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|column| column.header.as_str()))?;
    for row in rows {
        wtr.write_record(
            columns
                .iter()
                .map(|column| row.value(&column.id).to_display_string()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders rows as a CSV string.
pub fn rows_to_csv<'r, R: TableRow + 'r>(
    rows: impl IntoIterator<Item = &'r R>,
    columns: &[ColumnDef],
) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows, columns)?;
    Ok(String::from_utf8(buf)?)
}
