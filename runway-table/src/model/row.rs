//! Table rows

use std::collections::BTreeMap;

use chrono::DateTime;

use super::CellValue;
use super::ColumnDef;
use super::ColumnType;
use crate::error::RowError;

/// Trait for rows that can be displayed, filtered and sorted by a table.
///
/// # Example
///
/// ```
/// use runway_table::model::{CellValue, TableRow};
///
/// struct Job {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for Job {
///     fn id(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn value(&self, column_id: &str) -> CellValue {
///         match column_id {
///             "name" => CellValue::from(self.name.as_str()),
///             _ => CellValue::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Unique, stable row identifier (used for selection and expansion).
    fn id(&self) -> String;

    /// Value of the given column for this row.
    fn value(&self, column_id: &str) -> CellValue;

    /// Nested rows, shown beneath this row when it is expanded.
    fn sub_rows(&self) -> &[Self]
    where
        Self: Sized,
    {
        &[]
    }
}

/// A row read from a JSON object.
///
/// Values are coerced according to the column definitions: date columns accept
/// RFC 3339 strings or epoch milliseconds, and nested `subRows` arrays become
/// sub rows.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRow {
    id: String,
    fields: BTreeMap<String, CellValue>,
    sub_rows: Vec<JsonRow>,
}

impl JsonRow {
    /// Creates an empty row with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
            sub_rows: Vec::new(),
        }
    }

    /// Sets a field value.
    pub fn set(mut self, column_id: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(column_id.into(), value.into());
        self
    }

    /// Adds a sub row.
    pub fn with_sub_row(mut self, row: JsonRow) -> Self {
        self.sub_rows.push(row);
        self
    }

    /// Parses a row from a JSON object.
    pub fn from_json(value: &serde_json::Value, columns: &[ColumnDef]) -> Result<Self, RowError> {
        let object = value.as_object().ok_or(RowError::NotAnObject)?;

        let id = match object.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(RowError::MissingId),
        };

        let mut row = JsonRow::new(id);
        for column in columns {
            let raw = object.get(&column.id).unwrap_or(&serde_json::Value::Null);
            let cell = coerce(raw, column.column_type)
                .ok_or_else(|| RowError::invalid_value(&row.id, &column.id))?;
            row.fields.insert(column.id.clone(), cell);
        }

        if let Some(sub_rows) = object.get("subRows").and_then(|v| v.as_array()) {
            for sub in sub_rows {
                row.sub_rows.push(JsonRow::from_json(sub, columns)?);
            }
        }

        Ok(row)
    }

    /// Parses a JSON array of row objects.
    pub fn from_json_array(
        value: &serde_json::Value,
        columns: &[ColumnDef],
    ) -> Result<Vec<Self>, RowError> {
        let items = value.as_array().ok_or(RowError::NotAnArray)?;
        items.iter().map(|item| JsonRow::from_json(item, columns)).collect()
    }
}

fn coerce(raw: &serde_json::Value, column_type: ColumnType) -> Option<CellValue> {
    use serde_json::Value as Json;

    match (raw, column_type) {
        (Json::Null, _) => Some(CellValue::Null),
        (Json::String(s), ColumnType::Date) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| CellValue::DateTime(dt.to_utc())),
        (Json::Number(n), ColumnType::Date) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(CellValue::DateTime),
        (Json::String(s), ColumnType::Number | ColumnType::Duration) => {
            s.trim().parse::<f64>().ok().map(CellValue::Number)
        }
        (Json::Bool(b), _) => Some(CellValue::Bool(*b)),
        (Json::Number(n), _) => n.as_f64().map(CellValue::Number),
        (Json::String(s), _) => Some(CellValue::String(s.clone())),
        (other, _) => Some(CellValue::String(other.to_string())),
    }
}

impl TableRow for JsonRow {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn value(&self, column_id: &str) -> CellValue {
        self.fields.get(column_id).cloned().unwrap_or_default()
    }

    fn sub_rows(&self) -> &[Self] {
        &self.sub_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("name", "Name"),
            ColumnDef::new("created", "Created").with_type(ColumnType::Date),
            ColumnDef::new("runtime", "Runtime").with_type(ColumnType::Duration),
        ]
    }

    #[test]
    fn test_from_json_coerces_by_column_type() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Spring assessment",
            "created": "2024-03-01T12:00:00Z",
            "runtime": "90",
        });
        let row = JsonRow::from_json(&json, &columns()).unwrap();
        assert_eq!(row.id(), "7");
        assert_eq!(row.value("name"), CellValue::from("Spring assessment"));
        assert_eq!(row.value("runtime"), CellValue::from(90.0));
        assert_eq!(
            row.value("created").as_f64(),
            Some(1_709_294_400_000.0)
        );
    }

    #[test]
    fn test_missing_fields_are_null() {
        let json = serde_json::json!({ "id": "a" });
        let row = JsonRow::from_json(&json, &columns()).unwrap();
        assert!(row.value("name").is_null());
        assert!(row.value("unknown").is_null());
    }

    #[test]
    fn test_invalid_rows() {
        assert!(matches!(
            JsonRow::from_json(&serde_json::json!([1]), &columns()),
            Err(RowError::NotAnObject)
        ));
        assert!(matches!(
            JsonRow::from_json(&serde_json::json!({"name": "x"}), &columns()),
            Err(RowError::MissingId)
        ));
        assert!(matches!(
            JsonRow::from_json(&serde_json::json!({"id": "x", "created": "yesterday"}), &columns()),
            Err(RowError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_sub_rows() {
        let json = serde_json::json!({
            "id": "parent",
            "subRows": [{ "id": "child", "name": "nested" }],
        });
        let row = JsonRow::from_json(&json, &columns()).unwrap();
        assert_eq!(row.sub_rows().len(), 1);
        assert_eq!(row.sub_rows()[0].id(), "child");
    }
}
