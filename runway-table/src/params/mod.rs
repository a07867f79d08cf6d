//! URL query parameters and their typed table-state mapping.
//!
//! - [`UrlParams`] - flat key to string/array map parsed from a query string
//! - [`codec`] - base64-of-JSON encoding of column filters
//! - [`mapper`] - typed getters/setters for pagination, sorting, filters and search

pub mod codec;
pub mod mapper;

use std::collections::BTreeMap;
use std::collections::btree_map;

use url::form_urlencoded;

/// Parameter names used for table state.
pub mod keys {
    pub const PAGE_SIZE: &str = "pageSize";
    pub const PAGE_INDEX: &str = "pageIndex";
    pub const SORT_COL: &str = "sortCol";
    pub const SORT_DESC: &str = "sortDesc";
    pub const SEARCH: &str = "search";
    pub const COLUMN_FILTER: &str = "colfilter";
    pub const COLUMN_FILTER_TOUCHED: &str = "colFilterTouched";
    pub const SORT_TOUCHED: &str = "sortTouched";
    pub const GLOBAL_FILTER_TOUCHED: &str = "globalFilterTouched";
}

/// Returns `"{prefix}_{name}"`, or `name` when there is no prefix.
pub fn prefixed_name(name: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{}_{}", prefix, name),
        None => name.to_string(),
    }
}

/// A single URL parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// `key=value`
    Single(String),
    /// `key[]=a&key[]=b`
    Multi(Vec<String>),
}

impl ParamValue {
    /// Returns the value as a string; arrays yield their first element.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s),
            ParamValue::Multi(values) => values.first().map(String::as_str),
        }
    }

    /// Returns the value as a slice; a single value is a one-element slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            ParamValue::Single(s) => std::slice::from_ref(s),
            ParamValue::Multi(values) => values,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Single(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Single(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::Multi(v)
    }
}

/// URL search parameters of the current location.
///
/// Keys are kept sorted so two parameter sets with the same contents compare
/// equal and render to the same query string. Array values are rendered with
/// a `[]` suffix, and both `key[]=v` and repeated `key=v` pairs parse back
/// into arrays.
///
/// # Example
///
/// ```
/// use runway_table::UrlParams;
///
/// let params = UrlParams::parse("?sortCol[]=name&sortDesc[]=true&pageSize=25");
/// assert_eq!(params.get_str("pageSize"), Some("25"));
/// assert_eq!(params.get_all("sortCol"), &["name".to_string()]);
/// assert_eq!(params.to_query_string(), "pageSize=25&sortCol%5B%5D=name&sortDesc%5B%5D=true");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParams {
    entries: BTreeMap<String, ParamValue>,
}

impl UrlParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = UrlParams::new();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.strip_suffix("[]") {
                Some(name) => params.push(name, value.into_owned()),
                None => match params.entries.get_mut(&*key) {
                    Some(existing) => {
                        let mut values = existing.as_slice().to_vec();
                        values.push(value.into_owned());
                        *existing = ParamValue::Multi(values);
                    }
                    None => {
                        params.insert(key.into_owned(), value.into_owned());
                    }
                },
            }
        }
        params
    }

    /// Renders the parameters as a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            match value {
                ParamValue::Single(v) => {
                    serializer.append_pair(key, v);
                }
                ParamValue::Multi(values) => {
                    let array_key = format!("{}[]", key);
                    for v in values {
                        serializer.append_pair(&array_key, v);
                    }
                }
            }
        }
        serializer.finish()
    }

    /// Returns a parameter value.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Returns a parameter as a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(ParamValue::as_str)
    }

    /// Returns a parameter as a list of strings (empty when absent).
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries.get(key).map(ParamValue::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if the parameter is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Appends a value to an array parameter, creating it if needed.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            btree_map::Entry::Occupied(mut entry) => {
                let mut values = entry.get().as_slice().to_vec();
                values.push(value);
                entry.insert(ParamValue::Multi(values));
            }
            btree_map::Entry::Vacant(entry) => {
                entry.insert(ParamValue::Multi(vec![value]));
            }
        }
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    /// Iterates over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for UrlParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_name() {
        assert_eq!(prefixed_name("pageSize", None), "pageSize");
        assert_eq!(prefixed_name("pageSize", Some("jobs")), "jobs_pageSize");
    }

    #[test]
    fn test_parse_arrays() {
        let params = UrlParams::parse("sortCol[]=a&sortCol[]=b&tag=x&tag=y&q=1");
        assert_eq!(params.get_all("sortCol"), &["a".to_string(), "b".to_string()]);
        assert_eq!(params.get_all("tag"), &["x".to_string(), "y".to_string()]);
        assert_eq!(params.get_str("q"), Some("1"));
        assert!(params.get_all("missing").is_empty());
    }

    #[test]
    fn test_query_string_round_trip() {
        let mut params = UrlParams::new();
        params.insert("search", "a b&c");
        params.push("sortCol", "name");
        params.push("sortCol", "created on");
        params.insert("colfilter", "W3siaSI6Im4iLCJ2IjoxfV0+/=");
        let reparsed = UrlParams::parse(&params.to_query_string());
        assert_eq!(reparsed, params);
    }

    #[test]
    fn test_single_value_as_slice() {
        let params = UrlParams::parse("sortCol=name");
        assert_eq!(params.get_all("sortCol"), &["name".to_string()]);
    }
}
