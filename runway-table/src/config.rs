//! Table configuration

use std::time::Duration;

use chrono::FixedOffset;
use chrono::Offset;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Page sizes offered when none are configured.
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Configuration for a single table instance.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use runway_table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_prefix("jobs")
///     .with_page_sizes(vec![25, 50])
///     .with_search_debounce(Duration::from_millis(250));
///
/// assert_eq!(config.default_page_size(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Page sizes offered by the page-size picker. The first one is the
    /// default and is omitted from the URL.
    ///
    /// Default: `[10, 25, 50, 100]`
    pub page_sizes: Vec<usize>,

    /// Namespace for this table's URL keys, so several tables can share one URL.
    ///
    /// Default: none
    pub query_key_prefix: Option<String>,

    /// Delay before a typed global search is committed, in milliseconds.
    ///
    /// Default: 300
    pub search_debounce_ms: u64,

    /// Delay before other typed filter inputs are committed, in milliseconds.
    ///
    /// Default: 500
    pub input_debounce_ms: u64,

    /// Whether rows can be selected (multi-select when enabled).
    ///
    /// Default: false
    pub enable_row_selection: bool,

    /// Whether sorting by a second column adds to the sort instead of replacing it.
    ///
    /// Default: true
    pub enable_multi_sort: bool,

    /// Offset east of UTC, in minutes, of the clock date filters are typed in.
    ///
    /// Default: 0
    pub utc_offset_minutes: i32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            query_key_prefix: None,
            search_debounce_ms: 300,
            input_debounce_ms: 500,
            enable_row_selection: false,
            enable_multi_sort: true,
            utc_offset_minutes: 0,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL key prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.query_key_prefix = Some(prefix.into());
        self
    }

    /// Sets the offered page sizes.
    pub fn with_page_sizes(mut self, page_sizes: Vec<usize>) -> Self {
        self.page_sizes = page_sizes;
        self
    }

    /// Sets the global search debounce delay.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Sets the debounce delay for other typed inputs.
    pub fn with_input_debounce(mut self, delay: Duration) -> Self {
        self.input_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables row selection.
    pub fn with_row_selection(mut self, enabled: bool) -> Self {
        self.enable_row_selection = enabled;
        self
    }

    /// Enables or disables multi-column sorting.
    pub fn with_multi_sort(mut self, enabled: bool) -> Self {
        self.enable_multi_sort = enabled;
        self
    }

    /// Sets the UTC offset date filter inputs are interpreted in.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Returns the URL key prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.query_key_prefix.as_deref()
    }

    /// Returns the default page size (the first configured size).
    pub fn default_page_size(&self) -> usize {
        self.page_sizes
            .first()
            .copied()
            .unwrap_or(DEFAULT_PAGE_SIZES[0])
    }

    /// Returns the global search debounce delay.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Returns the debounce delay for other typed inputs.
    pub fn input_debounce(&self) -> Duration {
        Duration::from_millis(self.input_debounce_ms)
    }

    /// Returns the offset date filter inputs are interpreted in.
    ///
    /// Falls back to UTC when the configured offset is out of range.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_sizes.is_empty() {
            return Err(ConfigError::NoPageSizes);
        }
        if self.page_sizes.contains(&0) {
            return Err(ConfigError::ZeroPageSize);
        }
        if let Some(prefix) = &self.query_key_prefix {
            if prefix.is_empty() || prefix.contains(['&', '=', '?', '#']) {
                return Err(ConfigError::InvalidPrefix(prefix.clone()));
            }
        }
        if FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ConfigError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }
}
