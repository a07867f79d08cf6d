//! Table state controllers.
//!
//! A controller is built once per table view and owns the view's current URL
//! parameters. Every setter derives the next parameter set through the param
//! mapper and hands it to the host's [`Navigator`], skipping navigation when
//! nothing changed.
//!
//! - [`TableController`] - rows live in memory and are filtered, sorted and
//!   paginated locally
//! - [`ServerTableController`] - rows arrive already processed from a backend

mod client;
mod history;
mod server;
mod shared;

pub use client::TableController;
pub use history::MemoryHistory;
pub use server::FacetedValue;
pub use server::FacetedValues;
pub use server::ServerTableController;

pub use shared::SelectionChange;
pub use shared::SettingsVisibility;

use crate::params::UrlParams;

/// Receives the parameter sets a controller wants the URL to show.
///
/// Hosts typically forward these to their router; [`MemoryHistory`] records
/// them for tests and headless use.
pub trait Navigator: Send + Sync {
    /// Replace the table's URL parameters.
    fn navigate(&mut self, params: &UrlParams);
}
