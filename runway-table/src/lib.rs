//! Table state and filter synchronization engine.
//!
//! Keeps a tabular view's sorting, column filters, global search, pagination
//! and row selection in sync with URL query parameters, and evaluates those
//! filters against client-resident rows or turns them into backend queries.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod params;
pub mod query;
pub mod row_model;
pub mod state;

pub use config::TableConfig;
pub use controller::Navigator;
pub use controller::ServerTableController;
pub use controller::TableController;
pub use params::UrlParams;
pub use state::TableState;
pub use state::Updater;
