//! Error types

mod codec;
mod config;
mod export;
mod param;
mod row;

pub use codec::*;
pub use config::*;
pub use export::*;
pub use param::*;
pub use row::*;
