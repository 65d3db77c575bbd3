//! Core domain: record types, coercion, formatting, range filtering,
//! aggregation, column definitions, and configuration.

mod aggregate;
mod coerce;
mod columns;
mod config;
mod error;
mod format;
mod input;
mod period;
mod types;

pub use aggregate::*;
pub use coerce::{coerce_amount, coerce_amount_str, coerce_timestamp};
pub use columns::*;
pub use config::*;
pub use error::*;
pub use format::*;
pub use input::parse_records;
pub use period::*;
pub use types::*;
