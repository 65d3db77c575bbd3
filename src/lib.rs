//! # reportes
//!
//! Report export engine for payment-request portals: takes in-memory
//! collections of domain records, applies a wall-clock-anchored period
//! filter, aggregates per-status totals, and renders three interoperable
//! artifacts — delimited text, a styled workbook, and a paginated
//! document — with byte-for-byte-consistent figures across all three.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Input coercion is defensive throughout: unparsable amounts become
//! zero, unparsable timestamps drop out of bounded windows, and the only
//! error a well-formed call can see is an unsupported format key.
//!
//! ## Quick Start
//!
//! ```rust
//! use reportes::core::*;
//!
//! let records = parse_records::<PaymentRequest>(r#"[
//!     {"id": 1, "amount": "1,000.00", "status": "pending",
//!      "createdAt": "2026-08-01T10:00:00Z"},
//!     {"id": 2, "amount": 2000, "status": "PAID",
//!      "createdAt": "2026-08-02T11:30:00Z"}
//! ]"#).unwrap();
//!
//! let summary = aggregate(&records);
//! assert_eq!(summary.total.count, 2);
//! assert_eq!(summary.total.total, rust_decimal_macros::dec!(3000));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record types, coercion, formatters, period filter, aggregator |
//! | `csv` | Delimited-text renderer |
//! | `xlsx` | Styled workbook renderer |
//! | `pdf` | Paginated document renderer |
//! | `export` | Orchestrator wiring all three renderers |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "csv")]
pub mod csv;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
