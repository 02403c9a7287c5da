//! metlog core: the concurrent metric store, value trait, and log-line format.
//!
//! This crate owns the data side of the recorder. It carries no runtime or
//! file-system dependencies, so the store can be exercised standalone and
//! shared by any writer that wants to serialize it.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible
//! paths surface as `MetlogError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod format;
pub mod store;
pub mod value;

pub use error::{ErrorCode, MetlogError, Result};
pub use format::{format_line, write_line, TIMESTAMP_FORMAT};
pub use store::MetricValueStore;
pub use value::MetricValue;
