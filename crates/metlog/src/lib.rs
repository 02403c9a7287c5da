//! Top-level facade crate for metlog.
//!
//! Re-exports the core store and the recorder so users can depend on a single crate.

pub mod core {
    pub use metlog_core::*;
}

pub mod recorder {
    pub use metlog_recorder::*;
}

pub use metlog_core::{MetlogError, MetricValue, MetricValueStore, Result};
pub use metlog_recorder::SnapshotWriter;
