//! metlog recorder library entry.
//!
//! Wires the core store to an append-only log sink: the exclusivity token,
//! the snapshot writer, the strict config loader, and the interval-driven
//! emitter. Consumed by the `metlog-recorder` binary and integration tests.

pub mod config;
pub mod periodic;
pub mod token;
pub mod writer;

pub use periodic::spawn_periodic;
pub use token::{current_context_id, ExclusivityToken, TokenGuard};
pub use writer::{Clock, SnapshotWriter};
