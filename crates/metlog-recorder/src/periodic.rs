//! Interval-driven emitter.
//!
//! Calls `emit` once per interval until shutdown is signalled, then emits a
//! final line so the last partial interval is not lost. A contended emit
//! skips the interval; a sink error is logged and the loop keeps going.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use metlog_core::MetricValue;

use crate::writer::SnapshotWriter;

fn emit_once<V: MetricValue, W: Write + Send>(writer: &SnapshotWriter<V, W>) -> bool {
    match writer.emit() {
        Ok(()) => true,
        Err(e) if e.is_contended() => {
            tracing::warn!("interval skipped: emit already in flight");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, code = e.code().as_str(), "interval emit failed");
            false
        }
    }
}

/// Spawn the emitter. The task resolves to the number of lines it wrote.
pub fn spawn_periodic<V, W>(
    writer: Arc<SnapshotWriter<V, W>>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<u64>
where
    V: MetricValue,
    W: Write + Send + 'static,
{
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        tick.tick().await;

        let mut written = 0u64;
        let interval_ms = u64::try_from(every.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(interval_ms, "periodic emitter started");

        loop {
            // shutdown is checked first so a pending tick never races the final emit
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = tick.tick() => {
                    if emit_once(&writer) {
                        written += 1;
                    }
                }
            }
        }

        if emit_once(&writer) {
            written += 1;
        }
        tracing::info!(written, "periodic emitter stopped");
        written
    })
}
