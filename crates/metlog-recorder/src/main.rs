//! metlog recorder
//!
//! Loads `metlog.yaml` (or the path given as the first argument), appends one
//! metrics line per interval, and stops on Ctrl-C after a final emit. The
//! process publishes its own uptime and sample count so the log is never
//! empty; real producers call `upsert` on the shared store instead.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use metlog_core::error::Result;
use metlog_core::MetricValue;
use metlog_recorder::config::{self, RecorderSection, ValueType};
use metlog_recorder::{spawn_periodic, SnapshotWriter};

async fn run<V: MetricValue>(section: &RecorderSection, from_u64: fn(u64) -> V) -> Result<()> {
    let writer = Arc::new(SnapshotWriter::<V>::open(&section.log_path)?.with_clock(section.clock));
    let (stop_tx, stop_rx) = watch::channel(false);

    let emitter = spawn_periodic(Arc::clone(&writer), section.interval(), stop_rx.clone());

    let store = writer.store_handle();
    let mut sampler_stop = stop_rx;
    let sample_every = (section.interval() / 4).max(Duration::from_millis(5));
    let sampler = tokio::spawn(async move {
        let started = Instant::now();
        let mut samples = 0u64;
        let mut tick = tokio::time::interval(sample_every);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    samples += 1;
                    let uptime_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    store.upsert("process uptime ms", from_u64(uptime_ms));
                    store.upsert("recorder samples", from_u64(samples));
                }
                _ = sampler_stop.changed() => break,
            }
        }
    });

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "ctrl-c handler failed; shutting down");
    }
    tracing::info!("shutdown requested");
    let _ = stop_tx.send(true);

    if let Err(e) = sampler.await {
        tracing::error!(error = %e, "sampler task failed");
    }
    match emitter.await {
        Ok(written) => tracing::info!(written, total = writer.emit_count(), "metrics log closed"),
        Err(e) => tracing::error!(error = %e, "emitter task failed"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "metlog.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let section = &cfg.recorder;

    tracing::info!(
        config = %path,
        log_path = %section.log_path,
        interval_ms = section.interval_ms,
        value_type = ?section.value_type,
        "metlog-recorder starting"
    );

    match section.value_type {
        ValueType::Float => run::<f64>(section, |n| n as f64).await,
        ValueType::Int => run::<i64>(section, |n| n as i64).await,
    }
}
