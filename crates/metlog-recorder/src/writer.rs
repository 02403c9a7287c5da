//! Snapshot writer: freeze the store into one line, append it, reset, release.
//!
//! Only one `emit` runs at a time. The exclusivity token is taken with a
//! single CAS and a losing caller gets `ConcurrencyViolation` straight away,
//! so nothing in here ever waits on another emit. The sink sits behind a
//! `Mutex` only to satisfy the borrow checker; it is locked with `try_lock`
//! after the token is held and is therefore uncontended.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, TryLockError};

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::Deserialize;

use metlog_core::error::{MetlogError, Result};
use metlog_core::{write_line, MetricValue, MetricValueStore};

use crate::token::ExclusivityToken;

/// Wall clock used for line timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// Local time of the process.
    #[default]
    Local,
    Utc,
}

impl Clock {
    pub fn now(self) -> DateTime<FixedOffset> {
        match self {
            Clock::Local => Local::now().into(),
            Clock::Utc => Utc::now().into(),
        }
    }
}

pub struct SnapshotWriter<V: MetricValue, W: Write + Send = File> {
    store: Arc<MetricValueStore<V>>,
    token: ExclusivityToken,
    sink: Mutex<W>,
    clock: Clock,
    emitted: AtomicU64,
}

impl<V: MetricValue> SnapshotWriter<V, File> {
    /// Open `path` for appending (created if missing).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| MetlogError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), "metrics log opened");
        Ok(Self::with_sink(file))
    }
}

impl<V: MetricValue, W: Write + Send> SnapshotWriter<V, W> {
    /// Wrap an already-open sink.
    pub fn with_sink(sink: W) -> Self {
        Self {
            store: Arc::new(MetricValueStore::new()),
            token: ExclusivityToken::new(),
            sink: Mutex::new(sink),
            clock: Clock::default(),
            emitted: AtomicU64::new(0),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &MetricValueStore<V> {
        &self.store
    }

    /// Handle producers can keep without borrowing the writer.
    pub fn store_handle(&self) -> Arc<MetricValueStore<V>> {
        Arc::clone(&self.store)
    }

    pub fn token(&self) -> &ExclusivityToken {
        &self.token
    }

    pub fn upsert(&self, name: &str, value: V) {
        self.store.upsert(name, value);
    }

    pub fn try_upsert(&self, name: &str, value: V) -> Result<()> {
        self.store.try_upsert(name, value)
    }

    /// Number of lines successfully written so far.
    pub fn emit_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Write the current values as one line and reset them.
    pub fn emit(&self) -> Result<()> {
        let _guard = self.token.try_acquire().map_err(|e| {
            tracing::warn!("emit rejected: another emit is in flight");
            e
        })?;

        let now = self.clock.now();
        let pairs = self.store.snapshot_and_reset();

        let mut line = String::new();
        write_line(&mut line, &now, &pairs);

        let mut sink = match self.sink.try_lock() {
            Ok(sink) => sink,
            // A panic mid-write leaves at worst a torn line; keep logging.
            Err(TryLockError::Poisoned(p)) => p.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(MetlogError::ConcurrencyViolation),
        };

        if let Err(e) = sink.write_all(line.as_bytes()).and_then(|_| sink.flush()) {
            tracing::error!(error = %e, "metrics line write failed");
            return Err(MetlogError::Io(e));
        }

        self.emitted.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(pairs = pairs.len(), "metrics line emitted");
        Ok(())
    }

    /// Give the sink back, e.g. to inspect an in-memory buffer.
    pub fn into_sink(self) -> W {
        match self.sink.into_inner() {
            Ok(sink) => sink,
            Err(p) => p.into_inner(),
        }
    }
}
