//! Concurrent name -> value store.
//!
//! Entries live in a `DashMap`, so writers to different names only contend on
//! the shard that holds them and there is no map-wide lock. Ordering is not a
//! property of the map: snapshots collect per-shard and sort by name before
//! handing pairs out, which keeps the emitted order deterministic.

use dashmap::DashMap;

use crate::error::{MetlogError, Result};
use crate::value::MetricValue;

/// Names may not be empty and may not contain a quote or line break, since
/// those would make the emitted line ambiguous.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['"', '\n', '\r']) {
        return Err(MetlogError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub struct MetricValueStore<V: MetricValue> {
    map: DashMap<String, V>,
}

impl<V: MetricValue> Default for MetricValueStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: MetricValue> MetricValueStore<V> {
    pub fn new() -> Self {
        Self { map: DashMap::new() }
    }

    /// Insert `name` with `value`, or overwrite its current value.
    ///
    /// Malformed input is dropped with a warning; use [`Self::try_upsert`]
    /// to observe the rejection.
    pub fn upsert(&self, name: &str, value: V) {
        if let Err(e) = self.try_upsert(name, value) {
            tracing::warn!(error = %e, "metric update dropped");
        }
    }

    /// Insert or overwrite, rejecting malformed names and values.
    pub fn try_upsert(&self, name: &str, value: V) -> Result<()> {
        validate_name(name)?;
        if !value.is_well_formed() {
            return Err(MetlogError::InvalidValue(value.to_string()));
        }

        // Hot path: the name already exists, no allocation.
        if let Some(mut slot) = self.map.get_mut(name) {
            *slot = value;
            return Ok(());
        }

        self.map
            .entry(name.to_string())
            .and_modify(|v| *v = value)
            .or_insert(value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<V> {
        self.map.get(name).map(|r| *r.value())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Ordered copy of every (name, value) pair, leaving values untouched.
    pub fn snapshot(&self) -> Vec<(String, V)> {
        let mut pairs: Vec<(String, V)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Ordered copy of every pair, with each value swapped for `V::default()`.
    ///
    /// The swap is atomic per entry with respect to writers of that name. It
    /// is not atomic across the whole map: a concurrent upsert to a name that
    /// was already visited lands in the next interval, and a name inserted
    /// mid-traversal may or may not appear here.
    pub fn snapshot_and_reset(&self) -> Vec<(String, V)> {
        let mut pairs: Vec<(String, V)> = self
            .map
            .iter_mut()
            .map(|mut r| {
                let v = std::mem::take(r.value_mut());
                (r.key().clone(), v)
            })
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Reset every value to `V::default()`. Names are kept.
    pub fn reset(&self) {
        for mut r in self.map.iter_mut() {
            *r.value_mut() = V::default();
        }
    }
}
