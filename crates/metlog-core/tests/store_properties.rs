//! Store behaviour under concurrent writers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use metlog_core::MetricValueStore;

#[test]
fn every_snapshot_is_strictly_ordered_while_writers_run() {
    let store = Arc::new(MetricValueStore::<i64>::new());
    let stop = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..3)
        .map(|t| {
            let store = Arc::clone(&store);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let name = |i: i64| format!("m{:02}", i % 40 + t * 40);
                for i in 0..40 {
                    store.upsert(&name(i), i);
                }
                let mut i = 0i64;
                while !stop.load(Ordering::Relaxed) {
                    store.upsert(&name(i), i);
                    i += 1;
                }
            })
        })
        .collect();

    for _ in 0..200 {
        let pairs = store.snapshot_and_reset();
        assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0), "unordered snapshot");
    }

    stop.store(true, Ordering::Relaxed);
    for w in writers {
        w.join().unwrap();
    }

    // names are never dropped
    assert_eq!(store.len(), 120);
}

#[test]
fn last_write_before_snapshot_wins() {
    let store = MetricValueStore::<f64>::new();
    store.upsert("CPU", 0.97);
    store.upsert("CPU", 1.12);
    assert_eq!(store.snapshot(), vec![("CPU".to_string(), 1.12)]);
    // plain snapshot does not reset
    assert_eq!(store.get("CPU"), Some(1.12));
}

#[test]
fn second_snapshot_after_reset_shows_defaults() {
    let store = MetricValueStore::<u64>::new();
    store.upsert("HTTP requests RPS", 42);
    store.upsert("CPU", 3);

    let first = store.snapshot_and_reset();
    let second = store.snapshot_and_reset();

    assert_eq!(first, vec![("CPU".to_string(), 3), ("HTTP requests RPS".to_string(), 42)]);
    assert_eq!(second, vec![("CPU".to_string(), 0), ("HTTP requests RPS".to_string(), 0)]);
}
