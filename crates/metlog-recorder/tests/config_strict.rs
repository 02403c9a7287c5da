#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metlog_recorder::config::{self, ValueType};
use metlog_recorder::Clock;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
recorder:
  log_path: "metrics.log"
  intervl_ms: 500 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
recorder:
  log_path: "metrics.log"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.recorder.log_path, "metrics.log");
    assert_eq!(cfg.recorder.interval_ms, 1000);
    assert_eq!(cfg.recorder.clock, Clock::Local);
    assert_eq!(cfg.recorder.value_type, ValueType::Float);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
recorder:
  log_path: "/var/log/app/metrics.log"
  interval_ms: 250
  clock: utc
  value_type: int
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.recorder.interval().as_millis(), 250);
    assert_eq!(cfg.recorder.clock, Clock::Utc);
    assert_eq!(cfg.recorder.value_type, ValueType::Int);
}

#[test]
fn rejects_bad_values() {
    let wrong_version = "version: 2\nrecorder:\n  log_path: a.log\n";
    let err = config::load_from_str(wrong_version).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");

    let empty_path = "version: 1\nrecorder:\n  log_path: \"  \"\n";
    let err = config::load_from_str(empty_path).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");

    let too_fast = "version: 1\nrecorder:\n  log_path: a.log\n  interval_ms: 1\n";
    let err = config::load_from_str(too_fast).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");

    let bad_clock = "version: 1\nrecorder:\n  log_path: a.log\n  clock: mars\n";
    assert!(config::load_from_str(bad_clock).is_err());
}

#[test]
fn missing_file_is_bad_config() {
    let err = config::load_from_file("/nonexistent/metlog.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
