//! Recorder settings from a YAML document.
//!
//! Parsing is strict: unknown keys anywhere in the document are rejected, and
//! the parsed config is validated before it is handed back, so a recorder is
//! never started with an out-of-range interval or an empty log path. Every
//! failure maps to `BadConfig` except a wrong `version`.

pub mod schema;

use std::fs;

use metlog_core::error::{MetlogError, Result};

pub use schema::{RecorderConfig, RecorderSection, ValueType};

/// Read and validate the config at `path`. A missing file is `BadConfig`.
pub fn load_from_file(path: &str) -> Result<RecorderConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| MetlogError::BadConfig(format!("cannot read {path}: {e}")))?;
    load_from_str(&text)
}

/// Parse and validate an in-memory YAML document.
pub fn load_from_str(text: &str) -> Result<RecorderConfig> {
    let cfg = serde_yaml::from_str::<RecorderConfig>(text)
        .map_err(|e| MetlogError::BadConfig(format!("recorder config: {e}")))?;
    cfg.validate().map(|()| cfg)
}
