use std::time::Duration;

use serde::Deserialize;

use metlog_core::error::{MetlogError, Result};

use crate::writer::Clock;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecorderConfig {
    pub version: u32,

    pub recorder: RecorderSection,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetlogError::UnsupportedVersion);
        }

        self.recorder.validate()?;

        Ok(())
    }
}

/// Numeric type every metric of the recorder uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `f64`
    #[default]
    Float,
    /// `i64`
    Int,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecorderSection {
    pub log_path: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub clock: Clock,

    #[serde(default)]
    pub value_type: ValueType,
}

impl RecorderSection {
    pub fn validate(&self) -> Result<()> {
        if self.log_path.trim().is_empty() {
            return Err(MetlogError::BadConfig("recorder.log_path must not be empty".into()));
        }
        if !(10..=3_600_000).contains(&self.interval_ms) {
            return Err(MetlogError::BadConfig(
                "recorder.interval_ms must be between 10 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_interval_ms() -> u64 {
    1000
}
