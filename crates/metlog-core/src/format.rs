//! Log line format.
//!
//! `YYYY-MM-DD HH:MM:SS.mmm` followed by ` "<name>" <value>` per pair, in the
//! order given, terminated by `\n`.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone};

use crate::value::MetricValue;

/// strftime pattern for the leading timestamp (millisecond resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Append one complete line to `out`.
pub fn write_line<Tz, V>(out: &mut String, at: &DateTime<Tz>, pairs: &[(String, V)])
where
    Tz: TimeZone,
    Tz::Offset: Display,
    V: MetricValue,
{
    let _ = write!(out, "{}", at.format(TIMESTAMP_FORMAT));
    for (name, value) in pairs {
        let _ = write!(out, " \"{}\" {}", name, value);
    }
    out.push('\n');
}

/// Render one complete line.
pub fn format_line<Tz, V>(at: &DateTime<Tz>, pairs: &[(String, V)]) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
    V: MetricValue,
{
    let mut out = String::with_capacity(24 + pairs.len() * 24);
    write_line(&mut out, at, pairs);
    out
}
