//! Numeric value types a store can hold.

use std::fmt::Display;

/// A single numeric value type, fixed per store instance.
///
/// `Default` is the value an entry is reset to after every snapshot and
/// `Display` is its canonical rendering in the log line.
pub trait MetricValue: Copy + Default + Display + Send + Sync + 'static {
    /// Whether the value can be rendered as a plain number.
    fn is_well_formed(&self) -> bool {
        true
    }
}

macro_rules! integer_values {
    ($($t:ty),* $(,)?) => {
        $(impl MetricValue for $t {})*
    };
}

integer_values!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl MetricValue for f32 {
    fn is_well_formed(&self) -> bool {
        self.is_finite()
    }
}

impl MetricValue for f64 {
    fn is_well_formed(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_must_be_finite() {
        assert!(0.97f64.is_well_formed());
        assert!(!f64::NAN.is_well_formed());
        assert!(!f32::INFINITY.is_well_formed());
        assert!(i64::MIN.is_well_formed());
    }

    #[test]
    fn whole_floats_render_without_point() {
        assert_eq!(42.0f64.to_string(), "42");
        assert_eq!(f64::default().to_string(), "0");
        assert_eq!(0.97f64.to_string(), "0.97");
    }
}
