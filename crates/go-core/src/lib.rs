//! # go-core
//!
//! Core chart domain types for the GO humanitarian dashboard.
//! Implements Strategy pattern for axis label formatting.

pub mod datum;
pub mod temporal;

pub use datum::*;
pub use temporal::{
    TemporalResolution, bucket_index, bucket_limits, bucket_start, calendar_difference,
    format_month_label, format_tick_label, full_difference,
};

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for axis label formatting
pub trait AxisLabelFormatter: Send + Sync {
    fn format(&self, value: f64, index: usize) -> String;
}

impl<F> AxisLabelFormatter for F
where
    F: Fn(f64, usize) -> String + Send + Sync,
{
    fn format(&self, value: f64, index: usize) -> String {
        self(value, index)
    }
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Default)]
pub struct CompactNumberFormatter;

const COMPACT_SUFFIXES: [&str; 4] = ["", "K", "M", "B"];

impl CompactNumberFormatter {
    pub fn format_value(&self, num: f64) -> String {
        let abs = num.abs();
        let sign = if num < 0.0 { "-" } else { "" };

        // Unit is picked on the rounded value so 999_999 reads 1M, not 1000K
        let mut tier = 0;
        while tier + 1 < COMPACT_SUFFIXES.len()
            && round_tenth(abs / 1000_f64.powi(tier as i32)) >= 1000.0
        {
            tier += 1;
        }

        format!(
            "{}{}{}",
            sign,
            trim_decimal(abs / 1000_f64.powi(tier as i32)),
            COMPACT_SUFFIXES[tier]
        )
    }
}

impl AxisLabelFormatter for CompactNumberFormatter {
    fn format(&self, value: f64, _index: usize) -> String {
        self.format_value(value)
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One decimal place, trailing zero dropped
fn trim_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    match formatted.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_formatter() {
        let formatter = CompactNumberFormatter;
        assert_eq!(formatter.format_value(1_500_000.0), "1.5M");
        assert_eq!(formatter.format_value(2_000.0), "2K");
        assert_eq!(formatter.format_value(2_500_000_000.0), "2.5B");
        assert_eq!(formatter.format_value(42.0), "42");
        assert_eq!(formatter.format_value(0.5), "0.5");
        assert_eq!(formatter.format_value(-1_200.0), "-1.2K");
        assert_eq!(formatter.format_value(0.0), "0");
    }

    #[test]
    fn test_compact_formatter_promotes_rounded_unit() {
        let formatter = CompactNumberFormatter;
        assert_eq!(formatter.format_value(999.0), "999");
        assert_eq!(formatter.format_value(999.96), "1K");
        assert_eq!(formatter.format_value(999_999.0), "1M");
        assert_eq!(formatter.format_value(-999_999.0), "-1M");
        assert_eq!(formatter.format_value(999_950_000.0), "1B");
        assert_eq!(formatter.format_value(999_940_000.0), "999.9M");
        assert_eq!(formatter.format_value(2_000_000_000_000.0), "2000B");
    }

    #[test]
    fn test_closure_formatter_strategy() {
        let formatter = |value: f64, index: usize| format!("#{index}: {value}");
        assert_eq!(AxisLabelFormatter::format(&formatter, 3.0, 1), "#1: 3");
    }

    #[test]
    fn test_formatter_as_trait_object() {
        let formatter: Box<dyn AxisLabelFormatter> = Box::new(CompactNumberFormatter);
        assert_eq!(formatter.format(25_000.0, 0), "25K");
    }
}
