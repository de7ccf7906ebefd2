//! Calendar bucket arithmetic for temporal chart axes
//!
//! A bucket is one year, one month or one day depending on the
//! [`TemporalResolution`]. Buckets are addressed by a monotonically
//! increasing integer index so that spans and offsets become plain
//! integer arithmetic.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// RESOLUTION
// ============================================================================

/// Bucket granularity used to lay out a time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalResolution {
    Year,
    Month,
    Day,
}

impl TemporalResolution {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

impl Default for TemporalResolution {
    fn default() -> Self {
        Self::Day
    }
}

impl std::fmt::Display for TemporalResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// BUCKET INDEXING
// ============================================================================

/// Integer index of the bucket containing `date`
pub fn bucket_index(date: NaiveDate, resolution: TemporalResolution) -> i64 {
    match resolution {
        TemporalResolution::Year => date.year() as i64,
        TemporalResolution::Month => date.year() as i64 * 12 + date.month0() as i64,
        TemporalResolution::Day => date.num_days_from_ce() as i64,
    }
}

/// First day of the bucket with the given index.
///
/// Returns `None` when the index falls outside the representable date range.
pub fn bucket_start(index: i64, resolution: TemporalResolution) -> Option<NaiveDate> {
    match resolution {
        TemporalResolution::Year => {
            let year = i32::try_from(index).ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        TemporalResolution::Month => {
            let year = i32::try_from(index.div_euclid(12)).ok()?;
            let month = index.rem_euclid(12) as u32 + 1;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        TemporalResolution::Day => {
            let days = i32::try_from(index).ok()?;
            NaiveDate::from_num_days_from_ce_opt(days)
        }
    }
}

/// First and last bucket index whose start is a representable date
pub fn bucket_limits(resolution: TemporalResolution) -> (i64, i64) {
    (
        bucket_index(NaiveDate::MIN, resolution),
        bucket_index(NaiveDate::MAX, resolution),
    )
}

/// Number of bucket boundaries crossed between two dates.
///
/// This is the calendar difference: Dec 31 to Jan 1 is one year apart.
pub fn calendar_difference(from: NaiveDate, to: NaiveDate, resolution: TemporalResolution) -> i64 {
    bucket_index(to, resolution) - bucket_index(from, resolution)
}

/// Whole elapsed buckets between two instants.
///
/// Unlike [`calendar_difference`] a bucket only counts once it has fully
/// elapsed, so Dec 31 to Jan 1 is zero years apart.
pub fn full_difference(
    from: NaiveDateTime,
    to: NaiveDateTime,
    resolution: TemporalResolution,
) -> i64 {
    match resolution {
        TemporalResolution::Year => whole_months(from, to) / 12,
        TemporalResolution::Month => whole_months(from, to),
        TemporalResolution::Day => (to - from).num_days(),
    }
}

fn whole_months(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    if to < from {
        return -whole_months(to, from);
    }

    let mut months = (to.year() as i64 - from.year() as i64) * 12
        + (to.month0() as i64 - from.month0() as i64);

    // Last month is incomplete
    if (to.day(), to.time()) < (from.day(), from.time()) {
        months -= 1;
    }

    months
}

// ============================================================================
// LABELS
// ============================================================================

/// Axis label for a bucket start at the given resolution
pub fn format_tick_label(date: NaiveDate, resolution: TemporalResolution) -> String {
    match resolution {
        TemporalResolution::Year => date.format("%Y").to_string(),
        TemporalResolution::Month => date.format("%b %Y").to_string(),
        TemporalResolution::Day => date.format("%b %d, %Y").to_string(),
    }
}

/// Month abbreviation only (year-over-year charts)
pub fn format_month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}
